//! View-model helpers: name truncation and decorative image/price picks.
//!
//! Decorations are display-only. They are never persisted and carry no
//! pricing meaning.

use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::models::{Product, Recommendation};

pub const DEFAULT_TRUNCATE_LENGTH: usize = 30;

const ELLIPSIS: &str = "...";

pub const DECORATIVE_IMAGES: [&str; 8] = [
    "static/img/img_1.png",
    "static/img/img_2.png",
    "static/img/img_3.png",
    "static/img/img_4.png",
    "static/img/img_5.png",
    "static/img/img_6.png",
    "static/img/img_7.png",
    "static/img/img_8.png",
];

pub const DECORATIVE_PRICES: [u32; 10] = [40, 50, 60, 70, 100, 122, 106, 50, 30, 50];

/// Returns `text` unchanged when it fits in `length` characters,
/// otherwise its first `length` characters followed by `...`.
pub fn truncate(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Source of decorative picks, swappable so tests can pin the values
pub trait Decorations: Send + Sync {
    fn image(&self) -> &'static str;
    fn price(&self) -> u32;
}

/// Uniform picks from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDecorations;

impl Decorations for RandomDecorations {
    fn image(&self) -> &'static str {
        DECORATIVE_IMAGES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(DECORATIVE_IMAGES[0])
    }

    fn price(&self) -> u32 {
        DECORATIVE_PRICES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(DECORATIVE_PRICES[0])
    }
}

/// A product as handed to the template layer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductCard {
    pub name: String,
    pub short_name: String,
    pub brand: String,
    pub rating: f64,
    pub review_count: i64,
    pub image_url: String,
    pub display_image: &'static str,
    pub price: u32,
}

impl ProductCard {
    fn build(
        name: &str,
        brand: &str,
        rating: f64,
        review_count: i64,
        image_url: &str,
        decorations: &dyn Decorations,
    ) -> Self {
        Self {
            name: name.to_string(),
            short_name: truncate(name, DEFAULT_TRUNCATE_LENGTH),
            brand: brand.to_string(),
            rating,
            review_count,
            image_url: image_url.to_string(),
            display_image: decorations.image(),
            price: decorations.price(),
        }
    }

    pub fn from_product(product: &Product, decorations: &dyn Decorations) -> Self {
        Self::build(
            &product.name,
            &product.brand,
            product.rating,
            product.review_count,
            &product.image_url,
            decorations,
        )
    }

    pub fn from_recommendation(rec: &Recommendation, decorations: &dyn Decorations) -> Self {
        Self::build(
            &rec.name,
            &rec.brand,
            rec.rating,
            rec.review_count,
            &rec.image_url,
            decorations,
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Always picks the same decorations
    pub(crate) struct FixedDecorations;

    impl Decorations for FixedDecorations {
        fn image(&self) -> &'static str {
            DECORATIVE_IMAGES[2]
        }

        fn price(&self) -> u32 {
            122
        }
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Red Shoe", 30), "Red Shoe");
        assert_eq!(truncate("", 30), "");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        let text = "a".repeat(30);
        assert_eq!(truncate(&text, 30), text);
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "Maybelline New York Lash Sensational Mascara";
        let short = truncate(text, 30);

        assert_eq!(short, "Maybelline New York Lash Sensa...");
        assert_eq!(short.chars().count(), 33);
        assert!(text.starts_with(short.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "Crème Brûlée Body Wash Crème Brûlée";
        let short = truncate(text, 10);
        assert_eq!(short, "Crème Brûl...");
    }

    #[test]
    fn test_truncate_bound_holds_for_any_name() {
        let names = [
            "x",
            "Exactly thirty characters long",
            "Thirty-one characters long name",
            "A very long product name that keeps going and going",
        ];
        for name in names {
            let short = truncate(name, 30);
            assert!(short.chars().count() <= 33);
            if name.chars().count() > 30 {
                assert!(short.ends_with(ELLIPSIS));
                assert!(name.starts_with(&short[..short.len() - ELLIPSIS.len()]));
            } else {
                assert_eq!(short, name);
            }
        }
    }

    #[test]
    fn test_random_decorations_draw_from_fixed_sets() {
        let decorations = RandomDecorations;
        for _ in 0..100 {
            assert!(DECORATIVE_IMAGES.contains(&decorations.image()));
            assert!(DECORATIVE_PRICES.contains(&decorations.price()));
        }
    }

    #[test]
    fn test_card_from_product() {
        let product = Product {
            name: "A very long product name that keeps going".to_string(),
            tags: "long".to_string(),
            brand: "Acme".to_string(),
            rating: 3.5,
            review_count: 7,
            image_url: "orig.png".to_string(),
        };

        let card = ProductCard::from_product(&product, &FixedDecorations);

        assert_eq!(card.name, product.name);
        assert_eq!(card.short_name, "A very long product name that ...");
        assert_eq!(card.image_url, "orig.png");
        assert_eq!(card.display_image, "static/img/img_3.png");
        assert_eq!(card.price, 122);
    }
}
