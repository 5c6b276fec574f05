use crate::{
    db::Catalog,
    models::{Product, Recommendation},
};

use super::tfidf::TfidfModel;

/// Content-based recommendations for a free-text product name
///
/// The seed is the first catalog row whose name contains `query`
/// (case-insensitive). Every row's tags are vectorized with TF-IDF and the
/// catalog is ranked by cosine similarity to the seed, highest first, with
/// ties kept in catalog order. The seed itself is never returned.
///
/// Returns an empty list when nothing matches or `top_n <= 0`. The model is
/// rebuilt from the whole catalog on every call.
pub fn recommend(catalog: &Catalog, query: &str, top_n: i64) -> Vec<Recommendation> {
    let Ok(top_n) = usize::try_from(top_n) else {
        return Vec::new();
    };
    if top_n == 0 {
        return Vec::new();
    }

    let products = catalog.products();
    let Some(seed) = find_seed(products, query) else {
        tracing::debug!(query, "No catalog row matches recommendation query");
        return Vec::new();
    };

    let tags: Vec<&str> = products.iter().map(|p| p.tags.as_str()).collect();
    let model = TfidfModel::fit(&tags);

    let mut scored: Vec<(usize, f64)> = (0..products.len())
        .filter(|&index| index != seed)
        .map(|index| (index, model.cosine(seed, index)))
        .collect();

    // Vec::sort_by is stable, so equal scores stay in catalog order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    tracing::debug!(
        query,
        seed = %products[seed].name,
        vocabulary = model.vocabulary_size(),
        candidates = scored.len(),
        "Ranked catalog against seed product"
    );

    scored
        .into_iter()
        .take(top_n)
        .map(|(index, _)| Recommendation::from(&products[index]))
        .collect()
}

/// Index of the first product whose name contains `query`, ignoring case
fn find_seed(products: &[Product], query: &str) -> Option<usize> {
    let needle = query.to_lowercase();
    products
        .iter()
        .position(|product| product.name.to_lowercase().contains(&needle))
}
