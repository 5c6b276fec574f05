use serde::{Deserialize, Deserializer};

/// A catalog row as loaded from the product CSV files.
///
/// Identity is the row position in the loaded table; nothing here is unique.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Tags", default)]
    pub tags: String,
    #[serde(rename = "Brand", default)]
    pub brand: String,
    #[serde(
        rename = "Rating",
        default,
        deserialize_with = "lenient_f64"
    )]
    pub rating: f64,
    #[serde(
        rename = "ReviewCount",
        default,
        deserialize_with = "lenient_count"
    )]
    pub review_count: i64,
    #[serde(rename = "ImageURL", default)]
    pub image_url: String,
}

/// Projection of a [`Product`] returned by the similarity engine
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub name: String,
    pub review_count: i64,
    pub brand: String,
    pub image_url: String,
    pub rating: f64,
}

impl From<&Product> for Recommendation {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            review_count: product.review_count,
            brand: product.brand.clone(),
            image_url: product.image_url.clone(),
            rating: product.rating,
        }
    }
}

// Exported catalogs leave blanks and write counts as floats ("12.0").
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(value) => value.parse::<f64>().map_err(serde::de::Error::custom),
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    if value.is_finite() {
        Ok(value.trunc() as i64)
    } else {
        Err(serde::de::Error::custom("review count is not a finite number"))
    }
}
