use std::{fs::File, io::Read, path::Path};

use crate::{error::AppResult, models::Product};

/// Read-only product table loaded once at startup
///
/// Row order is significant: it is the identity of a product and the
/// tie-breaker when ranking recommendations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parses a headered CSV stream into a catalog
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let products = reader
            .deserialize::<Product>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(products))
    }

    /// Loads a catalog from a CSV file on disk
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            rows = catalog.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// First `n` rows, or the whole table when it is shorter
    pub fn head(&self, n: usize) -> &[Product] {
        &self.products[..n.min(self.products.len())]
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
