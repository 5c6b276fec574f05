use std::sync::Arc;

use crate::{
    db::{AccountStore, Catalog},
    services::{Decorations, RandomDecorations},
};

/// Rows shown on the home page when not configured otherwise
pub const DEFAULT_HOME_PAGE_SIZE: usize = 8;

/// Shared application state
///
/// The catalogs are loaded once at startup and only ever read.
#[derive(Clone)]
pub struct AppState {
    /// Full catalog used by the similarity engine
    pub catalog: Arc<Catalog>,
    /// Trending products shown on the home page
    pub trending: Arc<Catalog>,
    pub accounts: Arc<dyn AccountStore>,
    pub decorations: Arc<dyn Decorations>,
    pub home_page_size: usize,
}

impl AppState {
    /// Creates state with random decorations and the default home page size
    pub fn new(catalog: Catalog, trending: Catalog, accounts: Arc<dyn AccountStore>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            trending: Arc::new(trending),
            accounts,
            decorations: Arc::new(RandomDecorations),
            home_page_size: DEFAULT_HOME_PAGE_SIZE,
        }
    }

    pub fn with_decorations(mut self, decorations: Arc<dyn Decorations>) -> Self {
        self.decorations = decorations;
        self
    }

    pub fn with_home_page_size(mut self, home_page_size: usize) -> Self {
        self.home_page_size = home_page_size;
        self
    }
}
