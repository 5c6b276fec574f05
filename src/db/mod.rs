pub mod accounts;
pub mod catalog;
pub mod postgres;

pub use accounts::{AccountStore, InMemoryAccountStore, PgAccountStore};
pub use catalog::Catalog;
pub use postgres::{create_pool, run_migrations};
