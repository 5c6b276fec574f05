use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shopwise::api::{create_router, AppState};
use shopwise::config::{AccountBackend, Config};
use shopwise::db::{self, AccountStore, Catalog, InMemoryAccountStore, PgAccountStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Catalogs are loaded once; a missing or malformed file aborts startup.
    let catalog = Catalog::from_path(&config.catalog_path)?;
    let trending = Catalog::from_path(&config.trending_path)?;

    let accounts: Arc<dyn AccountStore> = match config.account_store {
        AccountBackend::Postgres => {
            let pool = db::create_pool(&config.database_url)?;
            if config.run_migrations {
                // The storefront still serves when the database is down;
                // only account writes fail until it comes back.
                if let Err(e) = db::run_migrations(&pool).await {
                    tracing::warn!(error = %e, "Database unavailable, migrations skipped");
                }
            }
            Arc::new(PgAccountStore::new(pool))
        }
        AccountBackend::Memory => {
            tracing::info!("Using in-memory account store");
            Arc::new(InMemoryAccountStore::new())
        }
    };

    let state = AppState::new(catalog, trending, accounts)
        .with_home_page_size(config.home_page_size);

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
