use std::error::Error;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use gather_server::config::{Config, StoreBackend};
use gather_server::routes::create_routes;
use gather_server::state::AppState;
use gather_server::store::{EventStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn EventStore> = match config.store_backend {
        StoreBackend::Postgres => {
            Arc::new(PgStore::connect(&config.database_url, config.max_connections).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let app = create_routes(AppState::new(store), &config);

    tracing::info!("🚀 Server running at http://{}", config.bind_addr);
    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
