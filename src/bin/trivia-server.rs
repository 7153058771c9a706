//! Trivia server: reads configuration from the environment (and `.env`), prepares
//! the database, and serves the trivia API.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use trivia_api::{
    app, ensure_database_exists, ensure_schema, seed_default_categories, AppState, MemoryStore, Paginator,
    PgStore, ServerConfig, StorageKind, TriviaStore, DEFAULT_CATEGORIES,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trivia_api=info,trivia_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store: Arc<dyn TriviaStore> = match config.storage {
        StorageKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_schema(&pool).await?;
            if config.seed_categories {
                seed_default_categories(&pool).await?;
            }
            Arc::new(PgStore::new(pool))
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            let labels = if config.seed_categories { DEFAULT_CATEGORIES } else { &[] };
            Arc::new(MemoryStore::with_categories(labels.iter().copied()))
        }
    };

    let state = AppState::new(store, Paginator::new(config.questions_per_page));
    let router = app(state, config.body_limit_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        page_size = config.questions_per_page,
        storage = ?config.storage,
        "trivia server listening"
    );
    axum::serve(listener, router).await?;
    Ok(())
}
