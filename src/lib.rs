//! Trivia API: REST backend for a trivia quiz over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StorageKind};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Category, NewQuestion, Question};
pub use pagination::Paginator;
pub use routes::app;
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_schema, seed_default_categories, MemoryStore, PgStore, TriviaStore,
    DEFAULT_CATEGORIES,
};
