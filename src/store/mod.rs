//! Data access for categories and questions.
//!
//! Handlers only talk to [`TriviaStore`]; [`PgStore`] backs production and
//! [`MemoryStore`] backs tests and local demos.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::{ensure_database_exists, ensure_schema, seed_default_categories, DEFAULT_CATEGORIES};

use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question, QuizFilter, SortOrder};
use async_trait::async_trait;

#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories ordered by id.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    /// All questions ordered by id.
    async fn questions(&self, order: SortOrder) -> Result<Vec<Question>, StoreError>;

    /// Questions whose category equals `category_id`, ascending by id.
    async fn questions_in_category(&self, category_id: i32) -> Result<Vec<Question>, StoreError>;

    /// Case-insensitive literal substring match on question or answer text, descending by id.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;

    async fn insert_question(&self, new: &NewQuestion) -> Result<Question, StoreError>;

    /// Delete by id. Returns false when no such row existed.
    async fn delete_question(&self, id: i32) -> Result<bool, StoreError>;

    /// One question chosen uniformly from those matching `filter`, or `None` when exhausted.
    async fn random_question(&self, filter: &QuizFilter) -> Result<Option<Question>, StoreError>;

    /// Count all questions, or only those in `category` when given.
    async fn count_questions(&self, category: Option<i32>) -> Result<i64, StoreError>;

    /// Cheap liveness probe used by the readiness route.
    async fn ping(&self) -> Result<(), StoreError>;
}
