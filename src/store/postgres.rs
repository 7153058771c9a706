//! PostgreSQL-backed store. All values are bound as parameters.

use super::TriviaStore;
use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question, QuizFilter, SortOrder};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn row_to_question(row: &PgRow) -> Result<Question, sqlx::Error> {
    Ok(Question {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        category: row.try_get("category")?,
        difficulty: row.try_get("difficulty")?,
    })
}

fn rows_to_questions(rows: &[PgRow]) -> Result<Vec<Question>, StoreError> {
    rows.iter()
        .map(|r| row_to_question(r).map_err(StoreError::from))
        .collect()
}

/// Escape LIKE wildcards so the term matches as a literal substring (backslash is the default escape).
fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|r| -> Result<Category, StoreError> {
                Ok(Category {
                    id: r.try_get("id")?,
                    kind: r.try_get("type")?,
                })
            })
            .collect()
    }

    async fn questions(&self, order: SortOrder) -> Result<Vec<Question>, StoreError> {
        let dir = match order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        let sql = format!("SELECT {} FROM questions ORDER BY id {}", QUESTION_COLUMNS, dir);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows_to_questions(&rows)
    }

    async fn questions_in_category(&self, category_id: i32) -> Result<Vec<Question>, StoreError> {
        let sql = format!("SELECT {} FROM questions WHERE category = $1 ORDER BY id", QUESTION_COLUMNS);
        tracing::debug!(sql = %sql, category_id, "query");
        let rows = sqlx::query(&sql).bind(category_id).fetch_all(&self.pool).await?;
        rows_to_questions(&rows)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            "SELECT {} FROM questions WHERE question ILIKE $1 OR answer ILIKE $1 ORDER BY id DESC",
            QUESTION_COLUMNS
        );
        let pattern = like_pattern(term);
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query(&sql).bind(&pattern).fetch_all(&self.pool).await?;
        rows_to_questions(&rows)
    }

    async fn insert_question(&self, new: &NewQuestion) -> Result<Question, StoreError> {
        let sql = format!(
            "INSERT INTO questions (question, answer, difficulty, category) VALUES ($1, $2, $3, $4) RETURNING {}",
            QUESTION_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query(&sql)
            .bind(&new.question)
            .bind(&new.answer)
            .bind(new.difficulty)
            .bind(new.category)
            .fetch_one(&self.pool)
            .await?;
        Ok(row_to_question(&row)?)
    }

    async fn delete_question(&self, id: i32) -> Result<bool, StoreError> {
        tracing::debug!(id, "delete question");
        let deleted: Option<(i32,)> = sqlx::query_as("DELETE FROM questions WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }

    async fn random_question(&self, filter: &QuizFilter) -> Result<Option<Question>, StoreError> {
        let sql = format!(
            "SELECT {} FROM questions \
             WHERE NOT (id = ANY($1)) AND ($2::INTEGER IS NULL OR category = $2) \
             ORDER BY RANDOM() LIMIT 1",
            QUESTION_COLUMNS
        );
        tracing::debug!(sql = %sql, exclude = ?filter.exclude, category = ?filter.category, "query");
        let row = sqlx::query(&sql)
            .bind(&filter.exclude)
            .bind(filter.category)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_question).transpose()?)
    }

    async fn count_questions(&self, category: Option<i32>) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM questions WHERE ($1::INTEGER IS NULL OR category = $1)")
                .bind(category)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_wraps_plain_terms() {
        assert_eq!(like_pattern("title"), "%title%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
