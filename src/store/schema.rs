//! Database bootstrap: create the database, the trivia tables, and seed categories.

use crate::error::StoreError;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Categories inserted into an empty `categories` table.
pub const DEFAULT_CATEGORIES: &[&str] = &["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

/// Create `categories` and `questions` if missing. Idempotent.
/// `questions.category` carries no foreign key; orphaned ids are allowed.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            type TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            difficulty INTEGER NOT NULL,
            category INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category)")
        .execute(pool)
        .await?;
    Ok(())
}

/// Insert [`DEFAULT_CATEGORIES`] when the table is empty. Returns the number inserted.
pub async fn seed_default_categories(pool: &PgPool) -> Result<u64, StoreError> {
    let mut tx = pool.begin().await?;
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&mut *tx)
        .await?;
    if count > 0 {
        return Ok(0);
    }
    let mut inserted = 0;
    for name in DEFAULT_CATEGORIES {
        inserted += sqlx::query("INSERT INTO categories (type) VALUES ($1)")
            .bind(*name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }
    tx.commit().await?;
    tracing::info!(inserted, "seeded default categories");
    Ok(inserted)
}

/// Create the database named in `database_url` when it does not exist yet.
/// Connects to the `postgres` admin database on the same server to do so.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Options for the `postgres` admin database on the same server, plus the target
/// database name when the URL names one other than `postgres`.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), StoreError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| StoreError::Backend(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_database_from_plain_url() {
        let (admin, name) = admin_options("postgres://user:pw@localhost:5432/trivia_test?sslmode=disable").unwrap();
        assert_eq!(name.as_deref(), Some("trivia_test"));
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
    }

    #[test]
    fn socket_host_in_query_does_not_leak_into_database_name() {
        let (admin, name) = admin_options("postgres:///trivia?host=/var/run/postgresql").unwrap();
        assert_eq!(name.as_deref(), Some("trivia"));
        assert_eq!(admin.get_database(), Some("postgres"));
    }

    #[test]
    fn admin_database_is_never_created() {
        let (_, name) = admin_options("postgres://localhost/postgres").unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn invalid_url_is_backend_error() {
        assert!(matches!(admin_options("::not a url::"), Err(StoreError::Backend(_))));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("trivia"), "\"trivia\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
