//! Database operations for the `raw_news` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `raw_news` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RawNewsRow {
    pub id: i64,
    pub text: String,
    pub origin: String,
    pub source_id: i32,
    pub fingerprint: String,
    pub captured_at: DateTime<Utc>,
}

/// Insert a raw captured unit and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails; the statement is its own
/// transaction, so a failure leaves no partial row behind.
pub async fn insert_raw_news(
    pool: &PgPool,
    text: &str,
    origin: &str,
    source_id: i32,
    fingerprint: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO raw_news (text, origin, source_id, fingerprint) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(text)
    .bind(origin)
    .bind(source_id)
    .bind(fingerprint)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Return the id of the most recently captured raw row for a source, or
/// `None` if that source has never produced one.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_raw_news_id(pool: &PgPool, source_id: i32) -> Result<Option<i64>, DbError> {
    let id: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM raw_news \
         WHERE source_id = $1 \
         ORDER BY captured_at DESC, id DESC \
         LIMIT 1",
    )
    .bind(source_id)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Return the id of the most recently captured raw row across all sources,
/// or `None` if nothing has been captured yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_raw_news_id_any(pool: &PgPool) -> Result<Option<i64>, DbError> {
    let id: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM raw_news \
         ORDER BY captured_at DESC, id DESC \
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Fetch one raw row by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has that id, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_raw_news(pool: &PgPool, id: i64) -> Result<RawNewsRow, DbError> {
    sqlx::query_as::<_, RawNewsRow>(
        "SELECT id, text, origin, source_id, fingerprint, captured_at \
         FROM raw_news WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}
