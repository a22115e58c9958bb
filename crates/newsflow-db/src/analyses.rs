//! Database operations for the `news_analyses` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `news_analyses` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisRow {
    pub id: i64,
    pub raw_news_id: Option<i64>,
    pub matched_keywords: Value,
    pub analyzed_at: DateTime<Utc>,
    pub summary: String,
    pub analysis_version: String,
    pub metadata: Value,
    pub source_id: i32,
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for one analysis insert.
///
/// `matched_keywords` is a JSON array of `category:keyword` strings and must
/// be non-empty by the time it reaches the ledger — the pipeline never
/// persists an analysis without taxonomy matches. `metadata` carries the
/// full sentiment payload and article fields.
#[derive(Debug, Clone)]
pub struct NewAnalysis<'a> {
    pub raw_news_id: Option<i64>,
    pub matched_keywords: Value,
    pub analyzed_at: DateTime<Utc>,
    pub summary: &'a str,
    pub analysis_version: &'a str,
    pub metadata: Value,
    pub source_id: i32,
    pub fingerprint: &'a str,
}

/// Insert an analysis record and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_analysis(pool: &PgPool, analysis: NewAnalysis<'_>) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO news_analyses \
             (raw_news_id, matched_keywords, analyzed_at, summary, \
              analysis_version, metadata, source_id, fingerprint) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id",
    )
    .bind(analysis.raw_news_id)
    .bind(analysis.matched_keywords)
    .bind(analysis.analyzed_at)
    .bind(analysis.summary)
    .bind(analysis.analysis_version)
    .bind(analysis.metadata)
    .bind(analysis.source_id)
    .bind(analysis.fingerprint)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List recent analyses, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_analyses(pool: &PgPool, limit: i64) -> Result<Vec<AnalysisRow>, DbError> {
    let rows = sqlx::query_as::<_, AnalysisRow>(
        "SELECT id, raw_news_id, matched_keywords, analyzed_at, summary, \
                analysis_version, metadata, source_id, fingerprint, created_at \
         FROM news_analyses \
         ORDER BY analyzed_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
