//! Database operations for the `market_correlations` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `market_correlations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CorrelationRow {
    pub id: i64,
    pub analysis_id: i64,
    pub instrument_id: String,
    pub snapshot: Value,
    pub created_at: DateTime<Utc>,
}

/// Insert one instrument snapshot linked to an analysis.
///
/// Each insert is its own statement-level transaction: a failure rolls back
/// only this candidate and leaves sibling correlation rows untouched. The
/// foreign key on `analysis_id` enforces at the storage layer what the
/// pipeline already guarantees — the analysis row exists first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_correlation(
    pool: &PgPool,
    analysis_id: i64,
    instrument_id: &str,
    snapshot: Value,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO market_correlations (analysis_id, instrument_id, snapshot) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(analysis_id)
    .bind(instrument_id)
    .bind(snapshot)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List the correlation rows for one analysis, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_correlations_for_analysis(
    pool: &PgPool,
    analysis_id: i64,
) -> Result<Vec<CorrelationRow>, DbError> {
    let rows = sqlx::query_as::<_, CorrelationRow>(
        "SELECT id, analysis_id, instrument_id, snapshot, created_at \
         FROM market_correlations \
         WHERE analysis_id = $1 \
         ORDER BY id",
    )
    .bind(analysis_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
