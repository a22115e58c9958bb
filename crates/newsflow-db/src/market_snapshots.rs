//! Database operations for the `market_snapshots` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `market_snapshots` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MarketSnapshotRow {
    pub id: i64,
    pub raw_news_id: i64,
    pub source_id: i32,
    pub data_type: String,
    pub markets: Value,
    pub trending: Value,
    pub created_at: DateTime<Utc>,
}

/// Parameters for one bulk market snapshot insert.
#[derive(Debug, Clone)]
pub struct NewMarketSnapshot<'a> {
    pub raw_news_id: i64,
    pub source_id: i32,
    pub data_type: &'a str,
    pub markets: Value,
    pub trending: Value,
}

/// Insert a bulk market snapshot and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_market_snapshot(
    pool: &PgPool,
    snapshot: NewMarketSnapshot<'_>,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO market_snapshots (raw_news_id, source_id, data_type, markets, trending) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id",
    )
    .bind(snapshot.raw_news_id)
    .bind(snapshot.source_id)
    .bind(snapshot.data_type)
    .bind(snapshot.markets)
    .bind(snapshot.trending)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List snapshots linked to one raw record, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_snapshots_for_raw_news(
    pool: &PgPool,
    raw_news_id: i64,
) -> Result<Vec<MarketSnapshotRow>, DbError> {
    let rows = sqlx::query_as::<_, MarketSnapshotRow>(
        "SELECT id, raw_news_id, source_id, data_type, markets, trending, created_at \
         FROM market_snapshots \
         WHERE raw_news_id = $1 \
         ORDER BY id",
    )
    .bind(raw_news_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
