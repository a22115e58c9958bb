//! Postgres-backed ledger.

use serde_json::Value;
use sqlx::PgPool;

use newsflow_db::{analyses, correlations, market_snapshots, raw_news};
use newsflow_pipeline::{AnalysisDraft, Ledger, LedgerError, MarketOverview};

/// Label stored with every bulk snapshot row.
const SNAPSHOT_DATA_TYPE: &str = "marketcap_and_trending";

pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Ledger for PgLedger {
    fn insert_raw(
        &self,
        text: &str,
        origin: &str,
        source_id: i32,
        fingerprint: &str,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send {
        async move {
            raw_news::insert_raw_news(&self.pool, text, origin, source_id, fingerprint)
                .await
                .map_err(|e| LedgerError(e.to_string()))
        }
    }

    fn latest_raw_id(
        &self,
        source_id: i32,
    ) -> impl std::future::Future<Output = Result<Option<i64>, LedgerError>> + Send {
        async move {
            raw_news::latest_raw_news_id(&self.pool, source_id)
                .await
                .map_err(|e| LedgerError(e.to_string()))
        }
    }

    fn latest_raw_id_any(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<i64>, LedgerError>> + Send {
        async move {
            raw_news::latest_raw_news_id_any(&self.pool)
                .await
                .map_err(|e| LedgerError(e.to_string()))
        }
    }

    fn insert_analysis(
        &self,
        draft: AnalysisDraft,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send {
        async move {
            let analysis = analyses::NewAnalysis {
                raw_news_id: draft.raw_news_id,
                matched_keywords: serde_json::json!(draft.matched_keywords),
                analyzed_at: draft.analyzed_at,
                summary: &draft.summary,
                analysis_version: &draft.analysis_version,
                metadata: draft.metadata.clone(),
                source_id: draft.source_id,
                fingerprint: &draft.fingerprint,
            };
            analyses::insert_analysis(&self.pool, analysis)
                .await
                .map_err(|e| LedgerError(e.to_string()))
        }
    }

    fn insert_correlation(
        &self,
        analysis_id: i64,
        instrument_id: &str,
        snapshot: Value,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send {
        async move {
            correlations::insert_correlation(&self.pool, analysis_id, instrument_id, snapshot)
                .await
                .map_err(|e| LedgerError(e.to_string()))
        }
    }

    fn insert_market_snapshot(
        &self,
        raw_news_id: i64,
        source_id: i32,
        overview: MarketOverview,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send {
        async move {
            let snapshot = market_snapshots::NewMarketSnapshot {
                raw_news_id,
                source_id,
                data_type: SNAPSHOT_DATA_TYPE,
                markets: overview.markets,
                trending: overview.trending,
            };
            market_snapshots::insert_market_snapshot(&self.pool, snapshot)
                .await
                .map_err(|e| LedgerError(e.to_string()))
        }
    }
}
