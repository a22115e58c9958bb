//! Capability seams consumed by the coordinator.
//!
//! Each external collaborator — source, scorer, ledger, instrument
//! provider — sits behind one of these traits so the pipeline can be
//! exercised end to end against in-memory fakes. Concrete implementations
//! live with the binary that wires them up.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::types::{SentimentOutcome, SourceBatch, SourceDescriptor};

#[derive(Debug, Error)]
#[error("source error: {0}")]
pub struct SourceError(pub String);

#[derive(Debug, Error)]
#[error("scorer error: {0}")]
pub struct ScoreError(pub String);

#[derive(Debug, Error)]
#[error("ledger error: {0}")]
pub struct LedgerError(pub String);

#[derive(Debug, Error)]
#[error("instrument provider error: {0}")]
pub struct ProviderError(pub String);

/// Produces raw content units for one configured source.
///
/// A fetch failure is scoped to the source: the coordinator logs it and
/// moves on to the next adapter.
pub trait SourceAdapter {
    fn descriptor(&self) -> SourceDescriptor;

    /// # Errors
    ///
    /// Returns [`SourceError`] when the source cannot be fetched or parsed.
    fn fetch(&self) -> impl std::future::Future<Output = Result<SourceBatch, SourceError>> + Send;
}

/// Two-model sentiment classification.
pub trait SentimentScorer {
    /// # Errors
    ///
    /// Returns [`ScoreError`] when either model fails; the coordinator
    /// catches this per unit.
    fn score(&self, text: &str) -> Result<SentimentOutcome, ScoreError>;
}

/// Everything needed to persist one analysis record.
#[derive(Debug, Clone)]
pub struct AnalysisDraft {
    pub raw_news_id: Option<i64>,
    pub matched_keywords: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
    pub summary: String,
    pub analysis_version: String,
    pub metadata: Value,
    pub source_id: i32,
    pub fingerprint: String,
}

/// Insert-with-returned-id persistence, transactional per statement.
pub trait Ledger {
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the insert fails; nothing is persisted.
    fn insert_raw(
        &self,
        text: &str,
        origin: &str,
        source_id: i32,
        fingerprint: &str,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send;

    /// # Errors
    ///
    /// Returns [`LedgerError`] if the query fails.
    fn latest_raw_id(
        &self,
        source_id: i32,
    ) -> impl std::future::Future<Output = Result<Option<i64>, LedgerError>> + Send;

    /// Most recent raw record across all sources.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the query fails.
    fn latest_raw_id_any(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<i64>, LedgerError>> + Send;

    /// # Errors
    ///
    /// Returns [`LedgerError`] if the insert fails; nothing is persisted.
    fn insert_analysis(
        &self,
        draft: AnalysisDraft,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send;

    /// # Errors
    ///
    /// Returns [`LedgerError`] if the insert fails; only this candidate's
    /// row is rolled back.
    fn insert_correlation(
        &self,
        analysis_id: i64,
        instrument_id: &str,
        snapshot: Value,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send;

    /// # Errors
    ///
    /// Returns [`LedgerError`] if the insert fails; nothing is persisted.
    fn insert_market_snapshot(
        &self,
        raw_news_id: i64,
        source_id: i32,
        overview: MarketOverview,
    ) -> impl std::future::Future<Output = Result<i64, LedgerError>> + Send;
}

/// Bulk market state: the provider's top market-cap page and trending list,
/// carried verbatim to the ledger.
#[derive(Debug, Clone)]
pub struct MarketOverview {
    pub markets: Value,
    pub trending: Value,
}

/// One candidate instrument returned for a query term.
#[derive(Debug, Clone)]
pub struct Instrument {
    pub id: String,
    /// Opaque snapshot payload, persisted as-is.
    pub snapshot: Value,
}

/// External market-data lookup. Retry discipline lives inside the
/// implementation; by the time an error surfaces here it is terminal for
/// that query.
pub trait InstrumentProvider {
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the lookup fails after retries.
    fn lookup(
        &self,
        term: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Instrument>, ProviderError>> + Send;

    /// # Errors
    ///
    /// Returns [`ProviderError`] when either overview payload cannot be
    /// fetched after retries.
    fn market_overview(
        &self,
    ) -> impl std::future::Future<Output = Result<MarketOverview, ProviderError>> + Send;
}
