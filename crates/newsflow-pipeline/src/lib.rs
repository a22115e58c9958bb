//! The newsflow ingestion pipeline.
//!
//! Sequences fetch → fingerprint → dedup admission → taxonomy match →
//! sentiment scoring → persistence → market correlation, with every
//! per-unit terminal state explicit and every failure isolated to the unit
//! or source it happened in. Runs in two phases: capture (raw records) and
//! analysis (scored records plus correlation fan-out), each deduplicating
//! against its own suppression namespace.

mod coordinator;
mod correlate;
pub mod scorer;
mod traits;
mod types;

pub use coordinator::{Coordinator, PipelineConfig};
pub use scorer::LexiconScorer;
pub use traits::{
    AnalysisDraft, Instrument, InstrumentProvider, Ledger, LedgerError, MarketOverview,
    ProviderError, ScoreError, SentimentScorer, SourceAdapter, SourceError,
};
pub use types::{
    ModelScore, PhaseReport, RawUnit, SentimentLabel, SentimentOutcome, SourceBatch,
    SourceDescriptor, UnitOutcome,
};
