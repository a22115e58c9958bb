use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies one configured source.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    pub name: String,
    pub source_id: i32,
}

/// One fetched item, before fingerprinting.
///
/// Consumed exactly once by the coordinator; nothing retains it after the
/// fingerprinting decision.
#[derive(Debug, Clone)]
pub struct RawUnit {
    pub headline: String,
    pub description: String,
    /// Origin reference (URL) — participates in the fingerprint.
    pub origin: String,
    pub source_name: String,
    pub published_at: Option<String>,
    pub captured_at: DateTime<Utc>,
}

/// Everything one fetch produced for a source.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub units: Vec<RawUnit>,
}

/// Sentiment class assigned by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}

/// One model's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Output of the two-model scorer, persisted verbatim into analysis
/// metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentOutcome {
    pub financial: ModelScore,
    pub social: ModelScore,
}

/// Terminal state of one unit's trip through a phase.
///
/// `Duplicate` and `Rejected` are expected outcomes, not errors; the
/// failure variants record that the unit was dropped after its cause was
/// logged. No variant ever aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Suppression store said "seen" — silently dropped.
    Duplicate,
    /// Empty taxonomy match — dropped.
    Rejected,
    /// The suppression store could not answer; the unit is skipped rather
    /// than risk a duplicate insert.
    DedupUnavailable,
    /// Scorer raised; unit dropped, batch continues.
    ScoreFailed,
    /// Ledger insert failed; unit dropped, batch continues.
    StoreFailed,
    /// Phase A success: raw record persisted.
    Captured { raw_id: i64 },
    /// Phase B success: analysis persisted, fan-out complete.
    Correlated {
        analysis_id: i64,
        correlations: usize,
    },
}

/// Counters for one phase over all sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseReport {
    pub sources_fetched: usize,
    pub sources_failed: usize,
    pub units_seen: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub failed: usize,
    pub persisted: usize,
    pub correlations: usize,
    pub market_snapshots: usize,
}

impl PhaseReport {
    pub(crate) fn record(&mut self, outcome: &UnitOutcome) {
        self.units_seen += 1;
        match outcome {
            UnitOutcome::Duplicate => self.duplicates += 1,
            UnitOutcome::Rejected => self.rejected += 1,
            UnitOutcome::DedupUnavailable
            | UnitOutcome::ScoreFailed
            | UnitOutcome::StoreFailed => self.failed += 1,
            UnitOutcome::Captured { .. } => self.persisted += 1,
            UnitOutcome::Correlated { correlations, .. } => {
                self.persisted += 1;
                self.correlations += correlations;
            }
        }
    }
}
