//! The pipeline coordinator: one state machine per unit, two phases.

use std::time::Duration;

use chrono::Utc;

use newsflow_core::{TaxonomyMatcher, ANALYSIS_VERSION};
use newsflow_dedup::{Admission, Fingerprint, Namespace, SuppressionStore};

use crate::correlate::correlate_keywords;
use crate::traits::{
    AnalysisDraft, InstrumentProvider, Ledger, SentimentScorer, SourceAdapter,
};
use crate::types::{PhaseReport, RawUnit, SourceDescriptor, UnitOutcome};

/// Synthetic source id recorded on bulk market snapshots.
const MARKET_SNAPSHOT_SOURCE_ID: i32 = 2;

/// Policy knobs for one coordinator instance.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Politeness delay between sources during a phase.
    pub inter_source_delay: Duration,
    /// Mandatory delay between successive instrument-provider queries.
    pub market_pacing: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inter_source_delay: Duration::from_secs(2),
            market_pacing: Duration::from_secs(20),
        }
    }
}

/// Sequences the full pipeline over a list of sources.
///
/// Generic over its four collaborator seams so the whole state machine can
/// run against in-memory fakes. One instance serves both phases; the only
/// shared mutable state is the suppression store, whose admissions are
/// atomic per fingerprint.
pub struct Coordinator<'a, D, S, L, P> {
    matcher: &'a TaxonomyMatcher,
    store: &'a D,
    scorer: &'a S,
    ledger: &'a L,
    provider: &'a P,
    config: PipelineConfig,
}

impl<'a, D, S, L, P> Coordinator<'a, D, S, L, P>
where
    D: SuppressionStore,
    S: SentimentScorer,
    L: Ledger,
    P: InstrumentProvider,
{
    pub fn new(
        matcher: &'a TaxonomyMatcher,
        store: &'a D,
        scorer: &'a S,
        ledger: &'a L,
        provider: &'a P,
        config: PipelineConfig,
    ) -> Self {
        Self {
            matcher,
            store,
            scorer,
            ledger,
            provider,
            config,
        }
    }

    /// Phase A: capture raw records.
    ///
    /// Per unit: fingerprint → capture-namespace admission → taxonomy gate →
    /// raw insert. Per-source fetch failures skip that source; per-unit
    /// failures skip that unit. The phase closes with one bulk market
    /// snapshot tied to the newest raw record.
    pub async fn run_capture<A: SourceAdapter>(&self, sources: &[A]) -> PhaseReport {
        let mut report = PhaseReport::default();

        for (i, source) in sources.iter().enumerate() {
            if i > 0 && !self.config.inter_source_delay.is_zero() {
                tokio::time::sleep(self.config.inter_source_delay).await;
            }
            let descriptor = source.descriptor();
            let batch = match source.fetch().await {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!(source = %descriptor.name, error = %e, "fetch failed — skipping source");
                    report.sources_failed += 1;
                    continue;
                }
            };
            report.sources_fetched += 1;

            for unit in batch.units {
                let outcome = self.capture_unit(&descriptor, &unit).await;
                report.record(&outcome);
            }
            tracing::info!(source = %descriptor.name, "capture pass complete");
        }

        if self.capture_market_snapshot().await {
            report.market_snapshots += 1;
        }

        report
    }

    /// Phase B: score and correlate.
    ///
    /// Per unit: fingerprint → analysis-namespace admission → match → score →
    /// analysis insert → correlation fan-out. Analysis persistence strictly
    /// precedes any correlation row referencing it.
    pub async fn run_analyze<A: SourceAdapter>(&self, sources: &[A]) -> PhaseReport {
        let mut report = PhaseReport::default();

        for (i, source) in sources.iter().enumerate() {
            if i > 0 && !self.config.inter_source_delay.is_zero() {
                tokio::time::sleep(self.config.inter_source_delay).await;
            }
            let descriptor = source.descriptor();
            let batch = match source.fetch().await {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!(source = %descriptor.name, error = %e, "fetch failed — skipping source");
                    report.sources_failed += 1;
                    continue;
                }
            };
            report.sources_fetched += 1;

            for unit in batch.units {
                let outcome = self.analyze_unit(&descriptor, &unit).await;
                report.record(&outcome);
            }
            tracing::info!(source = %descriptor.name, "analysis pass complete");
        }

        report
    }

    /// Both phases back to back, capture first.
    pub async fn run<A: SourceAdapter>(&self, sources: &[A]) -> (PhaseReport, PhaseReport) {
        let capture = self.run_capture(sources).await;
        let analysis = self.run_analyze(sources).await;
        (capture, analysis)
    }

    /// One bulk market snapshot per capture phase, anchored to the newest
    /// raw record regardless of source. Skipped with a warning when the
    /// ledger is empty or the provider is down; never fails the phase.
    async fn capture_market_snapshot(&self) -> bool {
        let raw_news_id = match self.ledger.latest_raw_id_any().await {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::warn!("no raw records yet — skipping market snapshot");
                return false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "latest raw id lookup failed — skipping market snapshot");
                return false;
            }
        };

        let overview = match self.provider.market_overview().await {
            Ok(overview) => overview,
            Err(e) => {
                tracing::warn!(error = %e, "market overview fetch failed — skipping snapshot");
                return false;
            }
        };

        match self
            .ledger
            .insert_market_snapshot(raw_news_id, MARKET_SNAPSHOT_SOURCE_ID, overview)
            .await
        {
            Ok(snapshot_id) => {
                tracing::info!(snapshot_id, raw_news_id, "market snapshot persisted");
                true
            }
            Err(e) => {
                tracing::warn!(raw_news_id, error = %e, "market snapshot insert failed");
                false
            }
        }
    }

    async fn capture_unit(&self, descriptor: &SourceDescriptor, unit: &RawUnit) -> UnitOutcome {
        let fingerprint = Fingerprint::of(&unit.headline, &unit.origin);

        match self.store.admit(Namespace::Capture, &fingerprint) {
            Ok(Admission::Admitted) => {}
            Ok(Admission::Duplicate) => {
                tracing::debug!(%fingerprint, "duplicate at capture — skipping");
                return UnitOutcome::Duplicate;
            }
            Err(e) => {
                tracing::warn!(%fingerprint, error = %e, "suppression store unavailable — skipping unit");
                return UnitOutcome::DedupUnavailable;
            }
        }

        let matched = self.matcher.match_unit(&unit.headline, &unit.description);
        if matched.is_empty() {
            tracing::debug!(headline = %unit.headline, "no taxonomy match — rejected");
            return UnitOutcome::Rejected;
        }

        let text = summarize(&unit.headline, &unit.description);
        match self
            .ledger
            .insert_raw(&text, &unit.origin, descriptor.source_id, &fingerprint.to_hex())
            .await
        {
            Ok(raw_id) => {
                tracing::info!(raw_id, source = %descriptor.name, "raw record persisted");
                UnitOutcome::Captured { raw_id }
            }
            Err(e) => {
                tracing::warn!(%fingerprint, error = %e, "raw insert failed — unit dropped");
                UnitOutcome::StoreFailed
            }
        }
    }

    async fn analyze_unit(&self, descriptor: &SourceDescriptor, unit: &RawUnit) -> UnitOutcome {
        let fingerprint = Fingerprint::of(&unit.headline, &unit.origin);

        match self.store.admit(Namespace::Analysis, &fingerprint) {
            Ok(Admission::Admitted) => {}
            Ok(Admission::Duplicate) => {
                tracing::debug!(%fingerprint, "duplicate at analysis — skipping");
                return UnitOutcome::Duplicate;
            }
            Err(e) => {
                tracing::warn!(%fingerprint, error = %e, "suppression store unavailable — skipping unit");
                return UnitOutcome::DedupUnavailable;
            }
        }

        let matched = self.matcher.match_unit(&unit.headline, &unit.description);
        if matched.is_empty() {
            tracing::debug!(headline = %unit.headline, "no taxonomy match — rejected");
            return UnitOutcome::Rejected;
        }

        let combined = format!("{}. {}", unit.headline, unit.description);
        let sentiment = match self.scorer.score(&combined) {
            Ok(sentiment) => sentiment,
            Err(e) => {
                tracing::warn!(%fingerprint, error = %e, "scoring failed — unit dropped");
                return UnitOutcome::ScoreFailed;
            }
        };

        // Best-effort link to this source's most recent raw capture; an
        // unlinked analysis is still valid.
        let raw_news_id = match self.ledger.latest_raw_id(descriptor.source_id).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "latest raw id lookup failed — persisting unlinked");
                None
            }
        };

        let metadata = serde_json::json!({
            "title": unit.headline,
            "description": unit.description,
            "source": unit.source_name,
            "published_at": unit.published_at,
            "url": unit.origin,
            "matched_keywords": matched,
            "sentiment_analysis": sentiment,
        });

        let draft = AnalysisDraft {
            raw_news_id,
            matched_keywords: matched.clone(),
            analyzed_at: Utc::now(),
            summary: summarize(&unit.headline, &unit.description),
            analysis_version: ANALYSIS_VERSION.to_string(),
            metadata,
            source_id: descriptor.source_id,
            fingerprint: fingerprint.to_hex(),
        };

        let analysis_id = match self.ledger.insert_analysis(draft).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(%fingerprint, error = %e, "analysis insert failed — unit dropped");
                return UnitOutcome::StoreFailed;
            }
        };
        tracing::info!(analysis_id, source = %descriptor.name, "analysis persisted");

        let correlations = correlate_keywords(
            self.ledger,
            self.provider,
            analysis_id,
            &matched,
            self.config.market_pacing,
        )
        .await;

        UnitOutcome::Correlated {
            analysis_id,
            correlations,
        }
    }
}

fn summarize(headline: &str, description: &str) -> String {
    format!("Headline: {headline}\nDescription: {description}")
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
