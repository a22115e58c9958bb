//! Market correlation fan-out.
//!
//! Runs after an analysis record is persisted — never before, so every
//! correlation row references an analysis id that already exists. Provider
//! queries are paced and strictly sequential per analysis.

use std::time::Duration;

use crate::traits::{InstrumentProvider, Ledger};

/// Query the provider for every matched keyword and persist one correlation
/// row per candidate instrument. Returns the number of rows written.
///
/// The query term is the category token — the portion of `category:keyword`
/// before the separator. Provider failures (already retried inside the
/// provider) and single-candidate persistence failures are logged and
/// skipped; neither stops the remaining keywords or candidates.
pub(crate) async fn correlate_keywords<L, P>(
    ledger: &L,
    provider: &P,
    analysis_id: i64,
    matched_keywords: &[String],
    pacing: Duration,
) -> usize
where
    L: Ledger,
    P: InstrumentProvider,
{
    let mut written = 0usize;

    for pair in matched_keywords {
        let term = pair.split(':').next().unwrap_or(pair).trim();
        if term.is_empty() {
            tracing::warn!(analysis_id, pair, "malformed keyword pair, skipping");
            continue;
        }

        match provider.lookup(term).await {
            Ok(candidates) if candidates.is_empty() => {
                tracing::info!(analysis_id, term, "no instrument candidates");
            }
            Ok(candidates) => {
                for candidate in candidates {
                    match ledger
                        .insert_correlation(analysis_id, &candidate.id, candidate.snapshot)
                        .await
                    {
                        Ok(_) => {
                            written += 1;
                            tracing::debug!(
                                analysis_id,
                                instrument = %candidate.id,
                                "correlation persisted"
                            );
                        }
                        Err(e) => {
                            // Statement-level rollback: siblings are unaffected.
                            tracing::warn!(
                                analysis_id,
                                instrument = %candidate.id,
                                error = %e,
                                "correlation insert failed"
                            );
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    analysis_id,
                    term,
                    error = %e,
                    "instrument lookup failed — skipping keyword"
                );
            }
        }

        // Every provider query is followed by the pacing delay, the last one
        // included, so consecutive units never land back to back.
        if !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
    }

    written
}
