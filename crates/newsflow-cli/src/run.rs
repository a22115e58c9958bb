//! Wiring: config → clients → coordinator.

use std::time::Duration;

use anyhow::Context;

use newsflow_core::{load_taxonomy, AppConfig, TaxonomyMatcher};
use newsflow_db::{connect_pool, run_migrations, PoolConfig};
use newsflow_dedup::BloomSuppressionStore;
use newsflow_markets::{MarketsClient, RetryPolicy};
use newsflow_newsapi::NewsApiClient;
use newsflow_pipeline::{
    Coordinator, LexiconScorer, PhaseReport, PipelineConfig, SourceDescriptor,
};

use crate::adapters::{MarketsProvider, NewsApiSource, PgLedger};

/// Stable source id for the NewsAPI adapter, recorded on every row it
/// produces.
const NEWSAPI_SOURCE_ID: i32 = 1;

#[derive(Debug, Clone, Copy)]
pub enum Phase {
    Capture,
    Analyze,
    Both,
}

pub async fn execute(phase: Phase, from: Option<String>, config: &AppConfig) -> anyhow::Result<()> {
    let taxonomy = load_taxonomy(&config.taxonomy_path).with_context(|| {
        format!(
            "loading taxonomy from {}",
            config.taxonomy_path.display()
        )
    })?;
    tracing::info!(keywords = taxonomy.keyword_count(), "taxonomy loaded");
    let matcher = TaxonomyMatcher::new(&taxonomy).context("compiling taxonomy keywords")?;

    let pool = connect_pool(
        &config.database_url,
        PoolConfig {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        },
    )
    .await
    .context("connecting to Postgres")?;
    run_migrations(&pool).await.context("running migrations")?;

    let store = BloomSuppressionStore::new(config.dedup_capacity, config.dedup_error_rate);
    let scorer = LexiconScorer;
    let ledger = PgLedger::new(pool.clone());

    let markets = MarketsClient::new(
        None,
        config.markets_request_timeout_secs,
        RetryPolicy {
            max_attempts: config.markets_max_attempts,
            wait: Duration::from_secs(config.markets_retry_wait_secs),
        },
        Duration::from_secs(config.markets_pacing_secs),
    )
    .context("building markets client")?;
    let provider = MarketsProvider::new(markets);

    let sources = build_sources(config, from)?;
    if sources.is_empty() {
        tracing::warn!("no sources configured; nothing to do");
    }

    let coordinator = Coordinator::new(
        &matcher,
        &store,
        &scorer,
        &ledger,
        &provider,
        PipelineConfig {
            inter_source_delay: Duration::from_millis(config.inter_source_delay_ms),
            market_pacing: Duration::from_secs(config.markets_pacing_secs),
        },
    );

    match phase {
        Phase::Capture => log_report("capture", &coordinator.run_capture(&sources).await),
        Phase::Analyze => log_report("analysis", &coordinator.run_analyze(&sources).await),
        Phase::Both => {
            let (capture, analysis) = coordinator.run(&sources).await;
            log_report("capture", &capture);
            log_report("analysis", &analysis);
        }
    }

    // The pool is scoped to this run.
    pool.close().await;
    Ok(())
}

fn build_sources(config: &AppConfig, from: Option<String>) -> anyhow::Result<Vec<NewsApiSource>> {
    let mut sources = Vec::new();

    if let Some(key) = &config.newsapi_key {
        let client = NewsApiClient::new(
            key,
            config.source_request_timeout_secs,
            &config.source_user_agent,
        )
        .context("building NewsAPI client")?;
        sources.push(NewsApiSource::new(
            client,
            SourceDescriptor {
                name: "newsapi".to_string(),
                source_id: NEWSAPI_SOURCE_ID,
            },
            config.newsapi_query.clone(),
            from,
        ));
    } else {
        tracing::warn!("NEWSAPI_KEY not set; NewsAPI source disabled");
    }

    Ok(sources)
}

fn log_report(phase: &str, report: &PhaseReport) {
    tracing::info!(
        phase,
        sources_fetched = report.sources_fetched,
        sources_failed = report.sources_failed,
        units_seen = report.units_seen,
        duplicates = report.duplicates,
        rejected = report.rejected,
        failed = report.failed,
        persisted = report.persisted,
        correlations = report.correlations,
        market_snapshots = report.market_snapshots,
        "phase complete"
    );
}
