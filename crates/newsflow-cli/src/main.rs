use clap::{Parser, Subcommand};

mod adapters;
mod run;

#[derive(Debug, Parser)]
#[command(name = "newsflow")]
#[command(about = "News ingestion, sentiment analysis, and market correlation pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch sources and persist matched raw records.
    Capture {
        /// Only consider articles published on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,
    },
    /// Fetch sources, score matched units, and correlate against market data.
    Analyze {
        /// Only consider articles published on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,
    },
    /// Run the capture phase followed by the analysis phase.
    Run {
        /// Only consider articles published on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = newsflow_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    let (phase, from) = match cli.command {
        Commands::Capture { from } => (run::Phase::Capture, from),
        Commands::Analyze { from } => (run::Phase::Analyze, from),
        Commands::Run { from } => (run::Phase::Both, from),
    };

    run::execute(phase, from, &config).await
}

fn init_tracing(log_level: &str) {
    // RUST_LOG wins over the configured default when both are set.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
