//! News Aggregator — Binary Entrypoint
//! Parses CLI arguments, loads configuration, wires up the source
//! adapters, runs one aggregation, and prints the text report.

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_aggregator::aggregate::{Aggregator, SourceStatus};
use news_aggregator::cli::Cli;
use news_aggregator::config;
use news_aggregator::report;
use news_aggregator::similarity::ContentSimilarity;
use news_aggregator::sources::finance_api::FinanceApiAdapter;
use news_aggregator::sources::web_search::WebSearchAdapter;
use news_aggregator::sources::SourceAdapter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_default()?,
    };
    if let Some(max_results) = cli.max_results {
        config.max_results = max_results;
    }
    if let Some(threshold) = cli.threshold {
        config.similarity_threshold = threshold;
    }
    if let Some(deadline) = cli.deadline_secs {
        config.deadline_secs = Some(deadline);
    }
    if let Some(token) = cli.token.clone() {
        config.finance_api.token = Some(token);
    }

    // Invalid configuration is the one loud failure path; everything
    // past this point degrades per source instead of aborting.
    let aggregator = Aggregator::new(&config).context("invalid aggregator configuration")?;
    let similarity = ContentSimilarity::new(config.similarity_threshold)
        .context("invalid similarity threshold")?;

    let sources: Vec<Box<dyn SourceAdapter>> = vec![
        Box::new(
            FinanceApiAdapter::new(config.finance_api.clone())
                .context("building finance API adapter")?,
        ),
        Box::new(
            WebSearchAdapter::new(config.web_search.clone(), similarity)
                .context("building web search adapter")?,
        ),
    ];

    let aggregation = aggregator.aggregate(&cli.query, &sources).await;

    for outcome in &aggregation.sources {
        match &outcome.status {
            SourceStatus::Fetched { count } => {
                info!(source = %outcome.source, count = *count, "source contributed");
            }
            SourceStatus::Skipped { reason } => {
                info!(source = %outcome.source, reason = %reason, "source skipped");
            }
            SourceStatus::Failed { reason } => {
                warn!(source = %outcome.source, reason = %reason, "source failed");
            }
        }
    }

    print!("{}", report::render(&cli.query, &aggregation.records));
    Ok(())
}
