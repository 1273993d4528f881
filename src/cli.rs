//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Search financial news across configured sources, deduplicated and
/// capped.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search query; space-separated terms, OR semantics.
    pub query: String,

    /// Path to a TOML config file (default: config/aggregator.toml,
    /// overridable via AGGREGATOR_CONFIG_PATH).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of records to return.
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Near-duplicate similarity threshold in [0, 1].
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Wall-clock bound in seconds for the whole aggregation call.
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Finance API access token.
    #[arg(long, env = "FINANCE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_and_overrides() {
        let cli = Cli::parse_from([
            "news-aggregator",
            "fed rates",
            "--max-results",
            "5",
            "--threshold",
            "0.7",
        ]);
        assert_eq!(cli.query, "fed rates");
        assert_eq!(cli.max_results, Some(5));
        assert_eq!(cli.threshold, Some(0.7));
        assert!(cli.deadline_secs.is_none());
    }

    #[test]
    fn query_alone_is_enough() {
        let cli = Cli::parse_from(["news-aggregator", "bitcoin"]);
        assert_eq!(cli.query, "bitcoin");
        assert!(cli.config.is_none());
    }
}
