//! Aggregation orchestrator: concurrent fan-out over all configured
//! sources, per-source failure isolation, stable concatenation order,
//! exact-duplicate reduction, then truncation to the result cap.

use futures::future::join_all;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::AggregatorConfig;
use crate::dedup::reduce_by_identity;
use crate::error::{AdapterError, PipelineError};
use crate::keywords::parse_query;
use crate::record::NewsRecord;
use crate::sources::SourceAdapter;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "aggregate_records_total",
            "Records returned by aggregation calls."
        );
        describe_counter!(
            "aggregate_source_failures_total",
            "Source fetches that ended in a failure outcome."
        );
        describe_counter!(
            "aggregate_duplicates_removed_total",
            "Records dropped by exact-duplicate reduction."
        );
    });
}

/// How one source's fetch settled within an aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum SourceStatus {
    Fetched { count: usize },
    /// The source reported itself unavailable (missing credential);
    /// contributed nothing, by design.
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SourceOutcome {
    pub source: String,
    pub status: SourceStatus,
}

/// Result of one aggregation call. A presentation layer can reproduce
/// its report purely from the query and `records`; `sources` and
/// `duplicates_removed` are diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Aggregation {
    pub records: Vec<NewsRecord>,
    pub sources: Vec<SourceOutcome>,
    pub duplicates_removed: usize,
}

/// The orchestrator. Construction validates configuration; a built
/// aggregator's `aggregate` never fails outward — an all-sources-failed
/// call yields an empty record list, because failing to find news is
/// not itself a pipeline failure.
pub struct Aggregator {
    max_results: usize,
    deadline: Option<Duration>,
}

impl Aggregator {
    pub fn new(config: &AggregatorConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            max_results: config.max_results,
            deadline: config.deadline_secs.map(Duration::from_secs),
        })
    }

    /// Run one aggregation: parse the query, fan out to every source
    /// concurrently, settle all outcomes, concatenate survivors in
    /// configured source order, dedup by identity, truncate.
    ///
    /// No state survives between calls; each call re-parses the query
    /// fresh. Sources are never cancelled early — the only blocking
    /// point is the join over all of them (bounded per branch when a
    /// deadline is configured).
    pub async fn aggregate(
        &self,
        query: &str,
        sources: &[Box<dyn SourceAdapter>],
    ) -> Aggregation {
        ensure_metrics_described();

        let keywords = parse_query(query);
        info!(query, terms = keywords.len(), sources = sources.len(), "aggregation started");

        let fetches = sources.iter().map(|source| {
            let keywords = &keywords;
            let deadline = self.deadline;
            async move {
                let result = match deadline {
                    Some(limit) => match tokio::time::timeout(limit, source.fetch(keywords)).await
                    {
                        Ok(result) => result,
                        Err(_) => Err(AdapterError::Transport(format!(
                            "aggregation deadline of {}s elapsed",
                            limit.as_secs()
                        ))),
                    },
                    None => source.fetch(keywords).await,
                };
                (source.name(), result)
            }
        });

        let settled = join_all(fetches).await;

        // The accumulator is written only after every source settled;
        // concatenation order is configured source order, not
        // completion order.
        let mut accumulator: Vec<NewsRecord> = Vec::new();
        let mut outcomes: Vec<SourceOutcome> = Vec::with_capacity(settled.len());
        for (name, result) in settled {
            let status = match result {
                Ok(records) => {
                    let count = records.len();
                    accumulator.extend(records);
                    SourceStatus::Fetched { count }
                }
                Err(AdapterError::Unavailable(reason)) => {
                    info!(source = name, reason = %reason, "source skipped");
                    SourceStatus::Skipped { reason }
                }
                Err(err) => {
                    warn!(source = name, error = %err, "source fetch failed");
                    counter!("aggregate_source_failures_total").increment(1);
                    SourceStatus::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            outcomes.push(SourceOutcome {
                source: name.to_string(),
                status,
            });
        }

        let before = accumulator.len();
        let mut records = reduce_by_identity(accumulator);
        let duplicates_removed = before - records.len();
        // Cap after dedup so duplicates never crowd out unique later
        // entries within the cap.
        records.truncate(self.max_results);

        counter!("aggregate_records_total").increment(records.len() as u64);
        counter!("aggregate_duplicates_removed_total").increment(duplicates_removed as u64);
        info!(
            returned = records.len(),
            duplicates_removed, "aggregation completed"
        );

        Aggregation {
            records,
            sources: outcomes,
            duplicates_removed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = AggregatorConfig::default();
        config.max_results = 0;
        assert!(matches!(
            Aggregator::new(&config),
            Err(PipelineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn new_accepts_defaults() {
        assert!(Aggregator::new(&AggregatorConfig::default()).is_ok());
    }
}
