// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod keywords;
pub mod record;
pub mod report;
pub mod shingle;
pub mod similarity;
pub mod sources;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{Aggregation, Aggregator, SourceOutcome, SourceStatus};
pub use crate::config::AggregatorConfig;
pub use crate::error::{AdapterError, PipelineError};
pub use crate::record::NewsRecord;
pub use crate::similarity::ContentSimilarity;
pub use crate::sources::SourceAdapter;
