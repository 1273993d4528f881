//! Jaccard similarity over shingle sets, with a validated threshold.

use crate::error::PipelineError;
use crate::shingle::{shingles, ShingleSet};

/// Default near-duplicate threshold.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Jaccard coefficient |A∩B| / |A∪B|.
///
/// Two empty sets are identical, not incomparable, so the coefficient is
/// 1.0; exactly one empty set yields 0.0.
pub fn jaccard(a: &ShingleSet, b: &ShingleSet) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Threshold-based near-duplicate comparator.
///
/// The threshold is validated once at construction; `is_match` is then
/// total and symmetric.
#[derive(Debug, Clone, Copy)]
pub struct ContentSimilarity {
    threshold: f64,
}

impl ContentSimilarity {
    /// Fails with `InvalidConfiguration` for thresholds outside
    /// [0.0, 1.0]; misconfiguration is loud, never clamped.
    pub fn new(threshold: f64) -> Result<Self, PipelineError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PipelineError::InvalidConfiguration(format!(
                "similarity threshold {threshold} outside [0, 1]"
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// True iff the Jaccard coefficient of the two texts' shingle sets
    /// meets the threshold (inclusive).
    pub fn is_match(&self, a: &str, b: &str) -> bool {
        self.sets_match(&shingles(a), &shingles(b))
    }

    /// Same comparison over precomputed shingle sets, so callers doing a
    /// reduction pass can cache sets per representative.
    pub fn sets_match(&self, a: &ShingleSet, b: &ShingleSet) -> bool {
        jaccard(a, b) >= self.threshold
    }
}

impl Default for ContentSimilarity {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}
