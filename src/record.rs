//! The news record flowing through the pipeline.

/// One candidate news item produced by a source adapter.
///
/// Records are immutable once constructed; the pipeline only filters and
/// reorders them. Producers must never construct a record with an empty
/// `title` (the title/source pair is the exact-duplicate identity key).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct NewsRecord {
    pub title: String,
    /// May equal `title` when the source carries no richer summary.
    pub summary: String,
    /// Empty string permitted; the finance API source carries no link.
    pub url: String,
    /// Fixed literal per adapter, e.g. `"finance_api"` or `"web_search"`.
    pub source: String,
    /// Free-form display string; `"unknown"` when unavailable. Never
    /// parsed as a structured timestamp by the core.
    pub publish_time: String,
    /// Query terms that passed this record through the relevance filter,
    /// in query order.
    pub matched_keywords: Vec<String>,
}

impl NewsRecord {
    /// Identity key for exact-duplicate reduction.
    pub fn identity_key(&self) -> (&str, &str) {
        (&self.title, &self.source)
    }

    /// Text compared during near-duplicate reduction. The separator is
    /// whitespace and vanishes during shingle normalization.
    pub fn comparison_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, source: &str) -> NewsRecord {
        NewsRecord {
            title: title.to_string(),
            summary: title.to_string(),
            url: String::new(),
            source: source.to_string(),
            publish_time: "unknown".to_string(),
            matched_keywords: vec![],
        }
    }

    #[test]
    fn identity_key_pairs_title_and_source() {
        let r = record("Fed holds rates", "finance_api");
        assert_eq!(r.identity_key(), ("Fed holds rates", "finance_api"));
    }

    #[test]
    fn comparison_text_joins_title_and_summary() {
        let mut r = record("Fed holds rates", "finance_api");
        r.summary = "No change this quarter".into();
        assert_eq!(r.comparison_text(), "Fed holds rates No change this quarter");
    }
}
