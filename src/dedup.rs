//! Duplicate reduction passes: exact (identity key) and near (content
//! similarity). Both are order-preserving with first-occurrence-wins.

use std::collections::HashSet;

use crate::record::NewsRecord;
use crate::shingle::{shingles, ShingleSet};
use crate::similarity::ContentSimilarity;

/// Drop records whose (title, source) identity key was already seen.
///
/// Single left-to-right pass, O(n) time and space. Same title from a
/// different source survives.
pub fn reduce_by_identity(records: Vec<NewsRecord>) -> Vec<NewsRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());
    for rec in records {
        if seen.insert((rec.title.clone(), rec.source.clone())) {
            kept.push(rec);
        }
    }
    kept
}

/// Reduce a record sequence to representatives, no two of which are
/// near-duplicates under `similarity`.
///
/// Each input record is compared against every representative kept so
/// far; a match discards it, otherwise it becomes a new representative.
/// O(n²) pairwise passes are fine at per-call sizes of tens to low
/// hundreds of records. The discarded record's fields are dropped, not
/// merged into the representative.
pub fn reduce_by_content(
    records: Vec<NewsRecord>,
    similarity: &ContentSimilarity,
) -> Vec<NewsRecord> {
    let mut kept: Vec<NewsRecord> = Vec::with_capacity(records.len());
    // Representatives cache their shingle sets for the length of the pass.
    let mut kept_shingles: Vec<ShingleSet> = Vec::with_capacity(records.len());

    for rec in records {
        let sh = shingles(&rec.comparison_text());
        if kept_shingles.iter().any(|rep| similarity.sets_match(rep, &sh)) {
            continue;
        }
        kept.push(rec);
        kept_shingles.push(sh);
    }
    kept
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
    fn identity_keeps_first_and_distinguishes_sources() {
        let input = vec![record("X", "S1"), record("X", "S1"), record("X", "S2")];
        let out = reduce_by_identity(input);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].identity_key(), ("X", "S1"));
        assert_eq!(out[1].identity_key(), ("X", "S2"));
    }

    #[test]
    fn identity_is_idempotent() {
        let input = vec![
            record("A", "S1"),
            record("B", "S1"),
            record("A", "S1"),
            record("A", "S2"),
        ];
        let once = reduce_by_identity(input);
        let twice = reduce_by_identity(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn identity_preserves_order() {
        let input = vec![record("C", "S"), record("A", "S"), record("B", "S")];
        let out = reduce_by_identity(input);
        let titles: Vec<&str> = out.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn content_never_lengthens_and_keeps_dissimilar_intact() {
        let sim = ContentSimilarity::new(0.8).unwrap();
        let input = vec![
            record("Fed holds rates steady", "S"),
            record("Bitcoin climbs past new high", "S"),
            record("Oil futures slide on supply news", "S"),
        ];
        let out = reduce_by_content(input.clone(), &sim);
        assert!(out.len() <= input.len());
        // All pairwise similarities below threshold: nothing is dropped.
        assert_eq!(out, input);
    }

    #[test]
    fn content_first_occurrence_wins_no_merging() {
        let sim = ContentSimilarity::new(0.8).unwrap();
        let mut near = record("Fed holds rates steady.", "S2");
        near.url = "https://example.com/later".into();
        let first = record("Fed holds rates steady", "S1");
        let out = reduce_by_content(vec![first.clone(), near], &sim);
        assert_eq!(out.len(), 1);
        // The kept representative is the first record, untouched.
        assert_eq!(out[0], first);
        assert!(out[0].url.is_empty());
    }

    #[test]
    fn content_threshold_zero_collapses_everything() {
        let sim = ContentSimilarity::new(0.0).unwrap();
        let input = vec![record("alpha", "S"), record("omega", "S")];
        let out = reduce_by_content(input, &sim);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "alpha");
    }

    #[test]
    fn content_compares_against_all_representatives() {
        let sim = ContentSimilarity::new(0.8).unwrap();
        // Third record is near-duplicate of the FIRST representative,
        // not the second.
        let input = vec![
            record("Bitcoin breaks one hundred thousand", "S"),
            record("Oil futures slide on supply news", "S"),
            record("Bitcoin breaks one hundred thousand!", "S"),
        ];
        let out = reduce_by_content(input, &sim);
        assert_eq!(out.len(), 2);
    }
}
