//! Character-bigram shingle model over normalized text.
//!
//! Normalization strips markup tags, drops all whitespace (including
//! full-width space), and case-folds, so that cosmetic differences never
//! affect similarity.

use std::collections::HashSet;

/// Set of fixed-length character n-grams derived from one text.
pub type ShingleSet = HashSet<String>;

/// Normalize text for shingling: strip `<...>` tags, remove whitespace,
/// lowercase.
pub fn normalize(text: &str) -> String {
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    re_tags
        .replace_all(text, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Produce the 2-character shingle set of `text`.
///
/// Total over any input: normalized text shorter than two characters
/// yields the singleton set of the whole string, or the empty set when
/// the normalized text is empty.
pub fn shingles(text: &str) -> ShingleSet {
    let normalized = normalize(text);
    let chars: Vec<char> = normalized.chars().collect();
    match chars.len() {
        0 => HashSet::new(),
        1 => {
            let mut set = HashSet::with_capacity(1);
            set.insert(normalized);
            set
        }
        _ => chars.windows(2).map(|w| w.iter().collect()).collect(),
    }
}
