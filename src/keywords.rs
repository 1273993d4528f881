//! Keyword relevance filter with OR semantics, plus the canonical
//! query-to-terms split shared by every call site.

/// Split a raw query string into keyword terms.
///
/// Terms are separated by single spaces; each is trimmed and empty terms
/// are dropped. All call sites (orchestrator, adapters, CLI) go through
/// this function so a query means the same thing everywhere.
pub fn parse_query(query: &str) -> Vec<String> {
    query
        .split(' ')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// True iff at least one keyword is a literal substring of `text`,
/// case-folded on both sides.
///
/// An empty keyword list matches everything; that vacuous truth is the
/// deliberate policy for an empty query, not an accident of iteration.
pub fn matches(text: &str, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let haystack = text.to_lowercase();
    keywords.iter().any(|k| {
        let needle = k.trim().to_lowercase();
        !needle.is_empty() && haystack.contains(&needle)
    })
}

/// The subset of `keywords` contained in `text`, in keyword order.
/// Adapters use this to fill `matched_keywords` on records they emit.
pub fn matched_terms(text: &str, keywords: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| {
            let needle = k.trim().to_lowercase();
            !needle.is_empty() && haystack.contains(&needle)
        })
        .map(|k| k.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_query_splits_and_drops_empties() {
        assert_eq!(parse_query("fed rates"), kw(&["fed", "rates"]));
        assert_eq!(parse_query("  fed   rates "), kw(&["fed", "rates"]));
        assert_eq!(parse_query(""), Vec::<String>::new());
        assert_eq!(parse_query("   "), Vec::<String>::new());
    }

    #[test]
    fn empty_keyword_list_matches_everything() {
        assert!(matches("anything at all", &[]));
        assert!(matches("", &[]));
    }

    #[test]
    fn or_semantics() {
        assert!(matches(
            "the Fed raised rates",
            &kw(&["Fed", "unrelated"])
        ));
        assert!(!matches("the Fed raised rates", &kw(&["bitcoin"])));
    }

    #[test]
    fn containment_is_case_folded_and_trimmed() {
        assert!(matches("BREAKING: fed decision", &kw(&["Fed"])));
        assert!(matches("the fed decision", &kw(&[" FED "])));
    }

    #[test]
    fn matched_terms_preserve_keyword_order() {
        let keywords = kw(&["rates", "fed", "oil"]);
        assert_eq!(
            matched_terms("the Fed raised rates", &keywords),
            kw(&["rates", "fed"])
        );
        assert!(matched_terms("nothing relevant", &keywords).is_empty());
    }
}
