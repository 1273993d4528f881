//! Fixture-driven tests for the web search HTML extractor, plus the
//! near-duplicate pass the adapter applies to its own candidates.

use news_aggregator::dedup::reduce_by_content;
use news_aggregator::similarity::ContentSimilarity;
use news_aggregator::sources::web_search::{parse_search_html, SOURCE_NAME};

const FIXTURE: &str = include_str!("fixtures/web_search_results.html");
const ENDPOINT: &str = "https://news.example.com/search";

fn kw(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|s| s.to_string()).collect()
}

#[test]
fn fixture_extracts_well_formed_cards_only() {
    let out = parse_search_html(FIXTURE, ENDPOINT, &[]).unwrap();
    // Seven cards: one without href, one with an empty title after
    // cleanup, both skipped singly.
    assert_eq!(out.len(), 5);
    for r in &out {
        assert!(!r.title.is_empty());
        assert!(!r.url.is_empty());
        assert_eq!(r.source, SOURCE_NAME);
    }
}

#[test]
fn fixture_snippetless_card_falls_back_to_title() {
    let out = parse_search_html(FIXTURE, ENDPOINT, &[]).unwrap();
    let oil = out
        .iter()
        .find(|r| r.title.starts_with("Oil futures"))
        .unwrap();
    assert_eq!(oil.summary, oil.title);
    assert_eq!(oil.publish_time, "5 hours ago");
}

#[test]
fn fixture_keyword_filter_gates_cards() {
    let out = parse_search_html(FIXTURE, ENDPOINT, &kw(&["bitcoin"])).unwrap();
    assert_eq!(out.len(), 1);
    assert!(out[0].title.starts_with("Bitcoin tops"));
    assert_eq!(out[0].matched_keywords, kw(&["bitcoin"]));
}

#[test]
fn near_duplicate_cards_collapse_to_first_seen() {
    let out = parse_search_html(FIXTURE, ENDPOINT, &[]).unwrap();
    let sim = ContentSimilarity::new(0.8).unwrap();
    let reduced = reduce_by_content(out, &sim);
    // The two Fed cards differ only in trailing punctuation and one
    // word; the first one is the surviving representative.
    assert_eq!(reduced.len(), 4);
    assert_eq!(reduced[0].url, "https://news.example.com/fed-holds");
    assert!(reduced.iter().any(|r| r.title.starts_with("Bitcoin")));
    assert!(reduced.iter().any(|r| r.title.starts_with("Oil")));
}

#[test]
fn fixture_relative_href_is_joined_against_endpoint() {
    let out = parse_search_html(FIXTURE, ENDPOINT, &[]).unwrap();
    let dollar = out
        .iter()
        .find(|r| r.title.starts_with("Dollar index"))
        .unwrap();
    assert_eq!(dollar.url, "https://news.example.com/click?id=42");
}

#[test]
fn empty_page_parses_to_nothing() {
    let out = parse_search_html("<html><body><p>nothing here</p></body></html>", ENDPOINT, &[]).unwrap();
    assert!(out.is_empty());
}
