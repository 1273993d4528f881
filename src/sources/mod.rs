//! Source adapters: each turns parsed keyword terms into candidate
//! records from one origin, behind a uniform async contract.

pub mod finance_api;
pub mod web_search;

use crate::error::AdapterError;
use crate::record::NewsRecord;

/// One external news origin.
///
/// Adapters receive already-parsed keyword terms and return records that
/// have already passed the relevance filter, with per-record defensive
/// defaults applied (`"unknown"` publish time, summary falling back to
/// title). Each adapter owns its own timeout and converts it into a
/// `Transport` failure rather than hanging the orchestrator's join.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    async fn fetch(&self, keywords: &[String]) -> Result<Vec<NewsRecord>, AdapterError>;
    fn name(&self) -> &'static str;
}

/// Field hygiene for scraped/upstream text: decode HTML entities, strip
/// tags, collapse whitespace, trim. Applied by adapters before records
/// are constructed; the core pipeline never cleans fields itself.
pub fn clean_field(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    let stripped = re_tags.replace_all(&decoded, "");

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&stripped, " ").trim().to_string()
}
