//! HTML news-search scrape adapter.
//!
//! Issues a single GET against a news search endpoint with browser-like
//! headers and a rotated User-Agent, extracts result cards via CSS
//! selectors, relevance-filters them, and collapses near-duplicate
//! cards before returning. No retries; the one request either lands or
//! becomes a `Transport` outcome.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::dedup::reduce_by_content;
use crate::error::AdapterError;
use crate::keywords;
use crate::record::NewsRecord;
use crate::similarity::ContentSimilarity;
use crate::sources::{clean_field, SourceAdapter};

pub const SOURCE_NAME: &str = "web_search";

const DEFAULT_ENDPOINT: &str = "https://www.bing.com/news/search";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_ITEMS: usize = 15;

/// Realistic browser User-Agent strings, rotated per client build.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WebSearchConfig {
    pub endpoint: String,
    /// Overrides the built-in rotation list when set.
    pub user_agent: Option<String>,
    pub timeout_secs: u64,
    pub max_items: usize,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

pub struct WebSearchAdapter {
    config: WebSearchConfig,
    similarity: ContentSimilarity,
    client: reqwest::Client,
}

impl WebSearchAdapter {
    pub fn new(
        config: WebSearchConfig,
        similarity: ContentSimilarity,
    ) -> Result<Self, AdapterError> {
        let ua = match config.user_agent {
            Some(ref custom) => custom.clone(),
            None => random_user_agent().to_owned(),
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(ua)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| AdapterError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            similarity,
            client,
        })
    }
}

#[async_trait]
impl SourceAdapter for WebSearchAdapter {
    async fn fetch(&self, keywords: &[String]) -> Result<Vec<NewsRecord>, AdapterError> {
        let query = keywords.join(" ");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("q", query.as_str())])
            .header("Accept-Language", "en-US,en;q=0.9,zh-CN;q=0.8")
            .send()
            .await
            .map_err(|e| AdapterError::Transport(format!("web search request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AdapterError::Transport(format!("web search HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| AdapterError::Transport(format!("web search body read failed: {e}")))?;

        let candidates = parse_search_html(&html, &self.config.endpoint, keywords)?;
        let mut reduced = reduce_by_content(candidates, &self.similarity);
        reduced.truncate(self.config.max_items);
        Ok(reduced)
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}

fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
}

/// Resolve a card's href to an absolute URL, joining relative hrefs
/// against the search endpoint.
fn absolutize(endpoint: &str, href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(u) => Some(u.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(endpoint)
            .ok()?
            .join(href)
            .ok()
            .map(|u| u.to_string()),
        Err(_) => None,
    }
}

/// Extract relevance-filtered records from a search results page.
///
/// Separate from the HTTP path for testability with fixture HTML. Cards
/// missing a title or an href are skipped singly; an unparsable page is
/// simply a page with zero cards, since the HTML parser is lenient.
pub fn parse_search_html(
    html: &str,
    endpoint: &str,
    keywords: &[String],
) -> Result<Vec<NewsRecord>, AdapterError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse("div.news-card")
        .map_err(|e| AdapterError::MalformedPayload(format!("invalid card selector: {e:?}")))?;
    let title_sel = Selector::parse("a.title")
        .map_err(|e| AdapterError::MalformedPayload(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".snippet")
        .map_err(|e| AdapterError::MalformedPayload(format!("invalid snippet selector: {e:?}")))?;
    let time_sel = Selector::parse(".time")
        .map_err(|e| AdapterError::MalformedPayload(format!("invalid time selector: {e:?}")))?;

    let mut records = Vec::new();
    for card in document.select(&card_sel) {
        let title_el = match card.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };

        let title = clean_field(&title_el.text().collect::<String>());
        if title.is_empty() {
            debug!(source = SOURCE_NAME, "skipping card with empty title");
            continue;
        }

        let href = match title_el.value().attr("href") {
            Some(h) if !h.trim().is_empty() => h.trim(),
            _ => {
                debug!(source = SOURCE_NAME, title = %title, "skipping card without href");
                continue;
            }
        };
        let url = match absolutize(endpoint, href) {
            Some(u) => u,
            None => {
                debug!(source = SOURCE_NAME, title = %title, href, "skipping card with bad href");
                continue;
            }
        };

        let snippet = card
            .select(&snippet_sel)
            .next()
            .map(|el| clean_field(&el.text().collect::<String>()))
            .unwrap_or_default();
        let summary = if snippet.is_empty() { title.clone() } else { snippet };

        let haystack = format!("{title} {summary}");
        if !keywords::matches(&haystack, keywords) {
            continue;
        }

        let publish_time = card
            .select(&time_sel)
            .next()
            .map(|el| clean_field(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        records.push(NewsRecord {
            title,
            summary,
            url,
            source: SOURCE_NAME.to_string(),
            publish_time,
            matched_keywords: keywords::matched_terms(&haystack, keywords),
        });
    }

    debug!(source = SOURCE_NAME, count = records.len(), "search cards parsed");
    Ok(records)
}
