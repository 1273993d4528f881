//! Structured finance-news API adapter (Tushare-style wire protocol).
//!
//! The upstream endpoint takes a JSON POST naming an API, a token, and a
//! field list, and answers with positional row arrays zipped against a
//! `fields` header. The endpoint has no keyword search, so relevance
//! filtering happens client-side.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::AdapterError;
use crate::keywords;
use crate::record::NewsRecord;
use crate::sources::{clean_field, SourceAdapter};

pub const SOURCE_NAME: &str = "finance_api";

const DEFAULT_ENDPOINT: &str = "https://api.waditu.com";
const DEFAULT_CHANNEL: &str = "sina";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_ITEMS: usize = 20;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FinanceApiConfig {
    pub endpoint: String,
    /// Access credential; `None` makes the adapter report itself
    /// unavailable instead of attempting a request.
    pub token: Option<String>,
    /// Upstream news channel, passed through as the `src` parameter.
    pub channel: String,
    pub timeout_secs: u64,
    pub max_items: usize,
}

impl Default for FinanceApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            channel: DEFAULT_CHANNEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

pub struct FinanceApiAdapter {
    config: FinanceApiConfig,
    client: reqwest::Client,
}

impl FinanceApiAdapter {
    pub fn new(config: FinanceApiConfig) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdapterError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl SourceAdapter for FinanceApiAdapter {
    async fn fetch(&self, keywords: &[String]) -> Result<Vec<NewsRecord>, AdapterError> {
        let token = match self.config.token.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                return Err(AdapterError::Unavailable(
                    "finance API token not configured (FINANCE_API_TOKEN)".into(),
                ))
            }
        };

        let request = serde_json::json!({
            "api_name": "news",
            "token": token,
            "params": { "src": self.config.channel },
            "fields": "datetime,title,content",
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AdapterError::Transport(format!("finance API request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AdapterError::Transport(format!("finance API HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| AdapterError::Transport(format!("finance API body read failed: {e}")))?;

        parse_news_payload(&body, keywords, self.config.max_items)
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<ApiData>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    fields: Vec<String>,
    items: Vec<Vec<serde_json::Value>>,
}

/// Decode a finance API response body into relevance-filtered records.
///
/// Separate from the HTTP path so it can be tested against fixture
/// payloads. A row with an empty title is skipped singly and never
/// aborts the batch.
pub fn parse_news_payload(
    body: &str,
    keywords: &[String],
    max_items: usize,
) -> Result<Vec<NewsRecord>, AdapterError> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| AdapterError::MalformedPayload(format!("undecodable finance API JSON: {e}")))?;

    if response.code != 0 {
        return Err(AdapterError::Transport(format!(
            "finance API error code {}: {}",
            response.code,
            response.msg.as_deref().unwrap_or("no message")
        )));
    }

    let data = match response.data {
        Some(d) => d,
        None => return Ok(Vec::new()),
    };

    let idx = |name: &str| data.fields.iter().position(|f| f == name);
    let title_idx = idx("title").ok_or_else(|| {
        AdapterError::MalformedPayload("finance API payload missing `title` field".into())
    })?;
    let content_idx = idx("content");
    let datetime_idx = idx("datetime");

    let cell = |row: &[serde_json::Value], i: Option<usize>| -> String {
        i.and_then(|i| row.get(i))
            .and_then(|v| v.as_str())
            .map(clean_field)
            .unwrap_or_default()
    };

    let mut records = Vec::new();
    for row in &data.items {
        let title = cell(row, Some(title_idx));
        if title.is_empty() {
            debug!(source = SOURCE_NAME, "skipping row with empty title");
            continue;
        }

        let content = cell(row, content_idx);
        let summary = if content.is_empty() { title.clone() } else { content };

        let haystack = format!("{title} {summary}");
        if !keywords::matches(&haystack, keywords) {
            continue;
        }

        let datetime = cell(row, datetime_idx);
        records.push(NewsRecord {
            title,
            summary,
            url: String::new(),
            source: SOURCE_NAME.to_string(),
            publish_time: if datetime.is_empty() {
                "unknown".to_string()
            } else {
                datetime
            },
            matched_keywords: keywords::matched_terms(&haystack, keywords),
        });

        if records.len() >= max_items {
            break;
        }
    }

    debug!(source = SOURCE_NAME, count = records.len(), "finance API rows parsed");
    Ok(records)
}
