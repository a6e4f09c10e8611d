//! Tavily search adapter.
//!
//! One POST per query against the Tavily search API, with a fixed result
//! window and recency lookback. Queries get a year-window suffix to bias
//! ranking toward current results.

use async_trait::async_trait;
use chrono::Datelike;
use serde::Serialize;
use tracing::debug;

use rivalscope_application::ports::search::{SearchClient, SearchError, SearchResponse};

const TAVILY_API_URL: &str = "https://api.tavily.com/search";
const SEARCH_DEPTH: &str = "advanced";
const MAX_RESULTS: u8 = 5;
const RECENCY_DAYS: u32 = 180;

/// Environment variable holding the Tavily credential.
pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: u8,
    days: u32,
}

/// Search client backed by the Tavily API.
pub struct TavilyClient {
    api_key: String,
    http: reqwest::Client,
    year_window: (i32, i32),
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let year = chrono::Utc::now().year();
        Self {
            api_key: api_key.into(),
            http: reqwest::Client::new(),
            year_window: (year, year + 1),
        }
    }

    /// Construct from `TAVILY_API_KEY`, failing fast when it is absent.
    pub fn from_env() -> Result<Self, SearchError> {
        let api_key = std::env::var(TAVILY_API_KEY_VAR)
            .map_err(|_| SearchError::MissingCredential(TAVILY_API_KEY_VAR))?;
        Ok(Self::new(api_key))
    }

    /// Override the recency year window (tests).
    pub fn with_year_window(mut self, from: i32, to: i32) -> Self {
        self.year_window = (from, to);
        self
    }
}

/// Append the recency qualifier that biases ranking toward fresh results.
fn enhanced_query(query: &str, (from, to): (i32, i32)) -> String {
    format!("{query} {from} {to}")
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let enhanced = enhanced_query(query, self.year_window);
        debug!(query = %enhanced, "tavily search");

        let response = self
            .http
            .post(TAVILY_API_URL)
            .json(&TavilyRequest {
                api_key: &self.api_key,
                query: &enhanced,
                search_depth: SEARCH_DEPTH,
                max_results: MAX_RESULTS,
                days: RECENCY_DAYS,
            })
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_qualifier_is_appended() {
        assert_eq!(
            enhanced_query("acme.com company", (2025, 2026)),
            "acme.com company 2025 2026"
        );
    }

    #[test]
    fn response_shape_deserializes() {
        let raw = r#"{
            "query": "acme.com company 2025 2026",
            "results": [
                {"title": "Acme", "url": "https://acme.com", "content": "Anvils.", "score": 0.93}
            ],
            "response_time": 1.2
        }"#;
        let response: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "Acme");
    }

    #[test]
    fn missing_credential_error_names_the_variable() {
        let err = SearchError::MissingCredential(TAVILY_API_KEY_VAR);
        assert_eq!(err.to_string(), "TAVILY_API_KEY is not set");
    }
}
