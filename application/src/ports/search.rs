//! Web search port.
//!
//! One call, one query, ranked text snippets back. The port has no retry and
//! no fallback: the caller decides whether a failed search aborts its stage
//! (in this pipeline, it always does).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a web search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The required provider credential is missing. Fatal to the run.
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    /// The provider returned a non-success status.
    #[error("search failed: {status} {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("search request failed: {0}")]
    Request(String),
}

/// One ranked search result snippet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
    pub score: f64,
}

/// Response to a single search query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub query: String,
}

impl SearchResponse {
    /// Format all hits as a `- {title}: {content}` snippet block, the shape
    /// the stage runners feed into the model's user message.
    pub fn snippet_block(&self) -> String {
        self.results
            .iter()
            .map(|hit| format!("- {}: {}", hit.title, hit.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Issues a single external web-search query.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_block_formats_one_line_per_hit() {
        let response = SearchResponse {
            query: "acme.com company".to_string(),
            results: vec![
                SearchHit {
                    title: "Acme Inc".to_string(),
                    url: "https://acme.com".to_string(),
                    content: "Acme sells anvils.".to_string(),
                    score: 0.97,
                },
                SearchHit {
                    title: "Acme raises $10M".to_string(),
                    url: "https://news.example".to_string(),
                    content: "Series A led by Example Ventures.".to_string(),
                    score: 0.81,
                },
            ],
        };

        assert_eq!(
            response.snippet_block(),
            "- Acme Inc: Acme sells anvils.\n- Acme raises $10M: Series A led by Example Ventures."
        );
    }

    #[test]
    fn snippet_block_is_empty_for_no_hits() {
        let response = SearchResponse {
            query: "nothing".to_string(),
            results: vec![],
        };
        assert_eq!(response.snippet_block(), "");
    }
}
