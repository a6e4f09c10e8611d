//! Anthropic Messages API adapter.
//!
//! One blocking request per completion: system prompt plus a single user
//! message, first text content block back. The client is constructed once at
//! the composition root and injected wherever a [`ModelClient`] is needed;
//! no hidden process-wide singleton.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use rivalscope_application::ports::completion::{
    CompletionError, CompletionRequest, ModelClient,
};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Environment variable holding the Anthropic credential.
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Only the first content block counts, and only when it is text. A reply
/// that opens with anything else yields an empty string, which the stage
/// runners then treat as a parse failure rather than a crash.
fn first_text_block(response: &MessagesResponse) -> String {
    response
        .content
        .first()
        .filter(|block| block.kind == "text")
        .and_then(|block| block.text.clone())
        .unwrap_or_default()
}

/// Completion client backed by the Anthropic Messages API.
pub struct AnthropicClient {
    api_key: String,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Construct from `ANTHROPIC_API_KEY`, failing fast when it is absent.
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = std::env::var(ANTHROPIC_API_KEY_VAR)
            .map_err(|_| CompletionError::MissingCredential(ANTHROPIC_API_KEY_VAR))?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        debug!(model = %request.model, max_tokens = request.max_tokens, "completion request");

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&MessagesRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                system: &request.system,
                messages: [Message {
                    role: "user",
                    content: &request.user,
                }],
            })
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;
        Ok(first_text_block(&parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_block_extracts_text() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "{\"a\": 1}"}], "stop_reason": "end_turn"}"#,
        )
        .unwrap();
        assert_eq!(first_text_block(&response), "{\"a\": 1}");
    }

    #[test]
    fn non_text_first_block_yields_empty_string() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content": [{"type": "tool_use", "id": "t1", "name": "x", "input": {}}]}"#,
        )
        .unwrap();
        assert_eq!(first_text_block(&response), "");
    }

    #[test]
    fn empty_content_yields_empty_string() {
        let response: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert_eq!(first_text_block(&response), "");
    }

    #[test]
    fn request_body_shape() {
        let body = MessagesRequest {
            model: "claude-sonnet-4-5",
            max_tokens: 4096,
            system: "be terse",
            messages: [Message {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-sonnet-4-5");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }
}
