//! LLM completion port.
//!
//! A single blocking request/response against a completion model: system
//! prompt plus one user message in, raw text out. No streaming, no timeout,
//! no retry at this layer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion request.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The required provider credential is missing. Fatal to the run.
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    /// The provider returned a non-success status.
    #[error("completion failed: {status} {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response.
    #[error("completion request failed: {0}")]
    Request(String),
}

/// One completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub user: String,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        max_tokens: u32,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Issues a single completion request to an LLM.
///
/// Implementations return only the first text content block of the reply.
/// A reply with no text block yields an empty string, not an error; the
/// caller treats empty/unparseable output as a stage failure.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
