//! Helpers shared by the stage runners.

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use rivalscope_domain::{Agent, extract_payload};
use serde::de::DeserializeOwned;

use crate::ports::completion::CompletionError;
use crate::ports::search::SearchError;

/// Separator between snippet sections in the concatenated search context.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Errors that abort a stage (and therefore the run).
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The model's reply was not the JSON shape this stage expects.
    /// `snippet` holds the bounded head of the raw reply.
    #[error("{agent} agent returned invalid JSON: {snippet}")]
    MalformedOutput { agent: Agent, snippet: String },

    /// The consumer aborted the run.
    #[error("analysis cancelled")]
    Cancelled,
}

/// Check whether cancellation has been requested.
///
/// Stages call this before every suspension point so in-flight work stops
/// at the next boundary once the consumer goes away.
pub(crate) fn check_cancelled(cancel: &Option<CancellationToken>) -> Result<(), StageError> {
    if let Some(token) = cancel
        && token.is_cancelled()
    {
        return Err(StageError::Cancelled);
    }
    Ok(())
}

/// Extract a stage's typed payload from raw model text, attributing a
/// failure to the stage's agent.
pub(crate) fn parse_stage_payload<T: DeserializeOwned>(
    agent: Agent,
    raw: &str,
) -> Result<T, StageError> {
    extract_payload(raw).map_err(|e| StageError::MalformedOutput {
        agent,
        snippet: e.snippet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_token_is_not_cancelled() {
        assert!(check_cancelled(&None).is_ok());
    }

    #[test]
    fn fired_token_cancels() {
        let token = CancellationToken::new();
        token.cancel();
        let err = check_cancelled(&Some(token)).unwrap_err();
        assert!(matches!(err, StageError::Cancelled));
    }

    #[test]
    fn malformed_output_names_the_agent() {
        let err = parse_stage_payload::<rivalscope_domain::DeepDiveResult>(
            Agent::DeepDive,
            "not json",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "deep-dive agent returned invalid JSON: not json"
        );
    }
}
