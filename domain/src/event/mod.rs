//! Progress events emitted over the lifetime of a pipeline run.
//!
//! [`PipelineEvent`] is the single event currency of the system: stages and
//! the orchestrator produce them, an event sink carries them, and the
//! presentation layer frames them onto the wire. Events are transient and
//! ordered by emission; they are never persisted.
//!
//! # Wire shape
//!
//! ```json
//! {"type":"status","agent":"discovery","step":"Researching target","detail":"..."}
//! {"type":"deep-dive","agent":"deep-dive","step":"Deep dive complete","data":{...}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The component an event originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Agent {
    Orchestrator,
    Discovery,
    DeepDive,
    Report,
}

impl Agent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agent::Orchestrator => "orchestrator",
            Agent::Discovery => "discovery",
            Agent::DeepDive => "deep-dive",
            Agent::Report => "report",
        }
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event discriminator, serialized as the `type` field.
///
/// `Status` events narrate progress and may appear any number of times;
/// `Discovery` / `DeepDive` / `Report` are each stage's single terminal
/// event; `Done` and `Error` terminate the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Status,
    Discovery,
    DeepDive,
    Report,
    Error,
    Done,
}

impl EventKind {
    /// Returns true if this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::Done | EventKind::Error)
    }
}

/// One frame of pipeline narration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl PipelineEvent {
    /// Non-terminal progress narration.
    pub fn status(agent: Agent, step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Status,
            agent: Some(agent),
            step: Some(step.into()),
            detail: Some(detail.into()),
            data: None,
        }
    }

    /// Terminal failure frame; the run stops after this.
    pub fn error(agent: Agent, detail: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Error,
            agent: Some(agent),
            step: None,
            detail: Some(detail.into()),
            data: None,
        }
    }

    /// A stage's defining output event, carrying its full structured result.
    pub fn stage_complete(
        kind: EventKind,
        agent: Agent,
        step: impl Into<String>,
        detail: impl Into<String>,
        data: &impl Serialize,
    ) -> Self {
        Self {
            kind,
            agent: Some(agent),
            step: Some(step.into()),
            detail: Some(detail.into()),
            data: Some(serde_json::to_value(data).unwrap_or(Value::Null)),
        }
    }

    /// The terminal success frame with the whole-run aggregate.
    pub fn done(data: &impl Serialize) -> Self {
        Self {
            kind: EventKind::Done,
            agent: Some(Agent::Orchestrator),
            step: Some("Pipeline complete".to_string()),
            detail: None,
            data: Some(serde_json::to_value(data).unwrap_or(Value::Null)),
        }
    }

    /// Returns true if this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}
