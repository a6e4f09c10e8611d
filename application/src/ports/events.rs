//! Event sink port.
//!
//! Stages and the orchestrator narrate progress by emitting
//! [`PipelineEvent`]s into a sink. Emission is a suspension point: a sink
//! backed by a bounded channel makes a slow consumer delay the producer
//! (flow-controlled streaming) instead of triggering any buffering or
//! dropping policy here.

use async_trait::async_trait;
use rivalscope_domain::PipelineEvent;

/// Receives pipeline events in emission order.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: PipelineEvent);
}

/// Sink that discards every event, for callers that only want the result.
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn emit(&self, _event: PipelineEvent) {}
}
