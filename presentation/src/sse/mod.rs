//! SSE wire framing and transport sinks.
//!
//! The wire format is `text/event-stream`: one `data: <JSON event>\n\n`
//! frame per event, in emission order. This module is the only place the
//! internal event type meets that framing.

use async_trait::async_trait;
use tokio::sync::mpsc;

use rivalscope_application::ports::events::EventSink;
use rivalscope_domain::PipelineEvent;

/// Encode one event as an SSE frame.
pub fn encode_frame(event: &PipelineEvent) -> String {
    let json = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    format!("data: {json}\n\n")
}

/// Sink that forwards events into a bounded channel.
///
/// This is the bridge for streaming transports (an HTTP handler holds the
/// receiving end and writes frames as they arrive). The channel being
/// bounded is what gives flow-controlled streaming: a slow consumer delays
/// the producer instead of growing a buffer. A dropped receiver is treated
/// as a departed consumer, not an error.
pub struct ChannelSink {
    tx: mpsc::Sender<PipelineEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<PipelineEvent>) -> Self {
        Self { tx }
    }

    /// Convenience constructor for sink plus receiver.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<PipelineEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn emit(&self, event: PipelineEvent) {
        let _ = self.tx.send(event).await;
    }
}

/// Sink that writes SSE frames straight to stdout (the CLI's `--raw` mode).
pub struct SseStdoutSink;

#[async_trait]
impl EventSink for SseStdoutSink {
    async fn emit(&self, event: PipelineEvent) {
        use std::io::Write;
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(encode_frame(&event).as_bytes());
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivalscope_domain::{Agent, EventKind};

    #[test]
    fn frame_is_data_prefixed_and_double_newline_terminated() {
        let event = PipelineEvent::status(Agent::Orchestrator, "Pipeline started", "Analyzing acme.com");
        let frame = encode_frame(&event);

        assert!(frame.starts_with("data: {"));
        assert!(frame.ends_with("\n\n"));

        let json: serde_json::Value =
            serde_json::from_str(frame.strip_prefix("data: ").unwrap().trim_end()).unwrap();
        assert_eq!(json["type"], "status");
        assert_eq!(json["agent"], "orchestrator");
    }

    #[tokio::test]
    async fn channel_sink_preserves_emission_order() {
        let (sink, mut rx) = ChannelSink::channel(16);

        sink.emit(PipelineEvent::status(Agent::Discovery, "a", "1")).await;
        sink.emit(PipelineEvent::status(Agent::DeepDive, "b", "2")).await;
        sink.emit(PipelineEvent::error(Agent::Orchestrator, "boom")).await;
        drop(sink);

        let mut kinds = Vec::new();
        while let Some(event) = rx.recv().await {
            kinds.push(event.kind);
        }
        assert_eq!(kinds, vec![EventKind::Status, EventKind::Status, EventKind::Error]);
    }

    #[tokio::test]
    async fn dropped_receiver_does_not_panic() {
        let (sink, rx) = ChannelSink::channel(1);
        drop(rx);
        sink.emit(PipelineEvent::status(Agent::Report, "s", "d")).await;
    }
}
