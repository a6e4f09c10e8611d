//! Presentation layer for rivalscope
//!
//! Everything that turns [`PipelineEvent`](rivalscope_domain::PipelineEvent)s
//! into something a consumer sees: the SSE wire framing, sinks that carry
//! events to a transport, the console narrator, and the CLI argument surface.

pub mod cli;
pub mod console;
pub mod sse;

pub use cli::Cli;
pub use console::ConsoleNarrator;
pub use sse::{ChannelSink, SseStdoutSink, encode_frame};
