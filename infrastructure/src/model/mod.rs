//! Completion model adapters.

mod anthropic;

pub use anthropic::AnthropicClient;
