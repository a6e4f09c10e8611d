//! Infrastructure layer for rivalscope
//!
//! Adapters for the application ports: the Tavily web-search client, the
//! Anthropic completion client, the in-memory report store, and file-based
//! configuration loading.

pub mod config;
pub mod model;
pub mod persistence;
pub mod search;

pub use config::{ConfigLoader, FileConfig};
pub use model::AnthropicClient;
pub use persistence::InMemoryReportStore;
pub use search::TavilyClient;
