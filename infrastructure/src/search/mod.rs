//! Web search adapters.

mod tavily;

pub use tavily::TavilyClient;
