//! File-level configuration shape.
//!
//! Credentials are deliberately not part of the file config: the provider
//! adapters read `TAVILY_API_KEY` / `ANTHROPIC_API_KEY` from the environment
//! and fail fast when they are missing.

use serde::{Deserialize, Serialize};

use rivalscope_application::PipelineParams;

/// Root of `rivalscope.toml`.
///
/// ```toml
/// [pipeline.discovery]
/// model = "claude-sonnet-4-5"
/// max_tokens = 4096
/// max_competitors = 5
///
/// [pipeline.deep_dive]
/// max_searches_per_competitor = 3
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub pipeline: PipelineParams,
}
