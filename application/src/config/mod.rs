//! Pipeline parameters - static knobs for the three stages.
//!
//! These are application-layer concerns (which model, how many tokens, how
//! many searches), not domain policy. They are loaded from configuration by
//! the infrastructure layer and injected into
//! [`AnalysisPipeline`](crate::use_cases::pipeline::AnalysisPipeline) at the
//! composition root.

use serde::{Deserialize, Serialize};

/// Default completion model for every stage.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Model selection and output budget for one stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StageParams {
    /// Completion model identifier
    pub model: String,
    /// Maximum completion tokens for the stage's single model call
    pub max_tokens: u32,
}

impl Default for StageParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 8192,
        }
    }
}

impl StageParams {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Discovery stage parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscoveryParams {
    pub model: String,
    pub max_tokens: u32,
    /// Hard cap on the competitor list; entries beyond it are dropped from
    /// the tail
    pub max_competitors: usize,
}

impl Default for DiscoveryParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            max_competitors: 5,
        }
    }
}

/// Deep-Dive stage parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeepDiveParams {
    pub model: String,
    pub max_tokens: u32,
    /// Searches issued per competitor; the third (product/market) search
    /// only runs when this is 3 or more
    pub max_searches_per_competitor: usize,
}

impl Default for DeepDiveParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 8192,
            max_searches_per_competitor: 3,
        }
    }
}

/// Parameters for a whole pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineParams {
    pub discovery: DiscoveryParams,
    pub deep_dive: DeepDiveParams,
    pub report: StageParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = PipelineParams::default();
        assert_eq!(params.discovery.model, DEFAULT_MODEL);
        assert_eq!(params.discovery.max_tokens, 4096);
        assert_eq!(params.discovery.max_competitors, 5);
        assert_eq!(params.deep_dive.max_searches_per_competitor, 3);
        assert_eq!(params.report.max_tokens, 8192);
    }

    #[test]
    fn partial_overrides_keep_stage_defaults() {
        let params: DiscoveryParams =
            serde_json::from_str(r#"{"model": "claude-haiku-4-5", "max_competitors": 3}"#)
                .unwrap();
        assert_eq!(params.model, "claude-haiku-4-5");
        assert_eq!(params.max_tokens, 4096);
        assert_eq!(params.max_competitors, 3);
    }

    #[test]
    fn builder_overrides() {
        let stage = StageParams::default()
            .with_model("claude-opus-4-5")
            .with_max_tokens(1024);
        assert_eq!(stage.model, "claude-opus-4-5");
        assert_eq!(stage.max_tokens, 1024);
    }
}
