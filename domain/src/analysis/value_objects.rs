//! Value objects for competitor classification and the strategic summary.

use serde::{Deserialize, Deserializer, Serialize};

/// Classification of a competitor relative to the target company (Value Object).
///
/// - **Direct**: same sub-industry, same ICP, head-to-head
/// - **Adjacent**: related market, partial overlap, could expand into the target's space
/// - **Emerging**: new entrant, different approach, potential disruptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ThreatLevel {
    Direct,
    Adjacent,
    Emerging,
}

impl ThreatLevel {
    /// Parse an exact classification label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Direct" => Some(ThreatLevel::Direct),
            "Adjacent" => Some(ThreatLevel::Adjacent),
            "Emerging" => Some(ThreatLevel::Emerging),
            _ => None,
        }
    }

    /// Coerce an untrusted classification label into a valid level.
    ///
    /// Any label outside the enum falls back to `Direct`, silently: an
    /// unclassifiable competitor counts as a direct threat instead of
    /// surfacing a validation warning. Policy decision, recorded in
    /// DESIGN.md.
    pub fn normalize(label: &str) -> Self {
        Self::from_label(label).unwrap_or(ThreatLevel::Direct)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Direct => "Direct",
            ThreatLevel::Adjacent => "Adjacent",
            ThreatLevel::Emerging => "Emerging",
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Model output is untrusted: deserialization must never reject a card over
// its classification, so every inbound label routes through `normalize`.
impl<'de> Deserialize<'de> for ThreatLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(ThreatLevel::normalize(&label))
    }
}

/// Confidence attached to a strategic recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

/// One actionable recommendation from the Report stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategicRecommendation {
    pub recommendation: String,
    pub confidence: ConfidenceLabel,
    pub rationale: String,
}

/// Go-to-market signals observed across the competitive landscape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GtmSignals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icp: Option<Vec<String>>,
}

/// The strategic summary produced exactly once by the Report stage.
///
/// Every section is optional: the model is prompted for all of them, but a
/// sparse summary is still a valid summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_positioning: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitive_moats: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtm_signals: Option<GtmSignals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology_differentiation: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategic_recommendations: Option<Vec<StrategicRecommendation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunities: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_labels_pass_through() {
        assert_eq!(ThreatLevel::normalize("Direct"), ThreatLevel::Direct);
        assert_eq!(ThreatLevel::normalize("Adjacent"), ThreatLevel::Adjacent);
        assert_eq!(ThreatLevel::normalize("Emerging"), ThreatLevel::Emerging);
    }

    #[test]
    fn unknown_labels_fall_back_to_direct() {
        assert_eq!(ThreatLevel::normalize("Critical"), ThreatLevel::Direct);
        assert_eq!(ThreatLevel::normalize("direct"), ThreatLevel::Direct);
        assert_eq!(ThreatLevel::normalize(""), ThreatLevel::Direct);
    }

    #[test]
    fn deserialization_normalizes() {
        let level: ThreatLevel = serde_json::from_str("\"Emerging\"").unwrap();
        assert_eq!(level, ThreatLevel::Emerging);

        let coerced: ThreatLevel = serde_json::from_str("\"Severe\"").unwrap();
        assert_eq!(coerced, ThreatLevel::Direct);
    }

    #[test]
    fn serialization_uses_exact_labels() {
        assert_eq!(
            serde_json::to_string(&ThreatLevel::Adjacent).unwrap(),
            "\"Adjacent\""
        );
    }

    #[test]
    fn confidence_labels_are_lowercase() {
        let rec: StrategicRecommendation = serde_json::from_str(
            r#"{"recommendation": "Do X", "confidence": "high", "rationale": "Because Y"}"#,
        )
        .unwrap();
        assert_eq!(rec.confidence, ConfidenceLabel::High);
        assert_eq!(
            serde_json::to_value(&rec).unwrap()["confidence"],
            "high"
        );
    }

    #[test]
    fn sparse_summary_deserializes() {
        let summary: ReportSummary =
            serde_json::from_str(r#"{"risks": ["Churn"]}"#).unwrap();
        assert_eq!(summary.risks.as_ref().unwrap().len(), 1);
        assert!(summary.market_positioning.is_none());
    }
}
