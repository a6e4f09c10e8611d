//! Entities produced and consumed by the pipeline stages.
//!
//! All types serialize with camelCase field names: the same shapes appear in
//! the prompt-embedded JSON schemas, the parsed model output, and the event
//! stream payloads, and they must stay byte-compatible across all three.

use serde::{Deserialize, Serialize};

use super::value_objects::{ReportSummary, ThreatLevel};

/// Input for one analysis run, supplied once by the boundary and owned by
/// the orchestrator for the run's duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    /// Target company domain, e.g. "acme.com"
    pub domain: String,
    /// GICS sector
    pub industry: String,
    /// GICS sub-industry - the primary lens for competitor discovery
    pub sub_industry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_geography: Option<Vec<String>>,
    /// Free-text list of competitors the caller already knows about,
    /// used as starting points for discovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_competitors: Option<String>,
}

impl AnalysisInput {
    pub fn new(
        domain: impl Into<String>,
        industry: impl Into<String>,
        sub_industry: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            industry: industry.into(),
            sub_industry: sub_industry.into(),
            hq: None,
            target_geography: None,
            known_competitors: None,
        }
    }

    pub fn with_hq(mut self, hq: impl Into<String>) -> Self {
        self.hq = Some(hq.into());
        self
    }

    pub fn with_target_geography(mut self, geography: Vec<String>) -> Self {
        self.target_geography = Some(geography);
        self
    }

    pub fn with_known_competitors(mut self, known: impl Into<String>) -> Self {
        self.known_competitors = Some(known.into());
        self
    }
}

/// Profile of the target company, produced exactly once by Discovery and
/// consumed read-only by Report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub domain: String,
    pub industry: String,
    pub sub_industry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Most recent funding information for a competitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A named executive at a competitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyLeader {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

/// A recent strategic move (launch, partnership, hire) by a competitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentMove {
    pub date: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Strengths / weaknesses / opportunities / threats quadrants.
///
/// The model is asked for 2-3 bullets per quadrant but nothing enforces the
/// count; empty quadrants deserialize to empty vectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwotAnalysis {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
}

/// One competitor, skeletal after Discovery (name / domain / description /
/// threat level / confidence only) and fully enriched after Deep-Dive.
///
/// Deep-Dive replaces the Discovery cards wholesale rather than merging into
/// them; the cards carry no stable identifier beyond their name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorCard {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding: Option<FundingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_leaders: Option<Vec<KeyLeader>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub what_they_do: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_moves: Option<Vec<RecentMove>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swot: Option<SwotAnalysis>,
    /// Always a valid enum value: deserialization routes unknown labels
    /// through [`ThreatLevel::normalize`]
    pub threat_level: ThreatLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl CompetitorCard {
    /// Skeletal card as Discovery produces it.
    pub fn skeletal(name: impl Into<String>, threat_level: ThreatLevel) -> Self {
        Self {
            name: name.into(),
            domain: None,
            description: None,
            founded: None,
            hq: None,
            team_size: None,
            funding: None,
            key_leaders: None,
            what_they_do: None,
            recent_moves: None,
            swot: None,
            threat_level,
            confidence_score: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Output of the Discovery stage: target profile plus skeletal competitors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResult {
    pub profile: CompanyProfile,
    pub competitors: Vec<CompetitorCard>,
}

impl DiscoveryResult {
    /// Enforce the competitor cap: keep list order, drop from the tail.
    pub fn truncate_competitors(&mut self, max: usize) {
        if self.competitors.len() > max {
            self.competitors.truncate(max);
        }
    }
}

/// Output of the Deep-Dive stage: the enriched competitor list.
///
/// The returned count is expected, but not enforced, to match the input count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeepDiveResult {
    pub competitors: Vec<CompetitorCard>,
}

/// Output of the Report stage: the strategic summary, paired with the
/// Deep-Dive competitor list echoed through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    pub summary: ReportSummary,
    pub competitors: Vec<CompetitorCard>,
}

/// The full aggregate a successful run delivers, carried by the terminal
/// `done` event and handed to the persistence boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub profile: CompanyProfile,
    pub competitors: Vec<CompetitorCard>,
    pub summary: ReportSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CompanyProfile {
        CompanyProfile {
            name: "Acme".to_string(),
            domain: "acme.com".to_string(),
            industry: "Software".to_string(),
            sub_industry: "CRM".to_string(),
            hq: None,
            description: None,
        }
    }

    #[test]
    fn truncate_keeps_first_entries_in_order() {
        let mut result = DiscoveryResult {
            profile: profile(),
            competitors: (0..7)
                .map(|i| CompetitorCard::skeletal(format!("c{i}"), ThreatLevel::Direct))
                .collect(),
        };

        result.truncate_competitors(5);

        assert_eq!(result.competitors.len(), 5);
        let names: Vec<_> = result.competitors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c0", "c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn truncate_is_noop_below_cap() {
        let mut result = DiscoveryResult {
            profile: profile(),
            competitors: vec![CompetitorCard::skeletal("only", ThreatLevel::Emerging)],
        };

        result.truncate_competitors(5);
        assert_eq!(result.competitors.len(), 1);
    }

    #[test]
    fn input_serializes_camel_case() {
        let input = AnalysisInput::new("acme.com", "Software", "CRM")
            .with_known_competitors("rival.io");
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json["subIndustry"], "CRM");
        assert_eq!(json["knownCompetitors"], "rival.io");
        assert!(json.get("hq").is_none());
    }

    #[test]
    fn competitor_card_roundtrips_optional_fields() {
        let raw = r#"{
            "name": "Rival",
            "domain": "rival.io",
            "threatLevel": "Adjacent",
            "funding": { "round": "Series B", "amount": "$25M" },
            "swot": { "strengths": ["brand"] }
        }"#;

        let card: CompetitorCard = serde_json::from_str(raw).unwrap();
        assert_eq!(card.threat_level, ThreatLevel::Adjacent);
        assert_eq!(card.funding.as_ref().unwrap().round.as_deref(), Some("Series B"));
        let swot = card.swot.as_ref().unwrap();
        assert_eq!(swot.strengths, vec!["brand"]);
        assert!(swot.threats.is_empty());

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["threatLevel"], "Adjacent");
        assert!(json.get("keyLeaders").is_none());
    }
}
