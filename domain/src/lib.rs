//! Domain layer for rivalscope
//!
//! This crate contains the core business logic, entities, and value objects
//! of the competitive-intelligence pipeline. It has no dependencies on
//! infrastructure or presentation concerns. No I/O happens here.
//!
//! # Core Concepts
//!
//! ## Stages
//!
//! An analysis run walks three stages in a fixed order:
//!
//! - **Discovery**: profile the target company and identify competitors
//! - **Deep-Dive**: enrich each competitor into a full intelligence card
//! - **Report**: synthesize the strategic summary from the enriched cards
//!
//! ## Events
//!
//! Every stage narrates its progress through [`PipelineEvent`]s, which the
//! presentation layer frames onto the outbound stream. Events are the only
//! place progress exists; they are never persisted.

pub mod analysis;
pub mod event;
pub mod parsing;
pub mod prompt;

// Re-export commonly used types
pub use analysis::{
    entities::{
        AnalysisInput, AnalysisOutcome, CompanyProfile, CompetitorCard, DeepDiveResult,
        DiscoveryResult, FundingInfo, KeyLeader, RecentMove, ReportResult, SwotAnalysis,
    },
    validation::{InputIssue, validate_input},
    value_objects::{
        ConfidenceLabel, GtmSignals, ReportSummary, StrategicRecommendation, ThreatLevel,
    },
};
pub use event::{Agent, EventKind, PipelineEvent};
pub use parsing::{ExtractError, extract_payload, head_snippet, strip_markdown_fences};
pub use prompt::{deep_dive_system_prompt, discovery_system_prompt, report_system_prompt};
