//! Input validation for [`AnalysisInput`].
//!
//! Validation happens once, at the boundary, before the orchestrator starts.
//! All issues are collected and reported together rather than failing on the
//! first one, so the caller can fix its request in a single round trip.

use serde::Serialize;

use super::entities::AnalysisInput;

/// A single validation failure on the analysis input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputIssue {
    /// The offending field, in wire naming ("subIndustry", not "sub_industry")
    pub field: &'static str,
    pub message: String,
}

impl InputIssue {
    fn empty(field: &'static str) -> Self {
        Self {
            field,
            message: format!("{field} must not be empty"),
        }
    }
}

impl std::fmt::Display for InputIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate an [`AnalysisInput`], returning every issue found.
///
/// An empty vector means the input is valid and the run may start.
pub fn validate_input(input: &AnalysisInput) -> Vec<InputIssue> {
    let mut issues = Vec::new();

    if input.domain.is_empty() {
        issues.push(InputIssue::empty("domain"));
    }
    if input.industry.is_empty() {
        issues.push(InputIssue::empty("industry"));
    }
    if input.sub_industry.is_empty() {
        issues.push(InputIssue::empty("subIndustry"));
    }

    issues
}
