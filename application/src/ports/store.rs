//! Report persistence port.
//!
//! Persistence is best-effort: the orchestrator calls [`ReportStore::persist`]
//! once after a successful run and downgrades any failure to a warning event.
//! Implementations upsert the account by its domain natural key, which makes
//! repeated runs against the same target idempotent at the storage layer.

use async_trait::async_trait;
use rivalscope_domain::{AnalysisInput, AnalysisOutcome};
use thiserror::Error;

/// The aggregate could not be persisted. Caught at the orchestrator
/// boundary only; never fails the run.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Row identifiers assigned by a successful persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedReport {
    pub account_id: u64,
    pub report_id: u64,
}

/// Persists the final aggregate of a run.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Upsert the account for `input.domain`, then create a new report row
    /// with nested competitor rows derived from `outcome`.
    async fn persist(
        &self,
        input: &AnalysisInput,
        outcome: &AnalysisOutcome,
    ) -> Result<PersistedReport, StoreError>;
}
