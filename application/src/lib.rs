//! Application layer for rivalscope
//!
//! Use cases (the three stage runners and the pipeline orchestrator) and the
//! ports they depend on. Adapters for the ports live in the infrastructure
//! layer; event presentation lives in the presentation layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DeepDiveParams, DiscoveryParams, PipelineParams, StageParams};
pub use ports::{
    completion::{CompletionError, CompletionRequest, ModelClient},
    events::{EventSink, NullSink},
    search::{SearchClient, SearchError, SearchHit, SearchResponse},
    store::{PersistedReport, ReportStore, StoreError},
};
pub use use_cases::{
    deep_dive::DeepDiveStage,
    discovery::DiscoveryStage,
    pipeline::{AnalysisPipeline, PipelineError, PipelineState},
    report::ReportStage,
    shared::StageError,
};
