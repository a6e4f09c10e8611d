//! Pipeline orchestrator - sequences the three stages and owns the stream.
//!
//! The run is a strict state machine: no branching, no parallelism, no
//! stage skipping. Any stage error stops the machine where it stands; the
//! orchestrator then emits the run's single terminal `error` frame. After a
//! successful Report, persistence is attempted best-effort: a failure is
//! downgraded to a warning status and the `done` event still carries the
//! in-memory aggregate.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use rivalscope_domain::{Agent, AnalysisInput, AnalysisOutcome, PipelineEvent};

use crate::config::PipelineParams;
use crate::ports::completion::ModelClient;
use crate::ports::events::{EventSink, NullSink};
use crate::ports::search::SearchClient;
use crate::ports::store::ReportStore;
use crate::use_cases::deep_dive::DeepDiveStage;
use crate::use_cases::discovery::DiscoveryStage;
use crate::use_cases::report::ReportStage;
use crate::use_cases::shared::StageError;

/// Errors that abort a pipeline run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Stage(#[from] StageError),
}

/// Named states of a run, in walk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Started,
    Discovering,
    HandoffToDeepDive,
    DeepDiving,
    HandoffToReport,
    Reporting,
    Persisting,
    Done,
    /// Terminal failure state, reachable from any state.
    Errored,
}

impl PipelineState {
    /// The successor on the happy path. Terminal states are fixpoints.
    pub fn advance(self) -> Self {
        match self {
            PipelineState::Started => PipelineState::Discovering,
            PipelineState::Discovering => PipelineState::HandoffToDeepDive,
            PipelineState::HandoffToDeepDive => PipelineState::DeepDiving,
            PipelineState::DeepDiving => PipelineState::HandoffToReport,
            PipelineState::HandoffToReport => PipelineState::Reporting,
            PipelineState::Reporting => PipelineState::Persisting,
            PipelineState::Persisting => PipelineState::Done,
            PipelineState::Done => PipelineState::Done,
            PipelineState::Errored => PipelineState::Errored,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Errored)
    }
}

/// The orchestrator. Owns the stage runners and the persistence port; the
/// event sink it is handed is the only place its events meet the transport.
pub struct AnalysisPipeline<S: SearchClient, M: ModelClient, R: ReportStore> {
    discovery: DiscoveryStage<S, M>,
    deep_dive: DeepDiveStage<S, M>,
    report: ReportStage<M>,
    store: Arc<R>,
}

impl<S: SearchClient, M: ModelClient, R: ReportStore> AnalysisPipeline<S, M, R> {
    pub fn new(search: Arc<S>, model: Arc<M>, store: Arc<R>, params: PipelineParams) -> Self {
        Self {
            discovery: DiscoveryStage::new(Arc::clone(&search), Arc::clone(&model), params.discovery),
            deep_dive: DeepDiveStage::new(search, Arc::clone(&model), params.deep_dive),
            report: ReportStage::new(model, params.report),
            store,
        }
    }

    /// Run without narration, for callers that only want the aggregate.
    pub async fn execute(
        &self,
        input: &AnalysisInput,
        today: &str,
    ) -> Result<AnalysisOutcome, PipelineError> {
        self.run(input, today, &NullSink, None).await
    }

    /// Run the whole pipeline for one validated input.
    ///
    /// On success the returned aggregate is the same one the terminal `done`
    /// event carried. On failure the single terminal `error` event has
    /// already been emitted when this returns.
    pub async fn run(
        &self,
        input: &AnalysisInput,
        today: &str,
        events: &dyn EventSink,
        cancel: Option<CancellationToken>,
    ) -> Result<AnalysisOutcome, PipelineError> {
        let mut state = PipelineState::Started;
        info!(domain = %input.domain, "pipeline run starting");

        match self.drive(input, today, events, &cancel, &mut state).await {
            Ok(outcome) => {
                info!(domain = %input.domain, "pipeline run complete");
                Ok(outcome)
            }
            Err(err) => {
                state = PipelineState::Errored;
                warn!(%err, ?state, "pipeline run aborted");
                events
                    .emit(PipelineEvent::error(Agent::Orchestrator, err.to_string()))
                    .await;
                Err(err)
            }
        }
    }

    async fn drive(
        &self,
        input: &AnalysisInput,
        today: &str,
        events: &dyn EventSink,
        cancel: &Option<CancellationToken>,
        state: &mut PipelineState,
    ) -> Result<AnalysisOutcome, PipelineError> {
        events
            .emit(PipelineEvent::status(
                Agent::Orchestrator,
                "Pipeline started",
                format!("Analyzing {}", input.domain),
            ))
            .await;

        Self::transition(state); // Discovering
        let discovery = self.discovery.run(input, today, events, cancel).await?;

        Self::transition(state); // HandoffToDeepDive
        events
            .emit(PipelineEvent::status(
                Agent::Orchestrator,
                "Handoff",
                "Discovery -> Deep Dive",
            ))
            .await;

        Self::transition(state); // DeepDiving
        let deep_dive = self
            .deep_dive
            .run(&discovery.competitors, today, events, cancel)
            .await?;

        Self::transition(state); // HandoffToReport
        events
            .emit(PipelineEvent::status(
                Agent::Orchestrator,
                "Handoff",
                "Deep Dive -> Report",
            ))
            .await;

        Self::transition(state); // Reporting
        let report = self
            .report
            .run(&discovery.profile, &deep_dive.competitors, today, events, cancel)
            .await?;

        Self::transition(state); // Persisting
        let outcome = AnalysisOutcome {
            profile: discovery.profile,
            competitors: report.competitors,
            summary: report.summary,
        };
        match self.store.persist(input, &outcome).await {
            Ok(saved) => {
                events
                    .emit(PipelineEvent::status(
                        Agent::Orchestrator,
                        "Saved",
                        format!("Report {} persisted", saved.report_id),
                    ))
                    .await;
            }
            Err(err) => {
                warn!(%err, "persistence failed, continuing");
                events
                    .emit(PipelineEvent::status(
                        Agent::Orchestrator,
                        "Warning",
                        format!("Failed to persist: {err}"),
                    ))
                    .await;
            }
        }

        Self::transition(state); // Done
        events.emit(PipelineEvent::done(&outcome)).await;
        Ok(outcome)
    }

    fn transition(state: &mut PipelineState) {
        *state = state.advance();
        debug!(?state, "pipeline transition");
    }
}
