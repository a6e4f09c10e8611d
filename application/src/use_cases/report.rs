//! Report stage - synthesize the strategic summary.
//!
//! The only stage with no searches: it operates purely on the structured
//! competitor data gathered upstream, serialized into the user message.

use std::sync::Arc;

use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use rivalscope_domain::{
    Agent, CompanyProfile, CompetitorCard, EventKind, PipelineEvent, ReportResult, ReportSummary,
    report_system_prompt,
};

use crate::config::StageParams;
use crate::ports::completion::{CompletionRequest, ModelClient};
use crate::ports::events::EventSink;
use crate::use_cases::shared::{StageError, check_cancelled, parse_stage_payload};

/// The model's reply carries only the summary; the competitor list is
/// echoed through from the input, never re-emitted by the model.
#[derive(Debug, Deserialize)]
struct ParsedReport {
    summary: ReportSummary,
}

/// Runs the Report stage: one model call over the enriched competitor data.
pub struct ReportStage<M: ModelClient> {
    model: Arc<M>,
    params: StageParams,
}

impl<M: ModelClient> ReportStage<M> {
    pub fn new(model: Arc<M>, params: StageParams) -> Self {
        Self { model, params }
    }

    pub async fn run(
        &self,
        profile: &CompanyProfile,
        competitors: &[CompetitorCard],
        today: &str,
        events: &dyn EventSink,
        cancel: &Option<CancellationToken>,
    ) -> Result<ReportResult, StageError> {
        info!(target = %profile.domain, "starting report");
        events
            .emit(PipelineEvent::status(
                Agent::Report,
                "Starting report generation",
                "Analyzing competitive landscape",
            ))
            .await;

        let competitor_context =
            serde_json::to_string_pretty(competitors).unwrap_or_else(|_| "[]".to_string());

        events
            .emit(PipelineEvent::status(
                Agent::Report,
                "Generating strategic analysis",
                "Porter's Five Forces + Gartner positioning",
            ))
            .await;

        check_cancelled(cancel)?;
        let raw = self
            .model
            .complete(&CompletionRequest::new(
                &self.params.model,
                self.params.max_tokens,
                report_system_prompt(profile, competitors, today),
                format!(
                    "Produce the competitive intelligence report based on this competitor data:\n\n{competitor_context}"
                ),
            ))
            .await?;

        let parsed: ParsedReport = parse_stage_payload(Agent::Report, &raw)?;
        let result = ReportResult {
            summary: parsed.summary,
            competitors: competitors.to_vec(),
        };

        events
            .emit(PipelineEvent::stage_complete(
                EventKind::Report,
                Agent::Report,
                "Report complete",
                "Strategic intelligence report generated",
                &result,
            ))
            .await;

        Ok(result)
    }
}
