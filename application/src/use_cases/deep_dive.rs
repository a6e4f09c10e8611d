//! Deep-Dive stage - enrich each competitor into a full intelligence card.
//!
//! Searches run sequentially, one competitor at a time. That is deliberate:
//! event ordering across competitors is part of the stream contract, so no
//! per-competitor concurrency is introduced here.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use rivalscope_domain::{
    Agent, CompetitorCard, DeepDiveResult, EventKind, PipelineEvent, deep_dive_system_prompt,
};

use crate::config::DeepDiveParams;
use crate::ports::completion::{CompletionRequest, ModelClient};
use crate::ports::events::EventSink;
use crate::ports::search::SearchClient;
use crate::use_cases::shared::{
    SECTION_SEPARATOR, StageError, check_cancelled, parse_stage_payload,
};

/// Runs the Deep-Dive stage: 2-3 searches per competitor, one model call
/// over the combined research, enriched cards back.
pub struct DeepDiveStage<S: SearchClient, M: ModelClient> {
    search: Arc<S>,
    model: Arc<M>,
    params: DeepDiveParams,
}

impl<S: SearchClient, M: ModelClient> DeepDiveStage<S, M> {
    pub fn new(search: Arc<S>, model: Arc<M>, params: DeepDiveParams) -> Self {
        Self {
            search,
            model,
            params,
        }
    }

    pub async fn run(
        &self,
        competitors: &[CompetitorCard],
        today: &str,
        events: &dyn EventSink,
        cancel: &Option<CancellationToken>,
    ) -> Result<DeepDiveResult, StageError> {
        info!(count = competitors.len(), "starting deep dive");
        events
            .emit(PipelineEvent::status(
                Agent::DeepDive,
                "Starting deep dive",
                format!("Researching {} competitors", competitors.len()),
            ))
            .await;

        let mut sections = Vec::with_capacity(competitors.len());
        for competitor in competitors {
            sections.push(self.research_competitor(competitor, events, cancel).await?);
        }

        events
            .emit(PipelineEvent::status(
                Agent::DeepDive,
                "Synthesizing deep dive",
                "Building competitor cards with SWOT analysis",
            ))
            .await;

        check_cancelled(cancel)?;
        let raw = self
            .model
            .complete(&CompletionRequest::new(
                &self.params.model,
                self.params.max_tokens,
                deep_dive_system_prompt(competitors, today),
                format!(
                    "Based on the following research, produce detailed competitor cards.\n\n{}",
                    sections.join(SECTION_SEPARATOR)
                ),
            ))
            .await?;

        let result: DeepDiveResult = parse_stage_payload(Agent::DeepDive, &raw)?;
        debug!(cards = result.competitors.len(), "deep dive parsed");

        events
            .emit(PipelineEvent::stage_complete(
                EventKind::DeepDive,
                Agent::DeepDive,
                "Deep dive complete",
                format!("Detailed cards for {} competitors", result.competitors.len()),
                &result,
            ))
            .await;

        Ok(result)
    }

    /// Run this competitor's searches and format its research section.
    async fn research_competitor(
        &self,
        competitor: &CompetitorCard,
        events: &dyn EventSink,
        cancel: &Option<CancellationToken>,
    ) -> Result<String, StageError> {
        let step = format!("Researching {}", competitor.name);
        let domain = competitor.domain.as_deref().unwrap_or("");
        let mut blocks = Vec::with_capacity(self.params.max_searches_per_competitor);

        events
            .emit(PipelineEvent::status(
                Agent::DeepDive,
                step.clone(),
                "Company profile and funding",
            ))
            .await;
        check_cancelled(cancel)?;
        let profile_search = self
            .search
            .search(&format!("{} {} company profile funding", competitor.name, domain))
            .await?;
        blocks.push(profile_search.snippet_block());

        events
            .emit(PipelineEvent::status(
                Agent::DeepDive,
                step.clone(),
                "Leadership and recent news",
            ))
            .await;
        check_cancelled(cancel)?;
        let leadership_search = self
            .search
            .search(&format!(
                "{} CEO CTO leadership team recent news",
                competitor.name
            ))
            .await?;
        blocks.push(leadership_search.snippet_block());

        if self.params.max_searches_per_competitor >= 3 {
            events
                .emit(PipelineEvent::status(
                    Agent::DeepDive,
                    step,
                    "Product and market position",
                ))
                .await;
            check_cancelled(cancel)?;
            let product_search = self
                .search
                .search(&format!("{} product launch partnership SWOT", competitor.name))
                .await?;
            blocks.push(product_search.snippet_block());
        }

        Ok(format!(
            "### {} ({})\n{}",
            competitor.name,
            competitor.domain.as_deref().unwrap_or("N/A"),
            blocks.join("\n\n")
        ))
    }
}
