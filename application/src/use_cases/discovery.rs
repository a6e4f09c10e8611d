//! Discovery stage - profile the target and identify skeletal competitors.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use rivalscope_domain::{
    Agent, AnalysisInput, DiscoveryResult, EventKind, PipelineEvent, discovery_system_prompt,
};

use crate::config::DiscoveryParams;
use crate::ports::completion::{CompletionRequest, ModelClient};
use crate::ports::events::EventSink;
use crate::ports::search::SearchClient;
use crate::use_cases::shared::{
    SECTION_SEPARATOR, StageError, check_cancelled, parse_stage_payload,
};

/// Runs the Discovery stage: two fixed searches (target profile, competitor
/// landscape), an optional third when the caller supplied known competitors,
/// one model call, and the ≤5-competitor post-validation.
pub struct DiscoveryStage<S: SearchClient, M: ModelClient> {
    search: Arc<S>,
    model: Arc<M>,
    params: DiscoveryParams,
}

impl<S: SearchClient, M: ModelClient> DiscoveryStage<S, M> {
    pub fn new(search: Arc<S>, model: Arc<M>, params: DiscoveryParams) -> Self {
        Self {
            search,
            model,
            params,
        }
    }

    pub async fn run(
        &self,
        input: &AnalysisInput,
        today: &str,
        events: &dyn EventSink,
        cancel: &Option<CancellationToken>,
    ) -> Result<DiscoveryResult, StageError> {
        info!(domain = %input.domain, "starting discovery");
        events
            .emit(PipelineEvent::status(
                Agent::Discovery,
                "Starting discovery",
                format!("Profiling {}", input.domain),
            ))
            .await;

        events
            .emit(PipelineEvent::status(
                Agent::Discovery,
                "Researching target",
                format!("Searching for {} company info", input.domain),
            ))
            .await;
        check_cancelled(cancel)?;
        let target_search = self
            .search
            .search(&format!(
                "{} company {} {}",
                input.domain, input.industry, input.sub_industry
            ))
            .await?;

        events
            .emit(PipelineEvent::status(
                Agent::Discovery,
                "Identifying competitors",
                format!("Searching for competitors in {}", input.sub_industry),
            ))
            .await;
        check_cancelled(cancel)?;
        let competitor_search = self
            .search
            .search(&format!(
                "{} competitors alternatives {}",
                input.domain, input.sub_industry
            ))
            .await?;

        let known_search = match &input.known_competitors {
            Some(known) => {
                events
                    .emit(PipelineEvent::status(
                        Agent::Discovery,
                        "Validating known competitors",
                        format!("Checking: {known}"),
                    ))
                    .await;
                check_cancelled(cancel)?;
                Some(
                    self.search
                        .search(&format!("{} vs {} competitive landscape", known, input.domain))
                        .await?,
                )
            }
            None => None,
        };

        events
            .emit(PipelineEvent::status(
                Agent::Discovery,
                "Analyzing results",
                "Synthesizing competitive landscape",
            ))
            .await;

        let mut sections = vec![
            format!(
                "Target company search results:\n{}",
                target_search.snippet_block()
            ),
            format!(
                "Competitor search results:\n{}",
                competitor_search.snippet_block()
            ),
        ];
        if let Some(known) = &known_search {
            sections.push(format!("Known competitor context:\n{}", known.snippet_block()));
        }
        let search_context = sections.join(SECTION_SEPARATOR);

        check_cancelled(cancel)?;
        let raw = self
            .model
            .complete(&CompletionRequest::new(
                &self.params.model,
                self.params.max_tokens,
                discovery_system_prompt(input, today),
                format!(
                    "Based on the following search results, profile the target and identify competitors.\n\n{search_context}"
                ),
            ))
            .await?;

        let mut result: DiscoveryResult = parse_stage_payload(Agent::Discovery, &raw)?;
        result.truncate_competitors(self.params.max_competitors);
        debug!(competitors = result.competitors.len(), "discovery parsed");

        events
            .emit(PipelineEvent::stage_complete(
                EventKind::Discovery,
                Agent::Discovery,
                "Discovery complete",
                format!("Found {} competitors", result.competitors.len()),
                &result,
            ))
            .await;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{
        CollectingSink, StubModel, StubSearch, discovery_json, event_kinds,
    };
    use rivalscope_domain::ThreatLevel;

    fn stage(model_reply: &str) -> DiscoveryStage<StubSearch, StubModel> {
        DiscoveryStage::new(
            Arc::new(StubSearch::default()),
            Arc::new(StubModel::replying(model_reply)),
            DiscoveryParams::default(),
        )
    }

    fn input() -> AnalysisInput {
        AnalysisInput::new("acme.com", "Software", "CRM")
    }

    #[tokio::test]
    async fn runs_two_searches_without_known_competitors() {
        let search = Arc::new(StubSearch::default());
        let stage = DiscoveryStage::new(
            Arc::clone(&search),
            Arc::new(StubModel::replying(&discovery_json(2))),
            DiscoveryParams::default(),
        );
        let sink = CollectingSink::default();

        stage
            .run(&input(), "2026-08-07", &sink, &None)
            .await
            .unwrap();

        let queries = search.queries();
        assert_eq!(
            queries,
            vec![
                "acme.com company Software CRM",
                "acme.com competitors alternatives CRM",
            ]
        );
    }

    #[tokio::test]
    async fn known_competitors_add_a_third_search() {
        let search = Arc::new(StubSearch::default());
        let stage = DiscoveryStage::new(
            Arc::clone(&search),
            Arc::new(StubModel::replying(&discovery_json(2))),
            DiscoveryParams::default(),
        );
        let sink = CollectingSink::default();

        stage
            .run(
                &input().with_known_competitors("rival.io"),
                "2026-08-07",
                &sink,
                &None,
            )
            .await
            .unwrap();

        let queries = search.queries();
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[2], "rival.io vs acme.com competitive landscape");
    }

    #[tokio::test]
    async fn truncates_to_max_competitors_keeping_head() {
        let stage = stage(&discovery_json(6));
        let sink = CollectingSink::default();

        let result = stage
            .run(&input(), "2026-08-07", &sink, &None)
            .await
            .unwrap();

        assert_eq!(result.competitors.len(), 5);
        let names: Vec<_> = result.competitors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rival 1", "Rival 2", "Rival 3", "Rival 4", "Rival 5"]);
    }

    #[tokio::test]
    async fn normalizes_invalid_threat_level_to_direct() {
        let reply = r#"{
            "profile": {"name": "Acme", "domain": "acme.com", "industry": "Software", "subIndustry": "CRM"},
            "competitors": [
                {"name": "Odd", "threatLevel": "Catastrophic"},
                {"name": "Fine", "threatLevel": "Emerging"}
            ]
        }"#;
        let stage = stage(reply);
        let sink = CollectingSink::default();

        let result = stage
            .run(&input(), "2026-08-07", &sink, &None)
            .await
            .unwrap();

        assert_eq!(result.competitors[0].threat_level, ThreatLevel::Direct);
        assert_eq!(result.competitors[1].threat_level, ThreatLevel::Emerging);
    }

    #[tokio::test]
    async fn emits_statuses_then_single_terminal_event() {
        let stage = stage(&discovery_json(1));
        let sink = CollectingSink::default();

        stage
            .run(&input(), "2026-08-07", &sink, &None)
            .await
            .unwrap();

        let events = sink.events();
        assert_eq!(
            event_kinds(&events),
            vec![
                EventKind::Status,
                EventKind::Status,
                EventKind::Status,
                EventKind::Status,
                EventKind::Discovery,
            ]
        );
        let terminal = events.last().unwrap();
        assert_eq!(terminal.detail.as_deref(), Some("Found 1 competitors"));
        assert!(terminal.data.is_some());
    }

    #[tokio::test]
    async fn unparseable_reply_is_a_malformed_output_error() {
        let stage = stage("I could not find anything useful.");
        let sink = CollectingSink::default();

        let err = stage
            .run(&input(), "2026-08-07", &sink, &None)
            .await
            .unwrap_err();

        match err {
            StageError::MalformedOutput { agent, snippet } => {
                assert_eq!(agent, Agent::Discovery);
                assert!(snippet.starts_with("I could not find"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // No terminal stage event, and the stage emits no error event of its
        // own; that frame belongs to the orchestrator.
        assert!(sink.events().iter().all(|e| e.kind == EventKind::Status));
    }

    #[tokio::test]
    async fn round_trips_stub_model_output() {
        let stage = stage(&discovery_json(3));
        let sink = CollectingSink::default();

        let result = stage
            .run(&input(), "2026-08-07", &sink, &None)
            .await
            .unwrap();

        let expected: DiscoveryResult = serde_json::from_str(&discovery_json(3)).unwrap();
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn cancelled_before_first_search() {
        let token = CancellationToken::new();
        token.cancel();
        let stage = stage(&discovery_json(1));
        let sink = CollectingSink::default();

        let err = stage
            .run(&input(), "2026-08-07", &sink, &Some(token))
            .await
            .unwrap_err();
        assert!(matches!(err, StageError::Cancelled));
    }
}
