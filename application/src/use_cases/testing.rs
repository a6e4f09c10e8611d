//! Test doubles shared by the use-case tests.

use std::sync::Mutex;

use async_trait::async_trait;

use rivalscope_domain::{AnalysisInput, AnalysisOutcome, EventKind, PipelineEvent};

use crate::ports::completion::{CompletionError, CompletionRequest, ModelClient};
use crate::ports::events::EventSink;
use crate::ports::search::{SearchClient, SearchError, SearchHit, SearchResponse};
use crate::ports::store::{PersistedReport, ReportStore, StoreError};

/// Search stub returning one fixed snippet per query, recording every query.
#[derive(Default)]
pub struct StubSearch {
    queries: Mutex<Vec<String>>,
}

impl StubSearch {
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for StubSearch {
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(SearchResponse {
            query: query.to_string(),
            results: vec![SearchHit {
                title: format!("Result for {query}"),
                url: "https://example.com".to_string(),
                content: "fixed snippet".to_string(),
                score: 0.9,
            }],
        })
    }
}

/// Search stub that always fails upstream.
pub struct FailingSearch;

#[async_trait]
impl SearchClient for FailingSearch {
    async fn search(&self, _query: &str) -> Result<SearchResponse, SearchError> {
        Err(SearchError::Upstream {
            status: 502,
            body: "bad gateway".to_string(),
        })
    }
}

/// Model stub replaying a scripted sequence of replies (the last reply
/// repeats), recording every request.
pub struct StubModel {
    replies: Mutex<Vec<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubModel {
    pub fn replying(reply: &str) -> Self {
        Self::scripted(vec![reply.to_string()])
    }

    pub fn scripted(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for StubModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            Ok(replies.remove(0))
        } else {
            Ok(replies[0].clone())
        }
    }
}

/// Sink that records every event in emission order.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl CollectingSink {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for CollectingSink {
    async fn emit(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Store stub that accepts everything.
#[derive(Default)]
pub struct OkStore {
    persisted: Mutex<Vec<AnalysisOutcome>>,
}

impl OkStore {
    pub fn persisted(&self) -> Vec<AnalysisOutcome> {
        self.persisted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportStore for OkStore {
    async fn persist(
        &self,
        _input: &AnalysisInput,
        outcome: &AnalysisOutcome,
    ) -> Result<PersistedReport, StoreError> {
        self.persisted.lock().unwrap().push(outcome.clone());
        Ok(PersistedReport {
            account_id: 1,
            report_id: 1,
        })
    }
}

/// Store stub that always fails.
pub struct FailStore;

#[async_trait]
impl ReportStore for FailStore {
    async fn persist(
        &self,
        _input: &AnalysisInput,
        _outcome: &AnalysisOutcome,
    ) -> Result<PersistedReport, StoreError> {
        Err(StoreError("connection refused".to_string()))
    }
}

/// Well-formed Discovery reply with `n` competitors named "Rival 1"..."Rival n".
pub fn discovery_json(n: usize) -> String {
    let competitors = (1..=n)
        .map(|i| {
            format!(
                r#"{{"name": "Rival {i}", "domain": "rival{i}.io", "description": "Competitor {i}", "threatLevel": "Direct", "confidenceScore": 0.8}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{"profile": {{"name": "Acme", "domain": "acme.com", "industry": "Software", "subIndustry": "CRM", "hq": "Austin, USA", "description": "CRM vendor"}}, "competitors": [{competitors}]}}"#
    )
}

/// Well-formed Deep-Dive reply enriching `n` competitors.
pub fn deep_dive_json(n: usize) -> String {
    let competitors = (1..=n)
        .map(|i| {
            format!(
                r#"{{"name": "Rival {i}", "domain": "rival{i}.io", "founded": "2020", "teamSize": "50-100",
                     "funding": {{"round": "Series B", "amount": "$25M", "investors": ["Fund"], "date": "2025-03"}},
                     "keyLeaders": [{{"name": "Jane Doe", "title": "CEO"}}],
                     "whatTheyDo": "Sells CRM software",
                     "recentMoves": [{{"date": "2025-06", "description": "Launched X"}}],
                     "swot": {{"strengths": ["brand"], "weaknesses": ["scale"], "opportunities": ["ai"], "threats": ["churn"]}},
                     "threatLevel": "Direct", "confidenceScore": 0.8}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"competitors": [{competitors}]}}"#)
}

/// Well-formed Report reply.
pub fn report_json() -> String {
    r#"{
        "summary": {
            "marketPositioning": ["Crowded mid-market"],
            "competitiveMoats": ["Data network effects"],
            "vulnerabilities": ["Enterprise gap"],
            "gtmSignals": {"pricing": ["Seat-based"], "channels": ["PLG"], "icp": ["SMB ops teams"]},
            "technologyDifferentiation": ["Native AI assistant"],
            "strategicRecommendations": [
                {"recommendation": "Move upmarket", "confidence": "high", "rationale": "Pricing headroom"}
            ],
            "risks": ["Churn"],
            "opportunities": ["Vertical CRM"]
        }
    }"#
    .to_string()
}

/// Just the kinds, for order assertions.
pub fn event_kinds(events: &[PipelineEvent]) -> Vec<EventKind> {
    events.iter().map(|e| e.kind).collect()
}
