//! In-memory report store.
//!
//! Mirrors the relational layout of the external persistence collaborator:
//! one account row per domain (upserted by that natural key), report rows
//! appended per run, each with nested competitor rows. Funding is flattened
//! into scalar columns; leaders, moves, and SWOT are stored as opaque
//! structured blobs. The upsert is what makes repeated runs against the same
//! target idempotent at the storage layer.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use rivalscope_application::ports::store::{PersistedReport, ReportStore, StoreError};
use rivalscope_domain::{AnalysisInput, AnalysisOutcome, CompetitorCard};

/// Account row, one per target domain.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub id: u64,
    pub domain: String,
    pub name: String,
    pub industry: String,
    pub sub_industry: String,
    pub hq: Option<String>,
    pub website: String,
    pub tier: String,
}

/// Competitor row nested under a report.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorRow {
    pub name: String,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub founded: Option<String>,
    pub hq: Option<String>,
    pub team_size: Option<String>,
    pub funding_round: Option<String>,
    pub funding_amount: Option<String>,
    pub funding_investors: Vec<String>,
    pub funding_date: Option<String>,
    pub key_leaders: Value,
    pub what_they_do: Option<String>,
    pub recent_moves: Value,
    pub swot: Value,
    pub threat_level: String,
    pub confidence_score: Option<f64>,
}

impl CompetitorRow {
    fn from_card(card: &CompetitorCard) -> Self {
        let funding = card.funding.as_ref();
        Self {
            name: card.name.clone(),
            domain: card.domain.clone(),
            description: card.description.clone(),
            founded: card.founded.clone(),
            hq: card.hq.clone(),
            team_size: card.team_size.clone(),
            funding_round: funding.and_then(|f| f.round.clone()),
            funding_amount: funding.and_then(|f| f.amount.clone()),
            funding_investors: funding
                .and_then(|f| f.investors.clone())
                .unwrap_or_default(),
            funding_date: funding.and_then(|f| f.date.clone()),
            key_leaders: serde_json::to_value(card.key_leaders.clone().unwrap_or_default())
                .unwrap_or(Value::Array(vec![])),
            what_they_do: card.what_they_do.clone(),
            recent_moves: serde_json::to_value(card.recent_moves.clone().unwrap_or_default())
                .unwrap_or(Value::Array(vec![])),
            swot: card
                .swot
                .as_ref()
                .and_then(|s| serde_json::to_value(s).ok())
                .unwrap_or_else(|| Value::Object(Default::default())),
            threat_level: card.threat_level.to_string(),
            confidence_score: card.confidence_score,
        }
    }
}

/// Report row, one per completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    pub id: u64,
    pub account_id: u64,
    pub domain: String,
    pub industry: String,
    pub sub_industry: String,
    pub hq: Option<String>,
    pub geography: Vec<String>,
    pub status: String,
    pub summary: Value,
    pub competitors: Vec<CompetitorRow>,
}

#[derive(Default)]
struct StoreInner {
    accounts: Vec<AccountRecord>,
    reports: Vec<ReportRecord>,
    next_account_id: u64,
    next_report_id: u64,
}

/// [`ReportStore`] adapter keeping everything in process memory.
#[derive(Default)]
pub struct InMemoryReportStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> Vec<AccountRecord> {
        self.inner.lock().unwrap().accounts.clone()
    }

    pub fn reports(&self) -> Vec<ReportRecord> {
        self.inner.lock().unwrap().reports.clone()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn persist(
        &self,
        input: &AnalysisInput,
        outcome: &AnalysisOutcome,
    ) -> Result<PersistedReport, StoreError> {
        let mut inner = self.inner.lock().map_err(|e| StoreError(e.to_string()))?;

        // Upsert account by domain natural key.
        let hq = input.hq.clone().or_else(|| outcome.profile.hq.clone());
        let existing = inner.accounts.iter().position(|a| a.domain == input.domain);
        let account_id = match existing {
            Some(idx) => {
                let account = &mut inner.accounts[idx];
                account.name = outcome.profile.name.clone();
                account.industry = input.industry.clone();
                account.sub_industry = input.sub_industry.clone();
                account.hq = hq;
                account.id
            }
            None => {
                inner.next_account_id += 1;
                let id = inner.next_account_id;
                inner.accounts.push(AccountRecord {
                    id,
                    domain: input.domain.clone(),
                    name: outcome.profile.name.clone(),
                    industry: input.industry.clone(),
                    sub_industry: input.sub_industry.clone(),
                    hq,
                    website: input.domain.clone(),
                    tier: "Prospect".to_string(),
                });
                id
            }
        };

        inner.next_report_id += 1;
        let report_id = inner.next_report_id;
        inner.reports.push(ReportRecord {
            id: report_id,
            account_id,
            domain: input.domain.clone(),
            industry: input.industry.clone(),
            sub_industry: input.sub_industry.clone(),
            hq: input.hq.clone(),
            geography: input.target_geography.clone().unwrap_or_default(),
            status: "complete".to_string(),
            summary: serde_json::to_value(&outcome.summary)
                .unwrap_or_else(|_| Value::Object(Default::default())),
            competitors: outcome.competitors.iter().map(CompetitorRow::from_card).collect(),
        });

        debug!(account_id, report_id, domain = %input.domain, "report persisted");
        Ok(PersistedReport {
            account_id,
            report_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivalscope_domain::{
        CompanyProfile, FundingInfo, ReportSummary, ThreatLevel,
    };

    fn input() -> AnalysisInput {
        AnalysisInput::new("acme.com", "Software", "CRM")
    }

    fn outcome(name: &str) -> AnalysisOutcome {
        AnalysisOutcome {
            profile: CompanyProfile {
                name: name.to_string(),
                domain: "acme.com".to_string(),
                industry: "Software".to_string(),
                sub_industry: "CRM".to_string(),
                hq: Some("Austin, USA".to_string()),
                description: None,
            },
            competitors: vec![CompetitorCard {
                funding: Some(FundingInfo {
                    round: Some("Series B".to_string()),
                    amount: Some("$25M".to_string()),
                    investors: Some(vec!["Fund".to_string()]),
                    date: Some("2025-03".to_string()),
                }),
                ..CompetitorCard::skeletal("Rival", ThreatLevel::Direct)
            }],
            summary: ReportSummary::default(),
        }
    }

    #[tokio::test]
    async fn repeated_runs_upsert_one_account_and_append_reports() {
        let store = InMemoryReportStore::new();

        let first = store.persist(&input(), &outcome("Acme")).await.unwrap();
        let second = store.persist(&input(), &outcome("Acme Inc")).await.unwrap();

        let accounts = store.accounts();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, first.account_id);
        assert_eq!(second.account_id, first.account_id);
        // The upsert refreshed the profile name.
        assert_eq!(accounts[0].name, "Acme Inc");

        let reports = store.reports();
        assert_eq!(reports.len(), 2);
        assert_ne!(reports[0].id, reports[1].id);
        assert!(reports.iter().all(|r| r.account_id == first.account_id));
    }

    #[tokio::test]
    async fn new_account_gets_prospect_tier_and_domain_website() {
        let store = InMemoryReportStore::new();
        store.persist(&input(), &outcome("Acme")).await.unwrap();

        let account = &store.accounts()[0];
        assert_eq!(account.tier, "Prospect");
        assert_eq!(account.website, "acme.com");
        // No input hq; the profile's one is used.
        assert_eq!(account.hq.as_deref(), Some("Austin, USA"));
    }

    #[tokio::test]
    async fn funding_is_flattened_into_columns() {
        let store = InMemoryReportStore::new();
        store.persist(&input(), &outcome("Acme")).await.unwrap();

        let row = &store.reports()[0].competitors[0];
        assert_eq!(row.funding_round.as_deref(), Some("Series B"));
        assert_eq!(row.funding_amount.as_deref(), Some("$25M"));
        assert_eq!(row.funding_investors, vec!["Fund"]);
        assert_eq!(row.funding_date.as_deref(), Some("2025-03"));
        assert_eq!(row.threat_level, "Direct");
        // Absent structures persist as empty blobs, not nulls.
        assert_eq!(row.key_leaders, Value::Array(vec![]));
        assert_eq!(row.swot, Value::Object(Default::default()));
    }

    #[tokio::test]
    async fn report_status_is_complete() {
        let store = InMemoryReportStore::new();
        store.persist(&input(), &outcome("Acme")).await.unwrap();
        assert_eq!(store.reports()[0].status, "complete");
    }
}
