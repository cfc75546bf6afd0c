//! Monthly checklist orchestrator that coordinates the stores and the engine

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::ReconciliationConfig;
use crate::reconciliation::{ReconciliationEngine, TemplateBuilder};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_period;

/// Checklist for one month of a yearly overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthChecklist {
    pub summary: ChecklistSummary,
    pub results: Vec<ChecklistResult>,
}

/// Recurring-expense checklist backed by a rule store and a transaction store
pub struct MonthlyChecklist<R: RuleStore, T: TransactionStore> {
    rules: R,
    transactions: T,
    engine: ReconciliationEngine,
    templates: TemplateBuilder,
}

impl<R: RuleStore, T: TransactionStore> MonthlyChecklist<R, T> {
    /// Create a checklist with the default configuration
    pub fn new(rules: R, transactions: T) -> Self {
        Self::with_config(rules, transactions, ReconciliationConfig::default())
    }

    /// Create a checklist with a custom configuration
    pub fn with_config(rules: R, transactions: T, config: ReconciliationConfig) -> Self {
        Self {
            rules,
            transactions,
            engine: ReconciliationEngine::with_config(config.clone()),
            templates: TemplateBuilder::with_config(config),
        }
    }

    pub fn rule_store(&self) -> &R {
        &self.rules
    }

    pub fn transaction_store(&self) -> &T {
        &self.transactions
    }

    async fn load(&self, year: i32) -> ReconcileResult<(Vec<Rule>, Vec<Transaction>)> {
        futures::try_join!(
            self.rules.active_rules(),
            self.transactions.transactions_for_year(year)
        )
    }

    /// Reconcile active rules against the year's transactions for `month`
    #[instrument(skip(self))]
    pub async fn checklist(&self, month: u32, year: i32) -> ReconcileResult<Vec<ChecklistResult>> {
        validate_period(month, year, self.engine.config())?;
        let (rules, transactions) = self.load(year).await?;
        self.engine.reconcile(&rules, &transactions, month, year)
    }

    /// Checklist together with its counts
    #[instrument(skip(self))]
    pub async fn summary(&self, month: u32, year: i32) -> ReconcileResult<MonthChecklist> {
        let results = self.checklist(month, year).await?;
        Ok(MonthChecklist {
            summary: ChecklistSummary::from_results(&results, month, year),
            results,
        })
    }

    /// Reconcile all twelve months of `year` from a single fetch.
    /// Each month is an independent run with its own consumed set.
    #[instrument(skip(self))]
    pub async fn year_overview(&self, year: i32) -> ReconcileResult<Vec<MonthChecklist>> {
        validate_period(1, year, self.engine.config())?;
        let (rules, transactions) = self.load(year).await?;

        (1..=12)
            .map(|month| -> ReconcileResult<MonthChecklist> {
                let results = self.engine.reconcile(&rules, &transactions, month, year)?;
                Ok(MonthChecklist {
                    summary: ChecklistSummary::from_results(&results, month, year),
                    results,
                })
            })
            .collect()
    }

    /// Draft the transaction for a pending rule without storing it
    pub async fn draft_for(
        &self,
        rule_id: &str,
        month: u32,
        year: i32,
    ) -> ReconcileResult<DraftTransaction> {
        let rule = self.active_rule(rule_id).await?;
        self.templates.build_draft(&rule, month, year)
    }

    /// Post a pending rule: store its drafted transaction and return the
    /// refreshed checklist
    #[instrument(skip(self))]
    pub async fn post_pending(
        &mut self,
        rule_id: &str,
        month: u32,
        year: i32,
    ) -> ReconcileResult<Vec<ChecklistResult>> {
        let current = self.checklist(month, year).await?;
        let item = current
            .iter()
            .find(|r| r.rule.id == rule_id)
            .ok_or_else(|| {
                warn!(rule_id, "Cannot post unknown or inactive rule");
                ReconcileError::RuleNotFound(rule_id.to_string())
            })?;

        if !item.is_pending() {
            warn!(rule_id, month, year, "Rule already posted for this month");
            return Err(ReconcileError::AlreadyPosted(item.id.clone()));
        }

        let draft = self.templates.build_draft(&item.rule, month, year)?;
        let created = self.transactions.create_transaction(draft).await?;
        info!(rule_id, transaction_id = created.id(), "Posted pending rule");

        self.checklist(month, year).await
    }

    async fn active_rule(&self, rule_id: &str) -> ReconcileResult<Rule> {
        self.rules
            .active_rules()
            .await?
            .into_iter()
            .find(|r| r.id == rule_id)
            .ok_or_else(|| ReconcileError::RuleNotFound(rule_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    async fn seeded() -> MonthlyChecklist<MemoryStorage, MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage
            .save_rule(&Rule::new(
                "energy".to_string(),
                "Energy".to_string(),
                RuleKind::Service,
                "Acme".to_string(),
                "energy".to_string(),
                10,
            ))
            .await
            .unwrap();
        storage.insert_transaction(Transaction::Service(ServiceTransaction {
            id: "t1".to_string(),
            company: Some("Acme".to_string()),
            service: Some("Energy Bill March".to_string()),
            due_date: Some("10/03/2024".to_string()),
            ..Default::default()
        }))
        .unwrap();
        MonthlyChecklist::new(storage.clone(), storage)
    }

    #[tokio::test]
    async fn test_checklist_end_to_end() {
        let checklist = seeded().await;

        let results = checklist.checklist(3, 2024).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ChecklistStatus::Lancado);
        assert_eq!(results[0].matched_transaction_id.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_post_pending_marks_rule_posted() {
        let mut checklist = seeded().await;

        let before = checklist.checklist(4, 2024).await.unwrap();
        assert!(before[0].is_pending());

        let after = checklist.post_pending("energy", 4, 2024).await.unwrap();
        assert_eq!(after[0].status, ChecklistStatus::Lancado);

        let err = checklist.post_pending("energy", 4, 2024).await.unwrap_err();
        assert!(matches!(err, ReconcileError::AlreadyPosted(_)));
    }

    #[tokio::test]
    async fn test_post_unknown_rule() {
        let mut checklist = seeded().await;
        let err = checklist.post_pending("water", 4, 2024).await.unwrap_err();
        assert!(matches!(err, ReconcileError::RuleNotFound(_)));
    }

    #[tokio::test]
    async fn test_year_overview() {
        let checklist = seeded().await;
        let months = checklist.year_overview(2024).await.unwrap();

        assert_eq!(months.len(), 12);
        let posted: Vec<u32> = months
            .iter()
            .filter(|m| m.summary.is_complete())
            .map(|m| m.summary.month)
            .collect();
        assert_eq!(posted, vec![3]);
    }

    #[tokio::test]
    async fn test_draft_for() {
        let checklist = seeded().await;
        let draft = checklist.draft_for("energy", 5, 2024).await.unwrap();
        assert_eq!(draft.description, "Ref: 05/2024");
        assert_eq!(draft.name, "energy");
    }
}
