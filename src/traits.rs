//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Source of recurring-expense rules
///
/// Implementations only hand out active rules; the engine never filters
/// on `active` itself.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// All rules currently marked active
    async fn active_rules(&self) -> ReconcileResult<Vec<Rule>>;

    /// Insert or replace a rule
    async fn save_rule(&mut self, rule: &Rule) -> ReconcileResult<()>;
}

/// Source and sink of posted transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Every service and product transaction recorded for `year`,
    /// each tagged with its kind
    async fn transactions_for_year(&self, year: i32) -> ReconcileResult<Vec<Transaction>>;

    /// Store a drafted transaction, returning it with its assigned id
    async fn create_transaction(&mut self, draft: DraftTransaction)
        -> ReconcileResult<Transaction>;
}

/// Trait for implementing custom rule validation
pub trait RuleValidator: Send + Sync {
    /// Validate a rule before saving
    fn validate_rule(&self, rule: &Rule) -> ReconcileResult<()>;
}

/// Default rule validator with basic field checks
pub struct DefaultRuleValidator;

impl RuleValidator for DefaultRuleValidator {
    fn validate_rule(&self, rule: &Rule) -> ReconcileResult<()> {
        crate::utils::validation::validate_rule_fields(rule)
    }
}
