//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::Datelike;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::reconciliation::parse_record_date;
use crate::traits::*;
use crate::types::*;

/// In-memory rule and transaction store for testing and development
///
/// Clones share the same underlying data. Transactions keep their insertion
/// order, which is the order the matcher scans them in.
#[derive(Clone)]
pub struct MemoryStorage {
    rules: Arc<RwLock<HashMap<String, Rule>>>,
    transactions: Arc<RwLock<Vec<Transaction>>>,
    validator: Arc<dyn RuleValidator>,
}

fn poisoned<E>(_: E) -> ReconcileError {
    ReconcileError::Storage("memory storage lock poisoned".to_string())
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::with_validator(Arc::new(DefaultRuleValidator))
    }

    /// Create a memory storage that checks rules with `validator`
    pub fn with_validator(validator: Arc<dyn RuleValidator>) -> Self {
        Self {
            rules: Arc::new(RwLock::new(HashMap::new())),
            transactions: Arc::new(RwLock::new(Vec::new())),
            validator,
        }
    }

    /// Append a transaction as-is, keeping its id
    pub fn insert_transaction(&self, transaction: Transaction) -> ReconcileResult<()> {
        self.transactions
            .write()
            .map_err(poisoned)?
            .push(transaction);
        Ok(())
    }

    /// Every stored rule, active or not
    pub fn all_rules(&self) -> ReconcileResult<Vec<Rule>> {
        Ok(self.rules.read().map_err(poisoned)?.values().cloned().collect())
    }

    /// Every stored transaction regardless of year
    pub fn all_transactions(&self) -> ReconcileResult<Vec<Transaction>> {
        Ok(self.transactions.read().map_err(poisoned)?.clone())
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> ReconcileResult<()> {
        self.rules.write().map_err(poisoned)?.clear();
        self.transactions.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules = self.rules.read().map(|r| r.len()).unwrap_or_default();
        let transactions = self.transactions.read().map(|t| t.len()).unwrap_or_default();
        f.debug_struct("MemoryStorage")
            .field("rules", &rules)
            .field("transactions", &transactions)
            .finish()
    }
}

#[async_trait]
impl RuleStore for MemoryStorage {
    async fn active_rules(&self) -> ReconcileResult<Vec<Rule>> {
        let rules = self.rules.read().map_err(poisoned)?;
        Ok(rules.values().filter(|rule| rule.active).cloned().collect())
    }

    async fn save_rule(&mut self, rule: &Rule) -> ReconcileResult<()> {
        self.validator.validate_rule(rule)?;
        self.rules
            .write()
            .map_err(poisoned)?
            .insert(rule.id.clone(), rule.clone());
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for MemoryStorage {
    async fn transactions_for_year(&self, year: i32) -> ReconcileResult<Vec<Transaction>> {
        let transactions = self.transactions.read().map_err(poisoned)?;
        let filtered: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| {
                txn.reference_date()
                    .and_then(parse_record_date)
                    .is_some_and(|date| date.year() == year)
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn create_transaction(
        &mut self,
        draft: DraftTransaction,
    ) -> ReconcileResult<Transaction> {
        let transaction = draft.into_transaction(uuid::Uuid::new_v4().to_string());
        self.transactions
            .write()
            .map_err(poisoned)?
            .push(transaction.clone());
        Ok(transaction)
    }
}
