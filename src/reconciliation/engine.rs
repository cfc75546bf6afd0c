//! Matching of recurring-expense rules against posted transactions

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::ReconciliationConfig;
use crate::reconciliation::normalize::{label_order, normalize, record_month};
use crate::types::*;
use crate::utils::validation::validate_period;

/// Transaction reduced to the fields the matcher compares
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchCandidate {
    pub kind: RuleKind,
    pub company: String,
    pub name: String,
    pub description: String,
    pub supplier: String,
    /// `None` when the reference date is missing or unparseable
    pub month: Option<u32>,
}

impl MatchCandidate {
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            kind: transaction.kind(),
            company: normalize(transaction.company()),
            name: normalize(transaction.name()),
            description: normalize(transaction.description()),
            supplier: normalize(transaction.supplier()),
            month: record_month(transaction.reference_date()),
        }
    }
}

/// Normalized rule criteria
#[derive(Debug, Clone)]
struct RuleCriteria {
    kind: RuleKind,
    company: String,
    text: String,
    description: Option<String>,
    supplier: Option<String>,
}

impl RuleCriteria {
    fn from_rule(rule: &Rule) -> Self {
        let description = rule
            .has_description_filter()
            .then(|| normalize(rule.default_description.as_deref()));
        let supplier = match rule.kind {
            RuleKind::Product => {
                Some(normalize(rule.match_supplier.as_deref())).filter(|s| !s.is_empty())
            }
            RuleKind::Service => None,
        };
        Self {
            kind: rule.kind,
            company: normalize(Some(rule.match_company.as_str())),
            text: normalize(Some(rule.match_text.as_str())),
            description,
            supplier,
        }
    }

    fn matches(&self, candidate: &MatchCandidate, month: u32) -> bool {
        if candidate.kind != self.kind || candidate.month != Some(month) {
            return false;
        }
        if candidate.company != self.company || !candidate.name.contains(&self.text) {
            return false;
        }
        if let Some(ref description) = self.description {
            if candidate.description.is_empty() || !candidate.description.contains(description) {
                return false;
            }
        }
        if let Some(ref supplier) = self.supplier {
            if !candidate.supplier.contains(supplier) {
                return false;
            }
        }
        true
    }
}

/// Specificity order: description filter first, then longer match text,
/// then label
pub(crate) fn specificity_order(a: &Rule, b: &Rule) -> Ordering {
    b.has_description_filter()
        .cmp(&a.has_description_filter())
        .then_with(|| {
            let a_len = normalize(Some(a.match_text.as_str())).chars().count();
            let b_len = normalize(Some(b.match_text.as_str())).chars().count();
            b_len.cmp(&a_len)
        })
        .then_with(|| label_order(&a.label, &b.label))
}

/// Presentation order: pending first, then label
pub(crate) fn checklist_order(a: &ChecklistResult, b: &ChecklistResult) -> Ordering {
    a.status
        .cmp(&b.status)
        .then_with(|| label_order(&a.rule.label, &b.rule.label))
}

/// Monthly reconciliation of recurring-expense rules
///
/// The engine holds no state between calls; each run tracks its own set of
/// consumed transactions, so runs for different months may proceed in
/// parallel.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    config: ReconciliationConfig,
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReconciliationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Decide, for `month`/`year`, which rules are posted and which pending.
    ///
    /// `rules` should already be limited to active rules and `transactions`
    /// to the requested year. Rules claim transactions greedily in
    /// specificity order; a claimed transaction is never reused. Records
    /// with unusable data simply fail to match. Only an invalid period is
    /// an error.
    pub fn reconcile(
        &self,
        rules: &[Rule],
        transactions: &[Transaction],
        month: u32,
        year: i32,
    ) -> ReconcileResult<Vec<ChecklistResult>> {
        validate_period(month, year, &self.config)?;

        let candidates: Vec<MatchCandidate> = transactions
            .iter()
            .map(MatchCandidate::from_transaction)
            .collect();

        for (transaction, candidate) in transactions.iter().zip(&candidates) {
            if candidate.month.is_none() {
                debug!(
                    transaction_id = transaction.id(),
                    date = ?transaction.reference_date(),
                    "Transaction has no usable date, skipping"
                );
            }
        }

        let mut ordered: Vec<&Rule> = rules.iter().collect();
        ordered.sort_by(|a, b| specificity_order(a, b));

        let mut consumed: HashSet<usize> = HashSet::new();
        let mut results = Vec::with_capacity(ordered.len());

        for rule in ordered {
            let criteria = RuleCriteria::from_rule(rule);
            let found = candidates
                .iter()
                .enumerate()
                .find(|(index, candidate)| {
                    !consumed.contains(index) && criteria.matches(candidate, month)
                })
                .map(|(index, _)| index);

            match found {
                Some(index) => {
                    consumed.insert(index);
                    let transaction = transactions[index].clone();
                    debug!(
                        rule_id = %rule.id,
                        transaction_id = transaction.id(),
                        "Rule matched"
                    );
                    results.push(ChecklistResult::posted(
                        rule.clone(),
                        transaction,
                        month,
                        year,
                    ));
                }
                None => {
                    debug!(rule_id = %rule.id, "Rule pending");
                    results.push(ChecklistResult::pending(rule.clone(), month, year));
                }
            }
        }

        results.sort_by(checklist_order);

        info!(
            month,
            year,
            rules = rules.len(),
            transactions = transactions.len(),
            lancado = consumed.len(),
            pendente = results.len() - consumed.len(),
            "Reconciliation complete"
        );

        Ok(results)
    }
}
