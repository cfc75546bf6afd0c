//! Core types and data structures for the expense checklist

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which kind of posted record a rule is reconciled against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Contracted services (utilities, telecom, rent...)
    Service,
    /// Purchased products, optionally tied to a supplier
    Product,
}

/// Recurring-expense rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Stable identifier
    pub id: String,
    /// Display name, also the final ordering tie-breaker
    pub label: String,
    /// Kind of transaction this rule is satisfied by
    pub kind: RuleKind,
    /// Company the transaction must be booked under (exact, case-insensitive)
    pub match_company: String,
    /// Text the service or product name must contain
    pub match_text: String,
    /// Text the supplier must contain (product rules only)
    #[serde(default)]
    pub match_supplier: Option<String>,
    /// Day of month used when drafting a transaction
    pub due_day: u32,
    /// Inactive rules are never handed to the engine
    #[serde(default = "default_active")]
    pub active: bool,
    /// When set, the transaction description must contain this text
    #[serde(default)]
    pub default_description: Option<String>,
    /// Expected monthly amount, informational only
    #[serde(default)]
    pub estimated_amount: Option<BigDecimal>,
}

fn default_active() -> bool {
    true
}

impl Rule {
    /// Create an active rule with no optional constraints
    pub fn new(
        id: String,
        label: String,
        kind: RuleKind,
        match_company: String,
        match_text: String,
        due_day: u32,
    ) -> Self {
        Self {
            id,
            label,
            kind,
            match_company,
            match_text,
            match_supplier: None,
            due_day,
            active: true,
            default_description: None,
            estimated_amount: None,
        }
    }

    /// Require the transaction description to contain `description`
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.default_description = Some(description.into());
        self
    }

    /// Require the transaction supplier to contain `supplier`
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.match_supplier = Some(supplier.into());
        self
    }

    /// Attach an estimated monthly amount
    pub fn with_estimated_amount(mut self, amount: BigDecimal) -> Self {
        self.estimated_amount = Some(amount);
        self
    }

    /// Mark the rule inactive
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether a description constraint is present. Only a missing or
    /// empty description means no constraint; whitespace still requires the
    /// transaction to carry a description.
    pub fn has_description_filter(&self) -> bool {
        self.default_description
            .as_deref()
            .is_some_and(|d| !d.is_empty())
    }
}

/// Posted service record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTransaction {
    pub id: String,
    #[serde(default)]
    pub company: Option<String>,
    /// Service name, usually carrying free-text suffixes
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub service_description: Option<String>,
    /// `DD/MM/YYYY` or `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub solicitation_date: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Posted product record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTransaction {
    pub id: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub product_info: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    /// `DD/MM/YYYY` or `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<String>,
    /// Date of the purchase request (SC)
    #[serde(default)]
    pub sc_date: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Posted transaction of either kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transaction {
    Service(ServiceTransaction),
    Product(ProductTransaction),
}

impl Transaction {
    pub fn id(&self) -> &str {
        match self {
            Transaction::Service(s) => &s.id,
            Transaction::Product(p) => &p.id,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Transaction::Service(_) => RuleKind::Service,
            Transaction::Product(_) => RuleKind::Product,
        }
    }

    pub fn company(&self) -> Option<&str> {
        match self {
            Transaction::Service(s) => s.company.as_deref(),
            Transaction::Product(p) => p.company.as_deref(),
        }
    }

    /// Service name or product name
    pub fn name(&self) -> Option<&str> {
        match self {
            Transaction::Service(s) => s.service.as_deref(),
            Transaction::Product(p) => p.product.as_deref(),
        }
    }

    /// Service description or product info
    pub fn description(&self) -> Option<&str> {
        match self {
            Transaction::Service(s) => s.service_description.as_deref(),
            Transaction::Product(p) => p.product_info.as_deref(),
        }
    }

    pub fn supplier(&self) -> Option<&str> {
        match self {
            Transaction::Service(_) => None,
            Transaction::Product(p) => p.supplier.as_deref(),
        }
    }

    /// Date used for reconciliation: the due date when filled in,
    /// otherwise the kind-specific fallback (solicitation or SC date)
    pub fn reference_date(&self) -> Option<&str> {
        let (due, fallback) = match self {
            Transaction::Service(s) => (s.due_date.as_deref(), s.solicitation_date.as_deref()),
            Transaction::Product(p) => (p.due_date.as_deref(), p.sc_date.as_deref()),
        };
        due.filter(|d| !d.trim().is_empty())
            .or_else(|| fallback.filter(|d| !d.trim().is_empty()))
    }

    pub fn amount(&self) -> Option<&str> {
        match self {
            Transaction::Service(s) => s.amount.as_deref(),
            Transaction::Product(p) => p.amount.as_deref(),
        }
    }
}

/// Outcome of a rule for the requested month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChecklistStatus {
    /// Still outstanding; sorts first
    Pendente,
    /// A transaction satisfying the rule was found
    Lancado,
}

/// One checklist line: a rule and whether it was posted this month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistResult {
    /// `{rule_id}-{month}-{year}`
    pub id: String,
    pub rule: Rule,
    pub status: ChecklistStatus,
    pub matched_transaction_id: Option<String>,
    pub matched_transaction: Option<Transaction>,
}

impl ChecklistResult {
    /// Build a result id for a rule and period
    pub fn result_id(rule_id: &str, month: u32, year: i32) -> String {
        format!("{}-{}-{}", rule_id, month, year)
    }

    pub fn pending(rule: Rule, month: u32, year: i32) -> Self {
        Self {
            id: Self::result_id(&rule.id, month, year),
            rule,
            status: ChecklistStatus::Pendente,
            matched_transaction_id: None,
            matched_transaction: None,
        }
    }

    pub fn posted(rule: Rule, transaction: Transaction, month: u32, year: i32) -> Self {
        Self {
            id: Self::result_id(&rule.id, month, year),
            rule,
            status: ChecklistStatus::Lancado,
            matched_transaction_id: Some(transaction.id().to_string()),
            matched_transaction: Some(transaction),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ChecklistStatus::Pendente
    }
}

/// Pre-filled transaction for a pending rule, not yet stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTransaction {
    pub kind: RuleKind,
    pub company: String,
    /// Service name or product name
    pub name: String,
    /// Product drafts only
    pub supplier: Option<String>,
    pub description: String,
    pub due_date: NaiveDate,
    pub amount: String,
}

impl DraftTransaction {
    /// Turn the draft into a stored transaction with the given id.
    /// The due date is written as `YYYY-MM-DD`.
    pub fn into_transaction(self, id: String) -> Transaction {
        let due_date = Some(self.due_date.format("%Y-%m-%d").to_string());
        match self.kind {
            RuleKind::Service => Transaction::Service(ServiceTransaction {
                id,
                company: Some(self.company),
                service: Some(self.name),
                service_description: Some(self.description),
                due_date,
                solicitation_date: None,
                amount: Some(self.amount),
            }),
            RuleKind::Product => Transaction::Product(ProductTransaction {
                id,
                company: Some(self.company),
                product: Some(self.name),
                product_info: Some(self.description),
                supplier: self.supplier,
                due_date,
                sc_date: None,
                amount: Some(self.amount),
            }),
        }
    }
}

/// Counts for one month's checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub month: u32,
    pub year: i32,
    pub total: usize,
    pub lancado: usize,
    pub pendente: usize,
    /// Sum of estimated amounts of pending rules
    pub estimated_pending_amount: BigDecimal,
}

impl ChecklistSummary {
    pub fn from_results(results: &[ChecklistResult], month: u32, year: i32) -> Self {
        let pendente = results.iter().filter(|r| r.is_pending()).count();
        let estimated_pending_amount = results
            .iter()
            .filter(|r| r.is_pending())
            .filter_map(|r| r.rule.estimated_amount.as_ref())
            .sum();
        Self {
            month,
            year,
            total: results.len(),
            lancado: results.len() - pendente,
            pendente,
            estimated_pending_amount,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pendente == 0
    }
}

/// Errors that can occur while reconciling or posting
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Rule not found: {0}")]
    RuleNotFound(String),
    #[error("Rule already posted: {0}")]
    AlreadyPosted(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for checklist operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn service(due: Option<&str>, solicitation: Option<&str>) -> Transaction {
        Transaction::Service(ServiceTransaction {
            id: "s1".to_string(),
            due_date: due.map(str::to_string),
            solicitation_date: solicitation.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn test_reference_date_prefers_due_date() {
        let txn = service(Some("10/03/2024"), Some("01/02/2024"));
        assert_eq!(txn.reference_date(), Some("10/03/2024"));
    }

    #[test]
    fn test_reference_date_falls_back_when_blank() {
        let txn = service(Some("  "), Some("01/02/2024"));
        assert_eq!(txn.reference_date(), Some("01/02/2024"));

        let txn = service(None, None);
        assert_eq!(txn.reference_date(), None);
    }

    #[test]
    fn test_product_fields() {
        let txn = Transaction::Product(ProductTransaction {
            id: "p1".to_string(),
            product: Some("Toner".to_string()),
            product_info: Some("HP 85A".to_string()),
            supplier: Some("Kalunga".to_string()),
            sc_date: Some("2024-05-02".to_string()),
            ..Default::default()
        });
        assert_eq!(txn.kind(), RuleKind::Product);
        assert_eq!(txn.name(), Some("Toner"));
        assert_eq!(txn.description(), Some("HP 85A"));
        assert_eq!(txn.supplier(), Some("Kalunga"));
        assert_eq!(txn.reference_date(), Some("2024-05-02"));
    }

    #[test]
    fn test_summary_counts() {
        let rule = Rule::new(
            "r1".to_string(),
            "Rent".to_string(),
            RuleKind::Service,
            "Acme".to_string(),
            "rent".to_string(),
            5,
        )
        .with_estimated_amount(BigDecimal::from(1200));
        let other = Rule::new(
            "r2".to_string(),
            "Water".to_string(),
            RuleKind::Service,
            "Acme".to_string(),
            "water".to_string(),
            5,
        );
        let results = vec![
            ChecklistResult::pending(rule, 4, 2024),
            ChecklistResult::posted(other, service(Some("05/04/2024"), None), 4, 2024),
        ];

        let summary = ChecklistSummary::from_results(&results, 4, 2024);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.pendente, 1);
        assert_eq!(summary.lancado, 1);
        assert_eq!(summary.estimated_pending_amount, BigDecimal::from(1200));
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_status_serializes_upper_case() {
        let json = serde_json::to_string(&ChecklistStatus::Pendente).unwrap();
        assert_eq!(json, "\"PENDENTE\"");
        let json = serde_json::to_string(&ChecklistStatus::Lancado).unwrap();
        assert_eq!(json, "\"LANCADO\"");
    }
}
