//! # Expense Checklist
//!
//! Monthly reconciliation of recurring expenses: given a catalogue of
//! recurring-expense rules and the service and product transactions posted
//! in a year, work out which expenses of a month are already posted
//! (`LANCADO`) and which are still pending (`PENDENTE`).
//!
//! ## Features
//!
//! - **Specificity ordering**: rules with description filters and longer match texts pick first
//! - **Exclusive matching**: a transaction satisfies at most one rule per run
//! - **Flexible dates**: `DD/MM/YYYY` and `YYYY-MM-DD` record dates
//! - **Drafts**: pre-filled transactions for pending rules
//! - **Storage abstraction**: rules and transactions come from trait-based stores
//!
//! ## Quick Start
//!
//! ```rust
//! use expense_checklist::{ReconciliationEngine, Rule, RuleKind, ServiceTransaction, Transaction};
//!
//! let rules = vec![Rule::new(
//!     "energy".to_string(),
//!     "Energy".to_string(),
//!     RuleKind::Service,
//!     "Acme".to_string(),
//!     "energy".to_string(),
//!     10,
//! )];
//! let transactions = vec![Transaction::Service(ServiceTransaction {
//!     id: "t1".to_string(),
//!     company: Some("Acme".to_string()),
//!     service: Some("Energy Bill March".to_string()),
//!     due_date: Some("10/03/2024".to_string()),
//!     ..Default::default()
//! })];
//!
//! let results = ReconciliationEngine::new()
//!     .reconcile(&rules, &transactions, 3, 2024)
//!     .unwrap();
//! assert_eq!(results[0].matched_transaction_id.as_deref(), Some("t1"));
//! ```

pub mod config;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::ReconciliationConfig;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
