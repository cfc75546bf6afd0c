//! Recurring-expense reconciliation
//!
//! Rules are matched against a year's posted transactions to decide, for a
//! month, which expenses were already posted and which are still pending.

pub mod checklist;
pub mod engine;
pub mod normalize;
pub mod template;

pub use checklist::*;
pub use engine::ReconciliationEngine;
pub use normalize::{label_key, label_order, normalize, parse_record_date, record_month};
pub use template::TemplateBuilder;
