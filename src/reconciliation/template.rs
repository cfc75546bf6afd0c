//! Draft transactions for rules that are still pending

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::config::ReconciliationConfig;
use crate::types::*;
use crate::utils::validation::validate_period;

/// Builds pre-filled transactions from rules
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    config: ReconciliationConfig,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReconciliationConfig) -> Self {
        Self { config }
    }

    /// Draft the transaction that would satisfy `rule` for `month`/`year`
    pub fn build_draft(&self, rule: &Rule, month: u32, year: i32) -> ReconcileResult<DraftTransaction> {
        validate_period(month, year, &self.config)?;

        let due_date = due_date_for(year, month, rule.due_day)?;
        let reference = format!("Ref: {:02}/{}", month, year);
        let description = match rule.default_description.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => format!("{} - {}", prefix, reference),
            _ => reference,
        };

        let supplier = match rule.kind {
            RuleKind::Product => rule.match_supplier.clone(),
            RuleKind::Service => None,
        };

        Ok(DraftTransaction {
            kind: rule.kind,
            company: rule.match_company.clone(),
            name: rule.match_text.clone(),
            supplier,
            description,
            due_date,
            amount: rule
                .estimated_amount
                .as_ref()
                .map(BigDecimal::to_string)
                .unwrap_or_default(),
        })
    }
}

/// Due date inside the month; days past the month's end land on its last day
fn due_date_for(year: i32, month: u32, due_day: u32) -> ReconcileResult<NaiveDate> {
    let mut day = due_day.clamp(1, 31);
    loop {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Ok(date);
        }
        if day <= 28 {
            return Err(ReconcileError::InvalidPeriod(format!(
                "no calendar date for {:02}/{}",
                month, year
            )));
        }
        day -= 1;
    }
}
