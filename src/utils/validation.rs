//! Validation utilities

use crate::config::ReconciliationConfig;
use crate::traits::*;
use crate::types::*;

/// Validate a requested month/year pair
pub fn validate_period(month: u32, year: i32, config: &ReconciliationConfig) -> ReconcileResult<()> {
    if !(1..=12).contains(&month) {
        return Err(ReconcileError::InvalidPeriod(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }

    if !config.accepts_year(year) {
        return Err(ReconcileError::InvalidPeriod(format!(
            "year must be between {} and {}, got {}",
            config.min_year, config.max_year, year
        )));
    }

    Ok(())
}

/// Validate that a due day can exist in some month
pub fn validate_due_day(due_day: u32) -> ReconcileResult<()> {
    if !(1..=31).contains(&due_day) {
        return Err(ReconcileError::Validation(format!(
            "Due day must be between 1 and 31, got {}",
            due_day
        )));
    }
    Ok(())
}

/// Field checks shared by the rule validators
pub fn validate_rule_fields(rule: &Rule) -> ReconcileResult<()> {
    if rule.id.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Rule ID cannot be empty".to_string(),
        ));
    }

    if rule.label.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Rule label cannot be empty".to_string(),
        ));
    }

    if rule.match_company.trim().is_empty() {
        return Err(ReconcileError::Validation(format!(
            "Rule '{}' must name a company to match",
            rule.id
        )));
    }

    // An empty match text would accept every transaction of the company
    if rule.match_text.trim().is_empty() {
        return Err(ReconcileError::Validation(format!(
            "Rule '{}' must have a match text",
            rule.id
        )));
    }

    validate_due_day(rule.due_day)
}

/// Rule validator that also rejects supplier filters on service rules
pub struct StrictRuleValidator;

impl RuleValidator for StrictRuleValidator {
    fn validate_rule(&self, rule: &Rule) -> ReconcileResult<()> {
        validate_rule_fields(rule)?;

        if rule.kind == RuleKind::Service && rule.match_supplier.is_some() {
            return Err(ReconcileError::Validation(format!(
                "Rule '{}' is a service rule and cannot filter on supplier",
                rule.id
            )));
        }

        Ok(())
    }
}
