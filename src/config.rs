//! Configuration for reconciliation runs

use serde::{Deserialize, Serialize};
use std::env;

/// Bounds applied to requested periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationConfig {
    /// Earliest year a checklist may be requested for
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    /// Latest year a checklist may be requested for
    #[serde(default = "default_max_year")]
    pub max_year: i32,
}

fn default_min_year() -> i32 {
    2000
}

fn default_max_year() -> i32 {
    2100
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
        }
    }
}

impl ReconciliationConfig {
    /// Read `CHECKLIST_MIN_YEAR` / `CHECKLIST_MAX_YEAR`, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            min_year: env::var("CHECKLIST_MIN_YEAR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_min_year),
            max_year: env::var("CHECKLIST_MAX_YEAR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_year),
        }
    }

    pub fn accepts_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}
