//! Modeling row: the terminal joined record handed to the econometric model.

use super::category::CategoryCounts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One trading day of the final modeling dataset.
///
/// Only produced for days present in both the return set and the daily
/// sentiment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelingRow {
    pub trading_day: NaiveDate,
    pub adj_return: f64,
    pub volume: u64,
    /// ln(ratio); `None` when the ratio is non-positive or non-finite.
    pub log_fundamentals: BTreeMap<String, Option<f64>>,
    pub composite_index: i64,
    pub counts: CategoryCounts,
}
