//! Price, return and fundamentals records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ratio name → value. `BTreeMap` keeps column order deterministic on export.
pub type Fundamentals = BTreeMap<String, f64>;

/// Daily price observation for the studied instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub trading_day: NaiveDate,
    pub adjusted_close: f64,
    pub volume: u64,
    /// Point-in-time fundamentals known on `trading_day` (possibly empty).
    #[serde(default)]
    pub fundamentals: Fundamentals,
}

impl PriceRecord {
    pub fn new(trading_day: NaiveDate, adjusted_close: f64, volume: u64) -> Self {
        Self {
            trading_day,
            adjusted_close,
            volume,
            fundamentals: Fundamentals::new(),
        }
    }
}

/// Log return for one trading day, carrying the day's price context so the
/// merger can emit volume and fundamentals without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub trading_day: NaiveDate,
    /// ln(close_t / close_{t-1})
    pub adj_return: f64,
    pub adjusted_close: f64,
    pub volume: u64,
    #[serde(default)]
    pub fundamentals: Fundamentals,
}

impl ReturnRecord {
    /// Arithmetic return equivalent of `adj_return`.
    pub fn simple_return(&self) -> f64 {
        self.adj_return.exp_m1()
    }
}

/// One point-in-time fundamentals release (e.g. a quarterly ratio snapshot).
///
/// A ratio absent from `values` was not reported in this release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalRelease {
    pub release_date: NaiveDate,
    pub values: Fundamentals,
}
