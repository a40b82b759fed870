//! Daily sentiment record: the aggregated view of one trading day.

use super::category::{CategoryCounts, EmotionCategory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day aggregate of every document scored for that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySentiment {
    pub trading_day: NaiveDate,
    pub document_count: u64,
    pub positive_count: u64,
    pub negative_count: u64,
    /// positive_count − negative_count.
    pub composite_index: i64,
    pub counts: CategoryCounts,
}

impl DailySentiment {
    pub fn from_counts(trading_day: NaiveDate, document_count: u64, counts: CategoryCounts) -> Self {
        Self {
            trading_day,
            document_count,
            positive_count: counts.positive(),
            negative_count: counts.negative(),
            composite_index: counts.composite_index(),
            counts,
        }
    }

    /// Average count of `category` per document on this day.
    ///
    /// Returns 0.0 for a record with no documents.
    pub fn category_mean(&self, category: EmotionCategory) -> f64 {
        if self.document_count == 0 {
            return 0.0;
        }
        self.counts.get(category) as f64 / self.document_count as f64
    }
}
