//! Document: one piece of social text attributed to a trading day.

use super::category::CategoryCounts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw document as supplied by the social-text collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_id: String,
    pub trading_day: NaiveDate,
    pub raw_text: String,
}

impl DocumentRecord {
    pub fn new(
        document_id: impl Into<String>,
        trading_day: NaiveDate,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            trading_day,
            raw_text: raw_text.into(),
        }
    }
}

/// Scorer output for one document, keyed by its trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDocument {
    pub trading_day: NaiveDate,
    pub counts: CategoryCounts,
}
