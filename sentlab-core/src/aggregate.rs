//! Daily aggregation of per-document scores.
//!
//! Per-day counts are the element-wise sum of every document vector for that
//! day. Days without documents produce no record. Partial aggregators built
//! on disjoint document subsets can be merged in any order and yield the same
//! result as a single pass.

use crate::domain::{CategoryCounts, DailySentiment, ScoredDocument};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DayTotals {
    documents: u64,
    counts: CategoryCounts,
}

/// Accumulates scored documents into per-day totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyAggregator {
    days: BTreeMap<NaiveDate, DayTotals>,
}

impl DailyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, trading_day: NaiveDate, counts: &CategoryCounts) {
        let totals = self.days.entry(trading_day).or_default();
        totals.documents += 1;
        totals.counts += counts;
    }

    pub fn add_scored(&mut self, scored: &ScoredDocument) {
        self.add(scored.trading_day, &scored.counts);
    }

    /// Combine two partial aggregates.
    pub fn merge(mut self, other: DailyAggregator) -> DailyAggregator {
        // Fold the smaller map into the larger one.
        let (mut into, from) = if self.days.len() >= other.days.len() {
            (std::mem::take(&mut self.days), other.days)
        } else {
            (other.days, std::mem::take(&mut self.days))
        };
        for (day, totals) in from {
            let slot = into.entry(day).or_default();
            slot.documents += totals.documents;
            slot.counts += &totals.counts;
        }
        DailyAggregator { days: into }
    }

    /// Number of distinct trading days seen so far.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn document_count(&self) -> u64 {
        self.days.values().map(|t| t.documents).sum()
    }

    /// One record per day, ascending by trading day.
    pub fn finish(self) -> Vec<DailySentiment> {
        self.days
            .into_iter()
            .map(|(day, totals)| DailySentiment::from_counts(day, totals.documents, totals.counts))
            .collect()
    }
}

impl Extend<ScoredDocument> for DailyAggregator {
    fn extend<I: IntoIterator<Item = ScoredDocument>>(&mut self, iter: I) {
        for scored in iter {
            self.add_scored(&scored);
        }
    }
}

impl FromIterator<ScoredDocument> for DailyAggregator {
    fn from_iter<I: IntoIterator<Item = ScoredDocument>>(iter: I) -> Self {
        let mut agg = DailyAggregator::new();
        agg.extend(iter);
        agg
    }
}

/// Aggregate an unordered collection of scored documents.
pub fn aggregate_daily<I>(scored: I) -> Vec<DailySentiment>
where
    I: IntoIterator<Item = ScoredDocument>,
{
    scored.into_iter().collect::<DailyAggregator>().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmotionCategory;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn scored(d: u32, pos: u64, neg: u64) -> ScoredDocument {
        ScoredDocument {
            trading_day: day(d),
            counts: [(EmotionCategory::Positive, pos), (EmotionCategory::Negative, neg)]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn sums_documents_per_day() {
        let records = aggregate_daily(vec![scored(3, 1, 0), scored(2, 2, 5), scored(3, 0, 4)]);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].trading_day, day(2));
        assert_eq!(records[0].document_count, 1);
        assert_eq!(records[0].composite_index, -3);

        assert_eq!(records[1].trading_day, day(3));
        assert_eq!(records[1].document_count, 2);
        assert_eq!(records[1].positive_count, 1);
        assert_eq!(records[1].negative_count, 4);
        assert_eq!(records[1].composite_index, -3);
    }

    #[test]
    fn zero_document_days_are_omitted() {
        let records = aggregate_daily(vec![scored(2, 1, 0), scored(4, 0, 1)]);
        let days: Vec<_> = records.iter().map(|r| r.trading_day).collect();
        assert_eq!(days, vec![day(2), day(4)]);
    }

    #[test]
    fn documents_without_hits_still_create_a_day() {
        let records = aggregate_daily(vec![scored(5, 0, 0)]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].document_count, 1);
        assert!(records[0].counts.is_zero());
    }

    #[test]
    fn merge_matches_single_pass() {
        let docs = vec![scored(2, 1, 0), scored(3, 2, 1), scored(2, 0, 3), scored(4, 1, 1)];
        let single: DailyAggregator = docs.iter().copied().collect();

        let left: DailyAggregator = docs[..1].iter().copied().collect();
        let right: DailyAggregator = docs[1..].iter().copied().collect();

        assert_eq!(left.clone().merge(right.clone()), single);
        assert_eq!(right.merge(left), single);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(aggregate_daily(Vec::new()).is_empty());
    }
}
