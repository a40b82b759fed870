//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Scorer counting: per-category counts equal the tagged-token multiset
//! 2. Aggregation: partial aggregates merge to the single-pass result
//! 3. Returns: every return reproduces its close from the previous one
//! 4. Merge: output days are exactly the shared days, ascending
//! 5. Fundamentals: no trading day sees a release dated after it

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use sentlab_core::domain::{
    CategoryCounts, DailySentiment, EmotionCategory, FundamentalRelease, Fundamentals, PriceRecord,
    ReturnRecord, ScoredDocument,
};
use sentlab_core::{
    aggregate_daily, attach_fundamentals, compute_returns, merge_datasets, score_tokens,
    DailyAggregator, Lexicon,
};
use std::collections::BTreeSet;

// ── Strategies (proptest) ────────────────────────────────────────────

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn arb_category() -> impl Strategy<Value = EmotionCategory> {
    (0..EmotionCategory::COUNT).prop_map(|i| EmotionCategory::ALL[i])
}

fn arb_counts() -> impl Strategy<Value = CategoryCounts> {
    proptest::collection::vec((arb_category(), 0u64..20), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_scored() -> impl Strategy<Value = ScoredDocument> {
    (0i64..30, arb_counts()).prop_map(|(offset, counts)| ScoredDocument {
        trading_day: base_day() + Duration::days(offset),
        counts,
    })
}

fn arb_day_set() -> impl Strategy<Value = BTreeSet<i64>> {
    proptest::collection::btree_set(0i64..60, 0..40)
}

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(1.0..1000.0_f64, 2..60)
}

const VOCAB: &[&str] = &["good", "bad", "happy", "angry", "tesla", "car", "crash", "love"];

fn test_lexicon() -> Lexicon {
    Lexicon::from_pairs([
        ("good", EmotionCategory::Positive),
        ("bad", EmotionCategory::Negative),
        ("happy", EmotionCategory::Joy),
        ("happy", EmotionCategory::Positive),
        ("angry", EmotionCategory::Anger),
        ("angry", EmotionCategory::Negative),
        ("crash", EmotionCategory::Fear),
        ("love", EmotionCategory::Joy),
    ])
}

// ── 1. Scorer Counting ───────────────────────────────────────────────

proptest! {
    /// For every category, the count equals the number of token occurrences
    /// whose lexicon entry carries that category.
    #[test]
    fn score_counts_match_token_multiset(idx in proptest::collection::vec(0..VOCAB.len(), 0..50)) {
        let lexicon = test_lexicon();
        let tokens: Vec<&str> = idx.iter().map(|&i| VOCAB[i]).collect();
        let counts = score_tokens(&tokens, &lexicon);

        for cat in EmotionCategory::ALL {
            let expected = tokens
                .iter()
                .filter(|t| lexicon.lookup(t).is_some_and(|set| set.contains(cat)))
                .count() as u64;
            prop_assert_eq!(counts.get(cat), expected);
        }
        prop_assert_eq!(counts.composite_index(), counts.positive() as i64 - counts.negative() as i64);
    }

    /// Scoring is order-independent.
    #[test]
    fn score_is_permutation_invariant(idx in proptest::collection::vec(0..VOCAB.len(), 0..50)) {
        let lexicon = test_lexicon();
        let tokens: Vec<&str> = idx.iter().map(|&i| VOCAB[i]).collect();
        let mut reversed = tokens.clone();
        reversed.reverse();
        prop_assert_eq!(score_tokens(&tokens, &lexicon), score_tokens(&reversed, &lexicon));
    }
}

// ── 2. Aggregation ───────────────────────────────────────────────────

proptest! {
    /// Splitting the documents anywhere and merging partials equals one pass,
    /// whichever side is merged into which.
    #[test]
    fn partial_aggregates_merge_to_single_pass(
        docs in proptest::collection::vec(arb_scored(), 0..80),
        split in 0usize..80,
    ) {
        let split = split.min(docs.len());
        let whole = aggregate_daily(docs.iter().copied());

        let left: DailyAggregator = docs[..split].iter().copied().collect();
        let right: DailyAggregator = docs[split..].iter().copied().collect();
        prop_assert_eq!(&left.clone().merge(right.clone()).finish(), &whole);
        prop_assert_eq!(&right.merge(left).finish(), &whole);
    }

    /// Each day's totals are the sum of its documents; days are unique and
    /// ascending.
    #[test]
    fn daily_totals_sum_documents(docs in proptest::collection::vec(arb_scored(), 0..80)) {
        let daily = aggregate_daily(docs.iter().copied());

        for pair in daily.windows(2) {
            prop_assert!(pair[0].trading_day < pair[1].trading_day);
        }
        for rec in &daily {
            let mut expected = CategoryCounts::new();
            let mut n = 0;
            for d in docs.iter().filter(|d| d.trading_day == rec.trading_day) {
                expected += &d.counts;
                n += 1;
            }
            prop_assert_eq!(rec.counts, expected);
            prop_assert_eq!(rec.document_count, n);
            prop_assert_eq!(rec.composite_index, rec.positive_count as i64 - rec.negative_count as i64);
        }
        let days: BTreeSet<_> = docs.iter().map(|d| d.trading_day).collect();
        prop_assert_eq!(daily.len(), days.len());
    }
}

// ── 3. Returns ───────────────────────────────────────────────────────

proptest! {
    /// exp(adj_return_t) * close_{t-1} reproduces close_t.
    #[test]
    fn returns_reconstruct_closes(closes in arb_closes()) {
        let prices: Vec<PriceRecord> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceRecord::new(base_day() + Duration::days(i as i64), c, 1))
            .collect();
        let returns = compute_returns(&prices).unwrap();

        prop_assert_eq!(returns.len(), prices.len() - 1);
        for (i, r) in returns.iter().enumerate() {
            prop_assert_eq!(r.trading_day, prices[i + 1].trading_day);
            let rebuilt = r.adj_return.exp() * prices[i].adjusted_close;
            prop_assert!((rebuilt - prices[i + 1].adjusted_close).abs() < 1e-9 * prices[i + 1].adjusted_close);
        }
    }

    /// Log returns telescope: their sum is ln(last / first).
    #[test]
    fn returns_telescope(closes in arb_closes()) {
        let prices: Vec<PriceRecord> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceRecord::new(base_day() + Duration::days(i as i64 * 3), c, 1))
            .collect();
        let total: f64 = compute_returns(&prices).unwrap().iter().map(|r| r.adj_return).sum();
        let expected = (closes[closes.len() - 1] / closes[0]).ln();
        prop_assert!((total - expected).abs() < 1e-9);
    }
}

// ── 4. Merge ─────────────────────────────────────────────────────────

proptest! {
    /// Output days are the intersection of the input days, ascending, and
    /// never more than the smaller input.
    #[test]
    fn merge_is_inner_join(sent_days in arb_day_set(), ret_days in arb_day_set()) {
        let sentiment: Vec<DailySentiment> = sent_days
            .iter()
            .map(|&o| DailySentiment::from_counts(base_day() + Duration::days(o), 1, CategoryCounts::new()))
            .collect();
        let returns: Vec<ReturnRecord> = ret_days
            .iter()
            .map(|&o| ReturnRecord {
                trading_day: base_day() + Duration::days(o),
                adj_return: o as f64 / 100.0,
                adjusted_close: 1.0,
                volume: 0,
                fundamentals: Fundamentals::new(),
            })
            .collect();

        let rows = merge_datasets(&sentiment, &returns).unwrap();
        let expected: Vec<NaiveDate> = sent_days
            .intersection(&ret_days)
            .map(|&o| base_day() + Duration::days(o))
            .collect();
        let got: Vec<NaiveDate> = rows.iter().map(|r| r.trading_day).collect();

        prop_assert!(rows.len() <= sentiment.len().min(returns.len()));
        prop_assert_eq!(got, expected);
    }
}

// ── 5. Fundamentals ──────────────────────────────────────────────────

proptest! {
    /// Every filled value equals the latest release on or before the day.
    #[test]
    fn fundamentals_never_look_ahead(
        release_offsets in proptest::collection::vec((0i64..90, 1.0..100.0_f64), 0..10),
        price_count in 1usize..90,
    ) {
        let releases: Vec<FundamentalRelease> = release_offsets
            .iter()
            .map(|&(o, v)| FundamentalRelease {
                release_date: base_day() + Duration::days(o),
                values: [("P_E_TTM".to_string(), v)].into_iter().collect(),
            })
            .collect();
        let mut prices: Vec<PriceRecord> = (0..price_count)
            .map(|i| PriceRecord::new(base_day() + Duration::days(i as i64), 10.0, 1))
            .collect();

        attach_fundamentals(&mut prices, &releases);

        for price in &prices {
            // Latest eligible release; among same-date releases the last in input wins.
            let mut eligible: Vec<&FundamentalRelease> = releases
                .iter()
                .filter(|r| r.release_date <= price.trading_day)
                .collect();
            eligible.sort_by_key(|r| r.release_date);
            let expected = eligible.last().map(|r| r.values["P_E_TTM"]);
            prop_assert_eq!(price.fundamentals.get("P_E_TTM").copied(), expected);
        }
    }
}
