//! Point-in-time fundamentals alignment.
//!
//! Quarterly ratio releases are forward-filled onto the daily price calendar.
//! Each ratio is filled independently from its most recent release dated on
//! or before the trading day, so a trading day never sees a value released
//! after it.

use crate::domain::{FundamentalRelease, Fundamentals, PriceRecord};
use std::collections::BTreeMap;

/// Forward-fill `releases` into each price's `fundamentals` map.
///
/// `prices` must be sorted ascending. Releases may arrive in any order;
/// when two releases share a date the later one in input order wins for the
/// ratios it reports. Values already present on a price are overwritten
/// only by ratios that have been released by that day.
pub fn attach_fundamentals(prices: &mut [PriceRecord], releases: &[FundamentalRelease]) {
    if releases.is_empty() {
        return;
    }

    // Stable sort keeps input order among equal dates.
    let mut ordered: Vec<&FundamentalRelease> = releases.iter().collect();
    ordered.sort_by_key(|r| r.release_date);

    let mut known: Fundamentals = BTreeMap::new();
    let mut next = 0;
    for price in prices.iter_mut() {
        while next < ordered.len() && ordered[next].release_date <= price.trading_day {
            for (name, value) in &ordered[next].values {
                known.insert(name.clone(), *value);
            }
            next += 1;
        }
        for (name, value) in &known {
            price.fundamentals.insert(name.clone(), *value);
        }
    }
}

/// Natural log of a ratio; `None` when the ratio is non-positive or non-finite.
pub fn log_ratio(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then(|| value.ln())
}

/// Log-transform every ratio in `fundamentals`.
pub fn log_fundamentals(fundamentals: &Fundamentals) -> BTreeMap<String, Option<f64>> {
    fundamentals
        .iter()
        .map(|(name, value)| (name.clone(), log_ratio(*value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn release(d: &str, values: &[(&str, f64)]) -> FundamentalRelease {
        FundamentalRelease {
            release_date: date(d),
            values: values.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn prices(days: &[&str]) -> Vec<PriceRecord> {
        days.iter().map(|d| PriceRecord::new(date(d), 100.0, 1)).collect()
    }

    #[test]
    fn forward_fills_without_look_ahead() {
        let mut p = prices(&["2024-03-28", "2024-04-01", "2024-04-23", "2024-04-24"]);
        let releases = vec![
            release("2024-04-23", &[("P_E_TTM", 40.0)]),
            release("2024-01-24", &[("P_E_TTM", 70.0), ("Debt_Equity", 0.1)]),
        ];
        attach_fundamentals(&mut p, &releases);

        assert_eq!(p[0].fundamentals["P_E_TTM"], 70.0);
        assert_eq!(p[1].fundamentals["P_E_TTM"], 70.0);
        // Released on the day itself: visible.
        assert_eq!(p[2].fundamentals["P_E_TTM"], 40.0);
        assert_eq!(p[3].fundamentals["P_E_TTM"], 40.0);
        // Not re-reported in April: carried forward independently.
        assert_eq!(p[3].fundamentals["Debt_Equity"], 0.1);
    }

    #[test]
    fn days_before_first_release_stay_empty() {
        let mut p = prices(&["2024-01-02", "2024-02-01"]);
        attach_fundamentals(&mut p, &[release("2024-01-24", &[("P_S_TTM", 8.0)])]);
        assert!(p[0].fundamentals.is_empty());
        assert_eq!(p[1].fundamentals["P_S_TTM"], 8.0);
    }

    #[test]
    fn same_day_releases_keep_last() {
        let mut p = prices(&["2024-02-01"]);
        attach_fundamentals(
            &mut p,
            &[
                release("2024-01-24", &[("P_S_TTM", 8.0)]),
                release("2024-01-24", &[("P_S_TTM", 9.0)]),
            ],
        );
        assert_eq!(p[0].fundamentals["P_S_TTM"], 9.0);
    }

    #[test]
    fn log_ratio_rejects_non_positive() {
        assert_eq!(log_ratio(1.0), Some(0.0));
        assert_eq!(log_ratio(0.0), None);
        assert_eq!(log_ratio(-35.0), None);
        assert_eq!(log_ratio(f64::NAN), None);
    }

    #[test]
    fn log_fundamentals_keeps_every_column() {
        let f: Fundamentals = [("a".to_string(), std::f64::consts::E), ("b".to_string(), -1.0)]
            .into_iter()
            .collect();
        let logged = log_fundamentals(&f);
        assert!((logged["a"].unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(logged["b"], None);
    }
}
