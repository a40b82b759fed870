//! Dataset merger: inner join of daily sentiment and returns on trading day.

use crate::domain::{DailySentiment, ModelingRow, ReturnRecord};
use crate::fundamentals::log_fundamentals;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Which merge input a key violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    DailySentiment,
    Returns,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::DailySentiment => f.write_str("daily sentiment"),
            Table::Returns => f.write_str("returns"),
        }
    }
}

/// Key-uniqueness violations at merge time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate trading day {day} in {table} table")]
    DuplicateKey { table: Table, day: NaiveDate },
}

fn index_unique<'a, T, F>(
    items: &'a [T],
    table: Table,
    key: F,
) -> Result<BTreeMap<NaiveDate, &'a T>, SchemaError>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut index = BTreeMap::new();
    for item in items {
        let day = key(item);
        if index.insert(day, item).is_some() {
            return Err(SchemaError::DuplicateKey { table, day });
        }
    }
    Ok(index)
}

/// Join the two tables on trading day.
///
/// Days present in only one input are dropped. Output is ascending by day.
pub fn merge_datasets(
    sentiment: &[DailySentiment],
    returns: &[ReturnRecord],
) -> Result<Vec<ModelingRow>, SchemaError> {
    let by_day = index_unique(sentiment, Table::DailySentiment, |s| s.trading_day)?;
    let returns_by_day = index_unique(returns, Table::Returns, |r| r.trading_day)?;

    let rows: Vec<ModelingRow> = returns_by_day
        .into_iter()
        .filter_map(|(day, ret)| {
            by_day.get(&day).map(|s| ModelingRow {
                trading_day: day,
                adj_return: ret.adj_return,
                volume: ret.volume,
                log_fundamentals: log_fundamentals(&ret.fundamentals),
                composite_index: s.composite_index,
                counts: s.counts,
            })
        })
        .collect();

    log::debug!(
        "merged {} sentiment days with {} return days into {} rows",
        sentiment.len(),
        returns.len(),
        rows.len()
    );
    Ok(rows)
}
