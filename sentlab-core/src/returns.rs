//! Log-return calculation from consecutive adjusted closes.
//!
//! `adj_return_t = ln(close_t) − ln(close_{t−1})`. The first record has no
//! return. Calendar gaps are not interpolated: the return spans the two
//! nearest available records.

use crate::domain::{PriceRecord, ReturnRecord};
use chrono::NaiveDate;
use thiserror::Error;

/// Structural price-series errors. These indicate upstream corruption and
/// are never recovered locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("adjusted close on {day} must be positive and finite, got {close}")]
    NonPositivePrice { day: NaiveDate, close: f64 },

    #[error("price dates out of order: {previous} is followed by {next}")]
    Unsorted { previous: NaiveDate, next: NaiveDate },

    #[error("duplicate price date: {day}")]
    DuplicateDate { day: NaiveDate },
}

/// Compute log returns for every record except the first.
///
/// The input must already be sorted ascending with unique dates; the
/// ingestion layer canonicalizes price files before they reach this point.
pub fn compute_returns(prices: &[PriceRecord]) -> Result<Vec<ReturnRecord>, DataError> {
    for price in prices {
        if !(price.adjusted_close.is_finite() && price.adjusted_close > 0.0) {
            return Err(DataError::NonPositivePrice {
                day: price.trading_day,
                close: price.adjusted_close,
            });
        }
    }

    prices
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            if curr.trading_day == prev.trading_day {
                return Err(DataError::DuplicateDate {
                    day: curr.trading_day,
                });
            }
            if curr.trading_day < prev.trading_day {
                return Err(DataError::Unsorted {
                    previous: prev.trading_day,
                    next: curr.trading_day,
                });
            }
            Ok(ReturnRecord {
                trading_day: curr.trading_day,
                adj_return: curr.adjusted_close.ln() - prev.adjusted_close.ln(),
                adjusted_close: curr.adjusted_close,
                volume: curr.volume,
                fundamentals: curr.fundamentals.clone(),
            })
        })
        .collect()
}
