//! Daily price ingestion (Yahoo-style `Date, ..., Adj Close, Volume` exports).

use super::canonicalize::{canonicalize_prices, detect_anomalies};
use super::schema::{date_field, f64_field, volume_field, Header, IngestError};
use super::{ingest_rows, Ingested};
use crate::domain::PriceRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column names in the price export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceColumns {
    pub date: String,
    pub adjusted_close: String,
    pub volume: String,
}

impl Default for PriceColumns {
    fn default() -> Self {
        Self {
            date: "Date".into(),
            adjusted_close: "Adj Close".into(),
            volume: "Volume".into(),
        }
    }
}

/// Read a daily price series.
///
/// Output is sorted ascending with one row per day (last occurrence wins).
/// Rows with a missing or non-finite close are quarantined; non-positive
/// closes are kept so the return calculator can reject them explicitly.
pub fn read_prices<R: Read>(reader: R, columns: &PriceColumns) -> Result<Ingested<PriceRecord>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = Header::read(&mut rdr)?;
    let date_col = header.require(&columns.date)?;
    let close_col = header.require(&columns.adjusted_close)?;
    let volume_col = header.require(&columns.volume)?;

    let (rows, quarantined) = ingest_rows(&mut rdr, "prices", |row| {
        let trading_day = date_field(row, date_col, &columns.date)?;
        let close = f64_field(row, close_col, &columns.adjusted_close)?;
        if !close.is_finite() {
            return Err(format!("non-finite {} {close}", columns.adjusted_close));
        }
        let volume = volume_field(row, volume_col, &columns.volume)?;
        Ok(PriceRecord::new(trading_day, close, volume))
    })?;

    let (records, duplicates) = canonicalize_prices(rows);
    if duplicates > 0 {
        log::warn!("prices: {duplicates} duplicate days resolved (last row kept)");
    }
    for anomaly in detect_anomalies(&records) {
        log::warn!("prices: {:?} on {} days", anomaly.anomaly_type, anomaly.count);
    }
    log::info!(
        "prices: {} days read, {} quarantined",
        records.len(),
        quarantined.len()
    );

    Ok(Ingested {
        records,
        quarantined,
        duplicates,
    })
}

pub fn read_prices_path(path: &Path, columns: &PriceColumns) -> Result<Ingested<PriceRecord>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_prices(file, columns)
}
