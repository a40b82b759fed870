//! Quarterly fundamentals ingestion.
//!
//! The export has a release date column and one column per ratio
//! (`P_E_TTM`, `P_S_TTM`, `EV_EBITDA_TTM`, ...). Every non-date column is
//! treated as a ratio.

use super::schema::{date_field, field, Header, IngestError};
use super::{ingest_rows, Ingested};
use crate::domain::{FundamentalRelease, Fundamentals};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalColumns {
    pub date: String,
}

impl Default for FundamentalColumns {
    fn default() -> Self {
        Self { date: "Date".into() }
    }
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty()
        || raw.eq_ignore_ascii_case("nan")
        || raw.eq_ignore_ascii_case("null")
        || raw.eq_ignore_ascii_case("na")
}

/// Read fundamentals releases, one per row, sorted ascending by date.
///
/// Empty, `NaN` and `null` cells mean "not reported". A cell that is
/// present but not a number quarantines the row.
pub fn read_fundamentals<R: Read>(
    reader: R,
    columns: &FundamentalColumns,
) -> Result<Ingested<FundamentalRelease>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = Header::read(&mut rdr)?;
    let date_col = header.require(&columns.date)?;
    let ratios: Vec<(usize, String)> = header
        .names()
        .iter()
        .enumerate()
        .filter(|(i, name)| *i != date_col && !name.is_empty())
        .map(|(i, name)| (i, name.clone()))
        .collect();

    let (mut records, quarantined) = ingest_rows(&mut rdr, "fundamentals", |row| {
        let release_date = date_field(row, date_col, &columns.date)?;
        let mut values = Fundamentals::new();
        for (index, name) in &ratios {
            let raw = match row.get(*index) {
                Some(_) => field(row, *index, name)?,
                None => continue,
            };
            if is_missing(raw) {
                continue;
            }
            let value: f64 = raw
                .parse()
                .map_err(|_| format!("unparseable {name} '{raw}'"))?;
            if value.is_finite() {
                values.insert(name.clone(), value);
            }
        }
        Ok(FundamentalRelease { release_date, values })
    })?;

    records.sort_by_key(|r| r.release_date);
    log::info!(
        "fundamentals: {} releases over {} ratios, {} quarantined",
        records.len(),
        ratios.len(),
        quarantined.len()
    );

    Ok(Ingested {
        records,
        quarantined,
        duplicates: 0,
    })
}

pub fn read_fundamentals_path(
    path: &Path,
    columns: &FundamentalColumns,
) -> Result<Ingested<FundamentalRelease>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_fundamentals(file, columns)
}
