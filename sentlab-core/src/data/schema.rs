//! Column resolution and field parsing shared by the CSV readers.

use chrono::NaiveDate;
use std::path::PathBuf;

/// Structural ingestion failures. These abort loading of the affected file.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{column}' (found: {found})")]
    MissingColumn { column: String, found: String },
}

/// Header row of a CSV file, lowercased for case-insensitive lookup.
pub(crate) struct Header {
    names: Vec<String>,
}

impl Header {
    pub(crate) fn read<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> Result<Self, IngestError> {
        let raw = rdr.byte_headers()?.clone();
        let names = raw
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();
        Ok(Self { names })
    }

    /// Index of `column`, matched case-insensitively.
    pub(crate) fn require(&self, column: &str) -> Result<usize, IngestError> {
        self.names
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column.trim()))
            .ok_or_else(|| IngestError::MissingColumn {
                column: column.to_string(),
                found: self.names.join(", "),
            })
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }
}

/// UTF-8 field by index, trimmed.
pub(crate) fn field<'r>(record: &'r csv::ByteRecord, index: usize, name: &str) -> Result<&'r str, String> {
    let bytes = record
        .get(index)
        .ok_or_else(|| format!("row has no '{name}' field"))?;
    std::str::from_utf8(bytes)
        .map(str::trim)
        .map_err(|_| format!("'{name}' is not valid UTF-8"))
}

pub(crate) fn date_field(record: &csv::ByteRecord, index: usize, name: &str) -> Result<NaiveDate, String> {
    let raw = field(record, index, name)?;
    parse_trading_day(raw).ok_or_else(|| format!("unparseable {name} '{raw}'"))
}

pub(crate) fn f64_field(record: &csv::ByteRecord, index: usize, name: &str) -> Result<f64, String> {
    let raw = field(record, index, name)?;
    raw.parse::<f64>()
        .map_err(|_| format!("unparseable {name} '{raw}'"))
}

/// Volume may be exported as an integer or as a whole float ("1234.0").
pub(crate) fn volume_field(record: &csv::ByteRecord, index: usize, name: &str) -> Result<u64, String> {
    let raw = field(record, index, name)?;
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(v as u64),
        _ => Err(format!("unparseable {name} '{raw}'")),
    }
}

/// Parse a trading day from the date formats collaborators export.
///
/// Accepts `YYYY-MM-DD`, any timestamp whose first ten characters are
/// `YYYY-MM-DD` (e.g. `2024-01-02T15:04:05.000Z`, `2024-01-02 00:00:00-05:00`;
/// the leading calendar date is taken as written), and `M/D/YYYY`.
pub fn parse_trading_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Some(prefix) = raw.get(..10) {
        let rest = &raw[10..];
        if rest.starts_with(['T', ' ']) {
            if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                return Some(d);
            }
        }
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}
