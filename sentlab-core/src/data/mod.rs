//! Ingestion boundary: typed CSV readers for collaborator exports.
//!
//! Every reader turns an ad hoc CSV table into typed records. Rows that fail
//! validation are quarantined (logged and returned alongside the records)
//! instead of aborting the whole file; only structural problems such as an
//! unreadable file or a missing column are fatal.

pub mod canonicalize;
pub mod documents;
pub mod fundamentals;
pub mod prices;
pub mod schema;

pub use canonicalize::canonicalize_prices;
pub use documents::{read_documents, read_documents_path, DocumentColumns};
pub use fundamentals::{read_fundamentals, read_fundamentals_path, FundamentalColumns};
pub use prices::{read_prices, read_prices_path, PriceColumns};
pub use schema::{parse_trading_day, IngestError};

use std::io::Read;

/// A row rejected at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantinedRow {
    /// 1-based line number in the source file (0 if unknown).
    pub line: u64,
    pub reason: String,
}

/// Records read from one file, plus what was rejected on the way in.
#[derive(Debug, Clone)]
pub struct Ingested<T> {
    pub records: Vec<T>,
    pub quarantined: Vec<QuarantinedRow>,
    /// Rows dropped because their key was already seen.
    pub duplicates: usize,
}

impl<T> Ingested<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drive a byte-record reader, quarantining rows `parse` rejects.
///
/// I/O failures abort; any other CSV-level error only costs the row.
pub(crate) fn ingest_rows<R, T, F>(
    rdr: &mut csv::Reader<R>,
    source: &str,
    mut parse: F,
) -> Result<(Vec<T>, Vec<QuarantinedRow>), IngestError>
where
    R: Read,
    F: FnMut(&csv::ByteRecord) -> Result<T, String>,
{
    let mut records = Vec::new();
    let mut quarantined = Vec::new();
    let mut row = csv::ByteRecord::new();

    loop {
        match rdr.read_byte_record(&mut row) {
            Ok(false) => break,
            Ok(true) => {
                let line = row.position().map(|p| p.line()).unwrap_or(0);
                match parse(&row) {
                    Ok(record) => records.push(record),
                    Err(reason) => {
                        log::warn!("{source}: quarantined line {line}: {reason}");
                        quarantined.push(QuarantinedRow { line, reason });
                    }
                }
            }
            Err(e) if e.is_io_error() => return Err(IngestError::Csv(e)),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                let reason = e.to_string();
                log::warn!("{source}: quarantined line {line}: {reason}");
                quarantined.push(QuarantinedRow { line, reason });
            }
        }
    }

    Ok((records, quarantined))
}
