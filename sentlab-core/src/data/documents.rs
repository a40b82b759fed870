//! Social-text document ingestion.

use super::schema::{date_field, field, Header, IngestError};
use super::{ingest_rows, Ingested};
use crate::domain::DocumentRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column names in the document export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentColumns {
    pub id: String,
    pub date: String,
    pub text: String,
}

impl Default for DocumentColumns {
    fn default() -> Self {
        Self {
            id: "tweet_id".into(),
            date: "date".into(),
            text: "text".into(),
        }
    }
}

/// Read documents from a CSV export.
///
/// Rows with an empty id, an unparseable date or non-UTF-8 text are
/// quarantined. Repeated ids keep their first occurrence.
pub fn read_documents<R: Read>(
    reader: R,
    columns: &DocumentColumns,
) -> Result<Ingested<DocumentRecord>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = Header::read(&mut rdr)?;
    let id_col = header.require(&columns.id)?;
    let date_col = header.require(&columns.date)?;
    let text_col = header.require(&columns.text)?;

    let (rows, quarantined) = ingest_rows(&mut rdr, "documents", |row| {
        let id = field(row, id_col, &columns.id)?;
        if id.is_empty() {
            return Err(format!("empty '{}'", columns.id));
        }
        let trading_day = date_field(row, date_col, &columns.date)?;
        let text_bytes = row
            .get(text_col)
            .ok_or_else(|| format!("row has no '{}' field", columns.text))?;
        let raw_text = String::from_utf8(text_bytes.to_vec())
            .map_err(|_| format!("'{}' is not valid UTF-8", columns.text))?;
        Ok(DocumentRecord::new(id, trading_day, raw_text))
    })?;

    let mut seen = HashSet::new();
    let mut duplicates = 0;
    let mut records = Vec::with_capacity(rows.len());
    for doc in rows {
        if seen.insert(doc.document_id.clone()) {
            records.push(doc);
        } else {
            duplicates += 1;
        }
    }

    log::info!(
        "documents: {} read, {} quarantined, {} duplicate ids dropped",
        records.len(),
        quarantined.len(),
        duplicates
    );

    Ok(Ingested {
        records,
        quarantined,
        duplicates,
    })
}

pub fn read_documents_path(
    path: &Path,
    columns: &DocumentColumns,
) -> Result<Ingested<DocumentRecord>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_documents(file, columns)
}
