//! Input loading for the runner.
//!
//! Reads every input a run needs, in order:
//! 1. Lexicon (any failure is fatal; scoring cannot proceed without it)
//! 2. Documents (bad rows quarantined)
//! 3. Prices (bad rows quarantined, then canonicalized)
//! 4. Fundamentals, if configured, forward-filled onto the price calendar
//!
//! A BLAKE3 hash over the loaded records identifies the dataset.

use sentlab_core::data::{
    read_documents_path, read_fundamentals_path, read_prices_path, IngestError, Ingested,
};
use sentlab_core::domain::{DocumentRecord, FundamentalRelease, PriceRecord};
use sentlab_core::{attach_fundamentals, Lexicon, LexiconError};
use thiserror::Error;

use crate::config::PipelineConfig;

/// Which input file an ingestion error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Documents,
    Prices,
    Fundamentals,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputKind::Documents => "documents",
            InputKind::Prices => "prices",
            InputKind::Fundamentals => "fundamentals",
        };
        f.write_str(name)
    }
}

/// Errors from the input loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("lexicon: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("{input}: {source}")]
    Ingest {
        input: InputKind,
        #[source]
        source: IngestError,
    },
}

/// Everything a run reads, after validation.
#[derive(Debug)]
pub struct LoadedInputs {
    pub lexicon: Lexicon,
    pub documents: Ingested<DocumentRecord>,
    /// Canonical price series with fundamentals attached.
    pub prices: Ingested<PriceRecord>,
    /// Raw releases, empty when no fundamentals file is configured.
    pub releases: Vec<FundamentalRelease>,
    /// Rows quarantined from the fundamentals file.
    pub fundamentals_quarantined: usize,
    /// Dataset hash for fingerprinting (BLAKE3 over all loaded records).
    pub dataset_hash: String,
}

impl LoadedInputs {
    /// Total rows rejected at the ingestion boundary.
    pub fn quarantined(&self) -> usize {
        self.documents.quarantined.len() + self.prices.quarantined.len() + self.fundamentals_quarantined
    }
}

/// Load every input named by `config`.
pub fn load_inputs(config: &PipelineConfig) -> Result<LoadedInputs, LoadError> {
    let lexicon = Lexicon::from_path(&config.lexicon.path, config.lexicon.format)?;

    let documents = read_documents_path(&config.documents.path, &config.documents.columns)
        .map_err(|source| LoadError::Ingest {
            input: InputKind::Documents,
            source,
        })?;

    let mut prices = read_prices_path(&config.prices.path, &config.prices.columns).map_err(|source| {
        LoadError::Ingest {
            input: InputKind::Prices,
            source,
        }
    })?;
    if prices.len() < 2 {
        log::warn!(
            "only {} price rows after ingestion; no returns can be computed",
            prices.len()
        );
    }

    let (releases, fundamentals_quarantined) = match &config.fundamentals {
        Some(source) => {
            let batch = read_fundamentals_path(&source.path, &source.columns).map_err(|source| {
                LoadError::Ingest {
                    input: InputKind::Fundamentals,
                    source,
                }
            })?;
            attach_fundamentals(&mut prices.records, &batch.records);
            (batch.records, batch.quarantined.len())
        }
        None => (Vec::new(), 0),
    };

    let dataset_hash = compute_dataset_hash(&documents.records, &prices.records, &releases);

    Ok(LoadedInputs {
        lexicon,
        documents,
        prices,
        releases,
        fundamentals_quarantined,
        dataset_hash,
    })
}

/// Compute a deterministic BLAKE3 hash over the loaded records.
///
/// Documents are hashed in input order; prices are canonical (ascending),
/// and fundamentals maps iterate in key order, so the hash is stable.
pub fn compute_dataset_hash(
    documents: &[DocumentRecord],
    prices: &[PriceRecord],
    releases: &[FundamentalRelease],
) -> String {
    let mut hasher = blake3::Hasher::new();

    hasher.update(b"documents");
    for doc in documents {
        hasher.update(doc.document_id.as_bytes());
        hasher.update(&[0]);
        hasher.update(doc.trading_day.to_string().as_bytes());
        hasher.update(doc.raw_text.as_bytes());
        hasher.update(&[0]);
    }

    hasher.update(b"prices");
    for price in prices {
        hasher.update(price.trading_day.to_string().as_bytes());
        hasher.update(&price.adjusted_close.to_le_bytes());
        hasher.update(&price.volume.to_le_bytes());
    }

    hasher.update(b"fundamentals");
    for release in releases {
        hasher.update(release.release_date.to_string().as_bytes());
        for (name, value) in &release.values {
            hasher.update(name.as_bytes());
            hasher.update(&value.to_le_bytes());
        }
    }

    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn dataset_hash_is_deterministic() {
        let docs = vec![DocumentRecord::new("1", day(2), "good")];
        let prices = vec![PriceRecord::new(day(2), 100.0, 10)];
        let a = compute_dataset_hash(&docs, &prices, &[]);
        let b = compute_dataset_hash(&docs, &prices, &[]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn dataset_hash_changes_with_content() {
        let docs = vec![DocumentRecord::new("1", day(2), "good")];
        let prices = vec![PriceRecord::new(day(2), 100.0, 10)];
        let base = compute_dataset_hash(&docs, &prices, &[]);

        let edited = vec![DocumentRecord::new("1", day(2), "bad")];
        assert_ne!(base, compute_dataset_hash(&edited, &prices, &[]));

        let repriced = vec![PriceRecord::new(day(2), 100.5, 10)];
        assert_ne!(base, compute_dataset_hash(&docs, &repriced, &[]));

        let release = FundamentalRelease {
            release_date: day(1),
            values: [("P_E_TTM".to_string(), 50.0)].into_iter().collect(),
        };
        assert_ne!(base, compute_dataset_hash(&docs, &prices, &[release]));
    }

    #[test]
    fn load_error_names_the_input() {
        let err = LoadError::Ingest {
            input: InputKind::Prices,
            source: IngestError::MissingColumn {
                column: "Adj Close".into(),
                found: "Date, Close".into(),
            },
        };
        assert!(err.to_string().starts_with("prices: missing required column 'Adj Close'"));
    }
}
