//! Lexicon store: immutable token → category-set mapping.
//!
//! Two on-disk formats are supported:
//! - `NrcWordLevel`: the NRC word-level association file, tab separated
//!   `word<TAB>category<TAB>0|1`, no header. Rows with association `0` still
//!   register the token (with no category from that row).
//! - `Pairs`: CSV with a `token,category` header, one tag per row.
//!
//! The store is built once per run and handed to the scorer by reference.

use crate::domain::{CategorySet, EmotionCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// On-disk lexicon layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexiconFormat {
    #[default]
    NrcWordLevel,
    Pairs,
}

/// Lexicon load failures. All of them abort the run.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("cannot open lexicon file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lexicon CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed lexicon row at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("unknown category '{tag}' at line {line}")]
    UnknownCategory { line: u64, tag: String },

    #[error("lexicon contains no entries")]
    Empty,
}

/// Immutable token → categories mapping.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, CategorySet>,
}

impl Lexicon {
    /// Build from (token, category) pairs. Tokens are trimmed and lowercased;
    /// repeated tokens accumulate categories.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, EmotionCategory)>,
    {
        let mut entries: HashMap<String, CategorySet> = HashMap::new();
        for (token, category) in pairs {
            entries
                .entry(normalize_token(token))
                .or_default()
                .insert(category);
        }
        Self { entries }
    }

    /// Load a lexicon file from disk.
    pub fn from_path(path: &Path, format: LexiconFormat) -> Result<Self, LexiconError> {
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_reader(file, format)?;
        log::info!(
            "loaded lexicon {} ({} tokens, {} tagged)",
            path.display(),
            lexicon.len(),
            lexicon.tagged_len()
        );
        Ok(lexicon)
    }

    /// Parse a lexicon from any reader.
    pub fn from_reader<R: Read>(reader: R, format: LexiconFormat) -> Result<Self, LexiconError> {
        let lexicon = match format {
            LexiconFormat::NrcWordLevel => parse_nrc(reader)?,
            LexiconFormat::Pairs => parse_pairs(reader)?,
        };
        if lexicon.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(lexicon)
    }

    /// Categories for an exact (already normalized) token.
    pub fn lookup(&self, token: &str) -> Option<CategorySet> {
        self.entries.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Number of distinct tokens, including tokens with no category.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tokens carrying at least one category.
    pub fn tagged_len(&self) -> usize {
        self.entries.values().filter(|s| !s.is_empty()).count()
    }
}

fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_category(raw: &str, line: u64) -> Result<EmotionCategory, LexiconError> {
    raw.parse().map_err(|_| LexiconError::UnknownCategory {
        line,
        tag: raw.trim().to_string(),
    })
}

fn parse_nrc<R: Read>(reader: R) -> Result<Lexicon, LexiconError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut entries: HashMap<String, CategorySet> = HashMap::new();
    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        if record.len() != 3 {
            return Err(LexiconError::Malformed {
                line,
                reason: format!("expected 3 tab-separated fields, found {}", record.len()),
            });
        }
        let token = normalize_token(&record[0]);
        if token.is_empty() {
            return Err(LexiconError::Malformed {
                line,
                reason: "empty token".into(),
            });
        }
        let category = parse_category(&record[1], line)?;
        let set = entries.entry(token).or_default();
        match record[2].trim() {
            "1" => set.insert(category),
            "0" => {}
            other => {
                return Err(LexiconError::Malformed {
                    line,
                    reason: format!("association must be 0 or 1, found '{other}'"),
                })
            }
        }
    }
    Ok(Lexicon { entries })
}

fn parse_pairs<R: Read>(reader: R) -> Result<Lexicon, LexiconError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| LexiconError::Malformed {
                line: 1,
                reason: format!("missing '{name}' column"),
            })
    };
    let token_col = column("token")?;
    let category_col = column("category")?;

    let mut entries: HashMap<String, CategorySet> = HashMap::new();
    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);
        let token = record.get(token_col).map(normalize_token).unwrap_or_default();
        if token.is_empty() {
            return Err(LexiconError::Malformed {
                line,
                reason: "empty token".into(),
            });
        }
        let raw_category = record.get(category_col).unwrap_or("");
        let category = parse_category(raw_category, line)?;
        entries.entry(token).or_default().insert(category);
    }
    Ok(Lexicon { entries })
}
