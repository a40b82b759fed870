//! Serializable pipeline configuration.
//!
//! A run is described by one TOML file:
//!
//! ```toml
//! [lexicon]
//! path = "NRC-Emotion-Lexicon-Wordlevel-v0.92.txt"
//! format = "nrc_word_level"
//!
//! [documents]
//! path = "tesla_tweets.csv"
//!
//! [prices]
//! path = "tsla_daily.csv"
//!
//! [fundamentals]
//! path = "tsla_ratios.csv"
//!
//! [normalizer]
//! extra_stopwords = ["tesla", "tsla"]
//!
//! [output]
//! dir = "results"
//! ```
//!
//! Relative paths in a config file are resolved against the file's directory.

use sentlab_core::data::{DocumentColumns, FundamentalColumns, PriceColumns};
use sentlab_core::{LexiconFormat, Normalizer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("config serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Full configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub lexicon: LexiconConfig,
    pub documents: DocumentSource,
    pub prices: PriceSource,
    #[serde(default)]
    pub fundamentals: Option<FundamentalSource>,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub format: LexiconFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSource {
    pub path: PathBuf,
    #[serde(default)]
    pub columns: DocumentColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSource {
    pub path: PathBuf,
    #[serde(default)]
    pub columns: PriceColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSource {
    pub path: PathBuf,
    #[serde(default)]
    pub columns: FundamentalColumns,
}

/// Text normalizer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Tokens shorter than this (in chars) are dropped.
    pub min_token_len: usize,
    /// Use the built-in English stopword list.
    pub english_stopwords: bool,
    /// Extra stopwords, e.g. the subject's own name.
    pub extra_stopwords: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: Normalizer::DEFAULT_MIN_TOKEN_LEN,
            english_stopwords: true,
            extra_stopwords: Vec::new(),
        }
    }
}

impl NormalizerConfig {
    pub fn build(&self) -> Normalizer {
        let base = if self.english_stopwords {
            Normalizer::new()
        } else {
            Normalizer::without_stopwords()
        };
        base.with_min_token_len(self.min_token_len)
            .with_extra_stopwords(&self.extra_stopwords)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
        }
    }
}

impl PipelineConfig {
    /// Load, resolve relative paths against the file's directory, and validate.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: PipelineConfig = toml::from_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML string. Paths are taken as written.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Join every relative path onto `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.lexicon.path);
        resolve(&mut self.documents.path);
        resolve(&mut self.prices.path);
        if let Some(f) = self.fundamentals.as_mut() {
            resolve(&mut f.path);
        }
        resolve(&mut self.output.dir);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        for (name, path) in [
            ("lexicon.path", &self.lexicon.path),
            ("documents.path", &self.documents.path),
            ("prices.path", &self.prices.path),
        ] {
            if path.as_os_str().is_empty() {
                return invalid(format!("{name} is empty"));
            }
        }
        if let Some(f) = &self.fundamentals {
            if f.path.as_os_str().is_empty() {
                return invalid("fundamentals.path is empty".into());
            }
            if f.columns.date.trim().is_empty() {
                return invalid("fundamentals.columns.date is empty".into());
            }
        }

        let doc = &self.documents.columns;
        for (name, col) in [("id", &doc.id), ("date", &doc.date), ("text", &doc.text)] {
            if col.trim().is_empty() {
                return invalid(format!("documents.columns.{name} is empty"));
            }
        }
        if doc.id.eq_ignore_ascii_case(&doc.text) || doc.date.eq_ignore_ascii_case(&doc.text) {
            return invalid("documents.columns.text must differ from id and date".into());
        }

        let px = &self.prices.columns;
        for (name, col) in [
            ("date", &px.date),
            ("adjusted_close", &px.adjusted_close),
            ("volume", &px.volume),
        ] {
            if col.trim().is_empty() {
                return invalid(format!("prices.columns.{name} is empty"));
            }
        }

        if self.normalizer.min_token_len == 0 {
            return invalid("normalizer.min_token_len must be at least 1".into());
        }
        Ok(())
    }

    /// Deterministic BLAKE3 hash of this configuration.
    ///
    /// Two runs with identical configs share the same hash.
    pub fn config_hash(&self) -> Result<String, ConfigError> {
        let json = serde_json::to_string(self)?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}
