//! SentLab Core: lexicon scoring, daily aggregation, returns and dataset merge.
//!
//! This crate holds the pure, I/O-light parts of the sentiment/returns pipeline:
//! - Domain types (documents, category counts, daily sentiment, prices, returns)
//! - Word-level emotion lexicon and text normalization
//! - Per-document scoring and per-day aggregation
//! - Log returns and point-in-time fundamentals alignment
//! - Inner join into the modeling dataset
//! - Typed CSV readers with row quarantine at the ingestion boundary

pub mod aggregate;
pub mod data;
pub mod domain;
pub mod fundamentals;
pub mod lexicon;
pub mod merge;
pub mod returns;
pub mod scoring;
pub mod text;

pub use aggregate::{aggregate_daily, DailyAggregator};
pub use fundamentals::{attach_fundamentals, log_fundamentals, log_ratio};
pub use lexicon::{Lexicon, LexiconError, LexiconFormat};
pub use merge::{merge_datasets, SchemaError, Table};
pub use returns::{compute_returns, DataError};
pub use scoring::{score_tokens, SentimentScorer};
pub use text::Normalizer;
