//! Pipeline runner: wires together loading, scoring, returns, and merge.
//!
//! Two entry points:
//! - `run_pipeline()`: loads inputs from a `PipelineConfig`, then runs. Used by CLI.
//! - `run_from_inputs()`: takes pre-loaded inputs, no I/O. Used by tests and
//!   callers that already hold the data in memory.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sentlab_core::domain::{
    CategoryCounts, DailySentiment, DocumentRecord, ModelingRow, ReturnRecord,
};
use sentlab_core::{
    compute_returns, merge_datasets, DailyAggregator, DataError, Lexicon, Normalizer,
    SchemaError, SentimentScorer,
};

use crate::config::{ConfigError, PipelineConfig};
use crate::data_loader::{load_inputs, LoadError, LoadedInputs};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("return calculation failed: {0}")]
    Returns(#[from] DataError),
    #[error("merge failed: {0}")]
    Merge(#[from] SchemaError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Provenance and counts for one run; persisted as `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub config_hash: String,
    pub dataset_hash: String,
    pub lexicon_tokens: usize,
    pub documents_read: usize,
    pub documents_quarantined: usize,
    pub duplicate_documents: usize,
    pub price_days: usize,
    pub prices_quarantined: usize,
    pub duplicate_price_days: usize,
    pub fundamentals_releases: usize,
    pub fundamentals_quarantined: usize,
    pub sentiment_days: usize,
    pub return_days: usize,
    pub modeling_rows: usize,
    /// First and last trading day of the modeling dataset.
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    /// Category totals over every scored document.
    pub category_totals: CategoryCounts,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Every table a run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub daily: Vec<DailySentiment>,
    pub returns: Vec<ReturnRecord>,
    pub rows: Vec<ModelingRow>,
    pub summary: RunSummary,
}

/// Run the whole pipeline described by `config`.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let config_hash = config.config_hash()?;
    let inputs = load_inputs(config)?;
    let normalizer = config.normalizer.build();
    run_from_inputs(&inputs, &normalizer, &config_hash)
}

/// Run on pre-loaded inputs; no I/O.
pub fn run_from_inputs(
    inputs: &LoadedInputs,
    normalizer: &Normalizer,
    config_hash: &str,
) -> Result<PipelineOutput, PipelineError> {
    let daily = score_and_aggregate(&inputs.documents.records, &inputs.lexicon, normalizer);
    log::info!(
        "scored {} documents into {} sentiment days",
        inputs.documents.len(),
        daily.len()
    );

    let returns = compute_returns(&inputs.prices.records)?;
    log::info!("computed {} daily returns", returns.len());

    let rows = merge_datasets(&daily, &returns)?;
    log::info!("modeling dataset: {} rows", rows.len());

    let category_totals = daily.iter().fold(CategoryCounts::new(), |mut acc, d| {
        acc += &d.counts;
        acc
    });

    let summary = RunSummary {
        schema_version: SCHEMA_VERSION,
        config_hash: config_hash.to_string(),
        dataset_hash: inputs.dataset_hash.clone(),
        lexicon_tokens: inputs.lexicon.len(),
        documents_read: inputs.documents.len(),
        documents_quarantined: inputs.documents.quarantined.len(),
        duplicate_documents: inputs.documents.duplicates,
        price_days: inputs.prices.len(),
        prices_quarantined: inputs.prices.quarantined.len(),
        duplicate_price_days: inputs.prices.duplicates,
        fundamentals_releases: inputs.releases.len(),
        fundamentals_quarantined: inputs.fundamentals_quarantined,
        sentiment_days: daily.len(),
        return_days: returns.len(),
        modeling_rows: rows.len(),
        first_day: rows.first().map(|r| r.trading_day),
        last_day: rows.last().map(|r| r.trading_day),
        category_totals,
    };

    Ok(PipelineOutput {
        daily,
        returns,
        rows,
        summary,
    })
}

/// Score documents in parallel and aggregate per trading day.
///
/// Each worker folds its share of documents into a private
/// `DailyAggregator`; partials are combined only at the end.
pub fn score_and_aggregate(
    documents: &[DocumentRecord],
    lexicon: &Lexicon,
    normalizer: &Normalizer,
) -> Vec<DailySentiment> {
    let scorer = SentimentScorer::new(lexicon, normalizer);
    documents
        .par_iter()
        .fold(DailyAggregator::new, |mut agg, doc| {
            agg.add_scored(&scorer.score_document(doc));
            agg
        })
        .reduce(DailyAggregator::new, DailyAggregator::merge)
        .finish()
}
