//! SentLab Runner: pipeline orchestration on top of `sentlab-core`.
//!
//! This crate provides:
//! - TOML pipeline configuration with validation and a content hash
//! - Input loading (lexicon, documents, prices, fundamentals) with a dataset hash
//! - Parallel document scoring and the end-to-end pipeline run
//! - CSV / JSON / Markdown artifact export

pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use config::{ConfigError, NormalizerConfig, PipelineConfig};
pub use data_loader::{compute_dataset_hash, load_inputs, InputKind, LoadError, LoadedInputs};
pub use export::{
    export_daily_sentiment_csv, export_json, export_modeling_csv, export_returns_csv,
    generate_report, import_json, load_artifacts, save_artifacts, write_artifact,
};
pub use runner::{
    run_from_inputs, run_pipeline, score_and_aggregate, PipelineError, PipelineOutput, RunSummary,
    SCHEMA_VERSION,
};
