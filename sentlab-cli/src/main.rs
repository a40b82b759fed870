//! SentLab CLI: run the pipeline or one of its stages.
//!
//! Commands:
//! - `run`: full pipeline from a TOML config, artifacts written to a run directory
//! - `score`: lexicon scoring only, writes the daily sentiment CSV
//! - `returns`: return calculation only, writes the returns CSV

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::{Path, PathBuf};

use sentlab_core::data::{read_documents_path, read_prices_path, DocumentColumns, PriceColumns};
use sentlab_core::domain::EmotionCategory;
use sentlab_core::{compute_returns, Lexicon, LexiconFormat, Normalizer};
use sentlab_runner::{
    export_daily_sentiment_csv, export_returns_csv, run_pipeline, save_artifacts,
    score_and_aggregate, write_artifact, PipelineConfig, RunSummary,
};

#[derive(Parser)]
#[command(
    name = "sentlab",
    about = "SentLab CLI: lexicon sentiment and daily returns into a modeling dataset"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline from a TOML config file.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Output directory for run artifacts. Overrides `[output].dir`.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Score a document CSV and write per-day sentiment.
    Score {
        /// Lexicon file.
        #[arg(long)]
        lexicon: PathBuf,

        /// Lexicon layout: nrc_word_level or pairs.
        #[arg(long, default_value = "nrc_word_level")]
        lexicon_format: String,

        /// Document CSV (tweet_id, date, text columns).
        #[arg(long)]
        documents: PathBuf,

        /// Where to write the daily sentiment CSV.
        #[arg(long, default_value = "daily_sentiment.csv")]
        output: PathBuf,
    },
    /// Compute daily log returns from a price CSV.
    Returns {
        /// Price CSV (Date, Adj Close, Volume columns).
        #[arg(long)]
        prices: PathBuf,

        /// Where to write the returns CSV.
        #[arg(long, default_value = "returns.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output_dir } => run_cmd(&config, output_dir),
        Commands::Score {
            lexicon,
            lexicon_format,
            documents,
            output,
        } => score_cmd(&lexicon, &lexicon_format, &documents, &output),
        Commands::Returns { prices, output } => returns_cmd(&prices, &output),
    }
}

fn run_cmd(config_path: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let config = PipelineConfig::from_file(config_path)?;
    let output = run_pipeline(&config)?;

    print_summary(&output.summary);

    let dir = output_dir.unwrap_or_else(|| config.output.dir.clone());
    let run_dir = save_artifacts(&output, &dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn score_cmd(lexicon_path: &Path, format: &str, documents: &Path, output: &Path) -> Result<()> {
    let format = parse_lexicon_format(format)?;
    let lexicon = Lexicon::from_path(lexicon_path, format)?;
    let docs = read_documents_path(documents, &DocumentColumns::default())
        .with_context(|| format!("failed to read documents from {}", documents.display()))?;

    let daily = score_and_aggregate(&docs.records, &lexicon, &Normalizer::new());
    let path = write_to(output, &export_daily_sentiment_csv(&daily)?)?;

    println!();
    println!("=== Scoring ===");
    println!("Documents:      {}", docs.len());
    println!("Quarantined:    {}", docs.quarantined.len());
    println!("Duplicates:     {}", docs.duplicates);
    println!("Days:           {}", daily.len());
    println!();
    println!("Daily sentiment saved to: {}", path.display());
    Ok(())
}

fn returns_cmd(prices: &Path, output: &Path) -> Result<()> {
    let batch = read_prices_path(prices, &PriceColumns::default())
        .with_context(|| format!("failed to read prices from {}", prices.display()))?;
    let returns = compute_returns(&batch.records)?;
    let path = write_to(output, &export_returns_csv(&returns)?)?;

    println!();
    println!("=== Returns ===");
    println!("Price days:     {}", batch.len());
    println!("Quarantined:    {}", batch.quarantined.len());
    println!("Duplicates:     {}", batch.duplicates);
    println!("Returns:        {}", returns.len());
    println!();
    println!("Returns saved to: {}", path.display());
    Ok(())
}

fn parse_lexicon_format(name: &str) -> Result<LexiconFormat> {
    match name {
        "nrc_word_level" | "nrc" => Ok(LexiconFormat::NrcWordLevel),
        "pairs" => Ok(LexiconFormat::Pairs),
        _ => bail!("unknown lexicon format '{name}'. Valid: nrc_word_level, pairs"),
    }
}

/// Write a single output file, creating its parent directory if needed.
fn write_to(path: &Path, contents: &str) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("output path has no file name: {}", path.display()))?;
    write_artifact(dir, name, contents)
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("=== Pipeline Result ===");
    match (summary.first_day, summary.last_day) {
        (Some(first), Some(last)) => println!("Period:         {first} to {last}"),
        _ => println!("Period:         (no overlapping days)"),
    }
    println!("Lexicon tokens: {}", summary.lexicon_tokens);
    println!(
        "Documents:      {} ({} quarantined, {} duplicate)",
        summary.documents_read, summary.documents_quarantined, summary.duplicate_documents
    );
    println!(
        "Price days:     {} ({} quarantined, {} duplicate)",
        summary.price_days, summary.prices_quarantined, summary.duplicate_price_days
    );
    if summary.fundamentals_releases > 0 || summary.fundamentals_quarantined > 0 {
        println!(
            "Fundamentals:   {} releases ({} quarantined)",
            summary.fundamentals_releases, summary.fundamentals_quarantined
        );
    }
    println!("Sentiment days: {}", summary.sentiment_days);
    println!("Return days:    {}", summary.return_days);
    println!("Modeling rows:  {}", summary.modeling_rows);
    println!();
    println!("--- Category Totals ---");
    for category in EmotionCategory::ALL {
        println!(
            "{:<15} {}",
            format!("{}:", category.as_str()),
            summary.category_totals.get(category)
        );
    }
    if summary.modeling_rows == 0 {
        println!();
        println!("WARNING: sentiment and returns share no trading days");
    }
    println!();
}
