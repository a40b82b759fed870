//! Reporting and export: CSV, JSON, and Markdown artifact generation.
//!
//! Provides three export formats for a pipeline run:
//! - **CSV**: daily sentiment, returns, and the flat modeling dataset
//! - **JSON**: run manifest with schema versioning
//! - **Markdown**: human-readable run report
//!
//! The manifest carries a `schema_version` field. Unknown versions are
//! rejected on load.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use sentlab_core::domain::{DailySentiment, EmotionCategory, ModelingRow, ReturnRecord};

use crate::runner::{PipelineOutput, RunSummary, SCHEMA_VERSION};

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn category_headers() -> impl Iterator<Item = &'static str> {
    EmotionCategory::ALL.into_iter().map(EmotionCategory::as_str)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export daily sentiment records.
///
/// Columns: date, document_count, positive_count, negative_count,
/// composite_index, then one count column per emotion category.
pub fn export_daily_sentiment_csv(daily: &[DailySentiment]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec![
        "date",
        "document_count",
        "positive_count",
        "negative_count",
        "composite_index",
    ];
    header.extend(category_headers());
    wtr.write_record(&header)?;

    for d in daily {
        let mut record = vec![
            d.trading_day.to_string(),
            d.document_count.to_string(),
            d.positive_count.to_string(),
            d.negative_count.to_string(),
            d.composite_index.to_string(),
        ];
        record.extend(d.counts.iter().map(|(_, n)| n.to_string()));
        wtr.write_record(&record)?;
    }

    finish_csv(wtr)
}

/// Export daily log returns with the day's close and volume.
pub fn export_returns_csv(returns: &[ReturnRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "adj_return", "adjusted_close", "volume"])?;
    for r in returns {
        wtr.write_record([
            r.trading_day.to_string(),
            r.adj_return.to_string(),
            r.adjusted_close.to_string(),
            r.volume.to_string(),
        ])?;
    }
    finish_csv(wtr)
}

/// Export the modeling dataset.
///
/// Columns: date, adj_return, volume, `log_<ratio>` for every ratio seen in
/// any row (sorted by name), composite_index, then one column per emotion
/// category. A ratio with no usable log value is written as an empty cell.
pub fn export_modeling_csv(rows: &[ModelingRow]) -> Result<String> {
    let ratios: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.log_fundamentals.keys().map(String::as_str))
        .collect();

    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["date".to_string(), "adj_return".into(), "volume".into()];
    header.extend(ratios.iter().map(|name| format!("log_{name}")));
    header.push("composite_index".into());
    header.extend(category_headers().map(String::from));
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.trading_day.to_string(),
            row.adj_return.to_string(),
            row.volume.to_string(),
        ];
        for name in &ratios {
            let cell = row
                .log_fundamentals
                .get(*name)
                .copied()
                .flatten()
                .map(|v| v.to_string())
                .unwrap_or_default();
            record.push(cell);
        }
        record.push(row.composite_index.to_string());
        record.extend(row.counts.iter().map(|(_, n)| n.to_string()));
        wtr.write_record(&record)?;
    }

    finish_csv(wtr)
}

// ─── JSON manifest ──────────────────────────────────────────────────

/// Serialize a `RunSummary` to pretty JSON.
pub fn export_json(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize RunSummary to JSON")
}

/// Deserialize a `RunSummary` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<RunSummary> {
    let summary: RunSummary =
        serde_json::from_str(json).context("failed to deserialize RunSummary from JSON")?;
    if summary.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            summary.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(summary)
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a pipeline run.
///
/// Creates a directory named `run_{timestamp}/` under `output_dir`
/// containing:
/// - `manifest.json`: the `RunSummary`
/// - `daily_sentiment.csv`: one row per trading day with documents
/// - `returns.csv`: one row per trading day with a return
/// - `modeling_dataset.csv`: the joined modeling table
/// - `report.md`: human-readable summary
///
/// Returns the path to the created directory.
pub fn save_artifacts(output: &PipelineOutput, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("run_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    write_artifact(&run_dir, "manifest.json", &export_json(&output.summary)?)?;
    write_artifact(
        &run_dir,
        "daily_sentiment.csv",
        &export_daily_sentiment_csv(&output.daily)?,
    )?;
    write_artifact(&run_dir, "returns.csv", &export_returns_csv(&output.returns)?)?;
    write_artifact(
        &run_dir,
        "modeling_dataset.csv",
        &export_modeling_csv(&output.rows)?,
    )?;
    write_artifact(&run_dir, "report.md", &generate_report(&output.summary))?;

    log::info!("artifacts written to {}", run_dir.display());
    Ok(run_dir)
}

/// Write `contents` to `dir/name`.
pub fn write_artifact(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Load a `RunSummary` from an artifact directory's manifest.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<RunSummary> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for a pipeline run.
pub fn generate_report(summary: &RunSummary) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Sentiment / Returns Run Report\n\n");

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Config Hash | {} |\n", summary.config_hash));
    md.push_str(&format!("| Dataset Hash | {} |\n", summary.dataset_hash));
    match (summary.first_day, summary.last_day) {
        (Some(first), Some(last)) => md.push_str(&format!("| Period | {first} to {last} |\n")),
        _ => md.push_str("| Period | (no overlapping days) |\n"),
    }
    md.push_str(&format!("| Lexicon Tokens | {} |\n", summary.lexicon_tokens));
    md.push('\n');

    md.push_str("## Inputs\n\n");
    md.push_str("| Input | Kept | Quarantined | Duplicates |\n");
    md.push_str("| --- | --- | --- | --- |\n");
    md.push_str(&format!(
        "| Documents | {} | {} | {} |\n",
        summary.documents_read, summary.documents_quarantined, summary.duplicate_documents
    ));
    md.push_str(&format!(
        "| Prices | {} | {} | {} |\n",
        summary.price_days, summary.prices_quarantined, summary.duplicate_price_days
    ));
    md.push_str(&format!(
        "| Fundamentals | {} | {} | - |\n",
        summary.fundamentals_releases, summary.fundamentals_quarantined
    ));
    md.push('\n');

    md.push_str("## Outputs\n\n");
    md.push_str("| Table | Rows |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Daily Sentiment | {} |\n", summary.sentiment_days));
    md.push_str(&format!("| Returns | {} |\n", summary.return_days));
    md.push_str(&format!("| Modeling Dataset | {} |\n", summary.modeling_rows));
    md.push('\n');

    md.push_str("## Category Totals\n\n");
    md.push_str("| Category | Count |\n");
    md.push_str("| --- | --- |\n");
    for (category, count) in summary.category_totals.iter() {
        md.push_str(&format!("| {category} | {count} |\n"));
    }
    md.push_str(&format!(
        "\nComposite index over all documents: {}\n",
        summary.category_totals.composite_index()
    ));

    md
}
