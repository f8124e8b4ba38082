//! Report artifacts for one analysis run: CSV guide table, metric chart,
//! machine-readable summary and a plain-text document export.

pub mod charts;
pub mod guide_table;
pub mod summary;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::models::{DeliveryVector, SequenceAnalysis};
use self::summary::RunSummary;

pub struct ReportOptions {
    pub output_dir: PathBuf,
    /// Human-readable name of the analyzed input (FASTA header, Ensembl ID,
    /// NCBI identifier, or "Pasted sequence").
    pub input_label: String,
    pub user_name: Option<String>,
    pub user_age: Option<String>,
    pub vector: DeliveryVector,
    pub immune_simulation: bool,
}

pub fn write_report(analysis: &SequenceAnalysis, options: &ReportOptions) -> Result<()> {
    fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "failed to create report directory {}",
            options.output_dir.display()
        )
    })?;

    let summary = RunSummary::new(analysis, options);

    guide_table::write_guides_csv(&analysis.ranked, &options.output_dir.join("guides.csv"))?;
    summary::write_summary_json(&summary, &options.output_dir.join("summary.json"))?;
    summary::write_text_report(
        &summary,
        &analysis.ranked,
        &options.output_dir.join("report.txt"),
    )?;
    charts::draw_guide_metrics_chart(
        &analysis.ranked,
        &options.output_dir.join("guide_metrics.png"),
    )?;

    info!("report written to {}", options.output_dir.display());
    Ok(())
}
