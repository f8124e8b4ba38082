use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::ReportOptions;
use crate::models::{ScoredCandidate, SequenceAnalysis};

const REPORT_TITLE: &str = "CRISPR Guide Analysis Report";
const PREVIEW_DISPLAY_LIMIT: usize = 2000;
const DISCLAIMER: &str = "Educational use only. Not for clinical decisions.";

/// Flattened run summary shared by the JSON and plain-text exports.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub title: String,
    pub input_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_age: Option<String>,
    pub sequence_length: usize,
    pub candidate_count: usize,
    pub reported_guides: usize,
    pub delivery_vector: String,
    pub immune_simulation: bool,
    pub mean_gc_score: f64,
    pub mean_cpg_density: f64,
    pub delivery_success_percent: i64,
    pub immune_risk_percent: i64,
    /// Truncated for display; the full preview stays with the analysis.
    pub cut_preview: String,
}

impl RunSummary {
    pub fn new(analysis: &SequenceAnalysis, options: &ReportOptions) -> Self {
        let mut cut_preview = analysis.cut_preview.clone();
        if cut_preview.len() > PREVIEW_DISPLAY_LIMIT {
            cut_preview.truncate(PREVIEW_DISPLAY_LIMIT);
        }

        Self {
            title: REPORT_TITLE.to_string(),
            input_label: options.input_label.clone(),
            generated_for: options.user_name.clone(),
            user_age: options.user_age.clone(),
            sequence_length: analysis.sequence_length,
            candidate_count: analysis.candidate_count,
            reported_guides: analysis.ranked.len(),
            delivery_vector: options.vector.label().to_string(),
            immune_simulation: options.immune_simulation,
            mean_gc_score: analysis.mean_gc_score,
            mean_cpg_density: analysis.mean_cpg_density,
            delivery_success_percent: analysis.outcome.delivery_success_percent,
            immune_risk_percent: analysis.outcome.immune_risk_percent,
            cut_preview,
        }
    }
}

pub fn write_summary_json(summary: &RunSummary, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// The human-readable document export.
pub fn write_text_report(
    summary: &RunSummary,
    ranked: &[ScoredCandidate],
    path: &Path,
) -> Result<()> {
    let mut out = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writeln!(out, "{}", summary.title)?;
    writeln!(out, "{}", "=".repeat(summary.title.len()))?;
    writeln!(out, "Sequence: {}", summary.input_label)?;
    if summary.generated_for.is_some() || summary.user_age.is_some() {
        writeln!(
            out,
            "Generated for: {} | Age: {}",
            summary.generated_for.as_deref().unwrap_or("-"),
            summary.user_age.as_deref().unwrap_or("-")
        )?;
    }
    writeln!(out, "Sequence length: {} bases", summary.sequence_length)?;
    writeln!(
        out,
        "Candidate sites: {} ({} reported)",
        summary.candidate_count, summary.reported_guides
    )?;
    writeln!(out)?;
    writeln!(out, "Delivery vector: {}", summary.delivery_vector)?;
    writeln!(
        out,
        "Delivery success (simulated): {}%",
        summary.delivery_success_percent
    )?;
    if summary.immune_simulation {
        writeln!(
            out,
            "Immune risk (simulated): {}%",
            summary.immune_risk_percent
        )?;
    } else {
        writeln!(out, "Immune risk simulation disabled")?;
    }
    writeln!(out)?;

    writeln!(out, "Ranked guides")?;
    writeln!(out, "-------------")?;
    writeln!(
        out,
        "{:>8}  {:<20}  {:<3}  {:>8}  {:>7}  {:>10}  {:>10}",
        "Position", "Guide RNA", "PAM", "GC Score", "CpG", "Codon Bias", "Off-target"
    )?;
    for candidate in ranked {
        writeln!(
            out,
            "{:>8}  {:<20}  {:<3}  {:>8.2}  {:>7.3}  {:>10.2}  {:>10.2}",
            candidate.position,
            candidate.guide,
            candidate.pam,
            candidate.gc_score,
            candidate.cpg_density,
            candidate.codon_bias_index,
            candidate.off_target_score
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Simulated cut preview")?;
    writeln!(out, "---------------------")?;
    writeln!(out, "{}", summary.cut_preview)?;
    writeln!(out)?;
    writeln!(out, "{}", DISCLAIMER)?;

    Ok(())
}
