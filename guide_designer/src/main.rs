use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use guide_designer::models::{AnalysisConfig, DeliveryVector};
use guide_designer::report::{self, ReportOptions};
use guide_designer::run_analysis;
use guide_designer::sequence_input;

/// Scan a DNA sequence for SpCas9 guide sites, score and rank them, and
/// simulate a delivery/immune outcome.
#[derive(Parser, Debug)]
#[clap(name = "guide_designer", version)]
struct Cli {
    #[clap(subcommand)]
    input: InputMode,

    /// Delivery vector for the outcome simulation
    #[clap(long, global = true, default_value = "lnp")]
    vector: DeliveryVector,

    /// Disable the immune-risk simulation (its output is forced to 0)
    #[clap(long, global = true)]
    no_immune_sim: bool,

    /// Directory the report artifacts are written into
    #[clap(long, global = true, default_value = "report")]
    output_dir: PathBuf,

    /// Ranked guide rows kept for the report
    #[clap(long, global = true, default_value_t = 10)]
    max_rows: usize,

    /// Scan cap on candidate sites, for speed on long inputs
    #[clap(long, global = true, default_value_t = 200)]
    max_candidates: usize,

    /// Name printed in the report header
    #[clap(long, global = true)]
    user_name: Option<String>,

    /// Age printed alongside the name in the report header
    #[clap(long, global = true)]
    user_age: Option<String>,
}

#[derive(Subcommand, Debug)]
enum InputMode {
    /// Analyze a DNA sequence given directly on the command line
    Paste { sequence: String },
    /// Analyze a FASTA file (records are concatenated)
    Fasta { file: PathBuf },
    /// Fetch a human gene from Ensembl by symbol and analyze it
    Ensembl { symbol: String },
    /// Search NCBI nucleotide by free text and analyze the first hit
    Ncbi { query: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let (sequence, input_label) = resolve_input(&cli.input)?;
    info!("analyzing {} ({} bases)", input_label, sequence.len());

    let config = AnalysisConfig {
        max_scan_candidates: cli.max_candidates,
        max_result_rows: cli.max_rows,
    };
    let simulate_immune = !cli.no_immune_sim;

    let Some(analysis) = run_analysis(&sequence, cli.vector, simulate_immune, &config) else {
        warn!("no SpCas9 NGG sites found; nothing to report");
        return Ok(());
    };

    info!(
        "top guide at position {}, delivery success {}%, immune risk {}%",
        analysis.ranked[0].position,
        analysis.outcome.delivery_success_percent,
        analysis.outcome.immune_risk_percent
    );

    report::write_report(
        &analysis,
        &ReportOptions {
            output_dir: cli.output_dir.clone(),
            input_label,
            user_name: cli.user_name.clone(),
            user_age: cli.user_age.clone(),
            vector: cli.vector,
            immune_simulation: simulate_immune,
        },
    )?;

    Ok(())
}

/// Turn the selected input mode into a normalized sequence plus a label for
/// the report header.
fn resolve_input(input: &InputMode) -> Result<(String, String)> {
    match input {
        InputMode::Paste { sequence } => {
            let normalized = sequence_input::normalize_sequence(sequence);
            if normalized.is_empty() {
                bail!("no valid A/T/G/C bases in the pasted sequence");
            }
            Ok((normalized, "Pasted sequence".to_string()))
        }
        InputMode::Fasta { file } => {
            let fasta = sequence_input::read_fasta_file(file)?;
            Ok((fasta.sequence, fasta.identifier))
        }
        InputMode::Ensembl { symbol } => {
            let fetched = sequence_retriever::ensembl::fetch_gene_sequence(symbol)?;
            let normalized = sequence_input::normalize_sequence(&fetched.sequence);
            if normalized.is_empty() {
                bail!("{} returned no usable bases", fetched.identifier);
            }
            Ok((normalized, fetched.identifier))
        }
        InputMode::Ncbi { query } => {
            let fetched = sequence_retriever::ncbi::fetch_nucleotide_sequence(query)?;
            let normalized = sequence_input::normalize_sequence(&fetched.sequence);
            if normalized.is_empty() {
                bail!("{} returned no usable bases", fetched.identifier);
            }
            Ok((normalized, fetched.identifier))
        }
    }
}
