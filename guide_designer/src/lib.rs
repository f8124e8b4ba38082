//! SpCas9 guide discovery, heuristic scoring and delivery-outcome
//! simulation over one in-memory DNA sequence. The core pipeline is a chain
//! of pure functions (scan, score, rank, simulate, preview); report
//! rendering and gene-database retrieval live at the edges.

pub mod cut_preview;
pub mod guide_scanner;
pub mod guide_scoring;
pub mod models;
pub mod outcome_simulation;
pub mod ranking;
pub mod report;
pub mod sequence_input;

use tracing::info;

use crate::cut_preview::preview_from_ranked;
use crate::guide_scanner::find_spcas9_sites;
use crate::guide_scoring::score_candidates;
use crate::models::{AnalysisConfig, DeliveryVector, SequenceAnalysis};
use crate::outcome_simulation::{ranked_set_averages, simulate_outcome};
use crate::ranking::rank_candidates;

/// Run one full analysis over a normalized A/T/G/C sequence. Returns `None`
/// when no candidate site survives to the ranked set; nothing downstream
/// runs in that case.
pub fn run_analysis(
    sequence: &str,
    vector: DeliveryVector,
    simulate_immune: bool,
    config: &AnalysisConfig,
) -> Option<SequenceAnalysis> {
    let candidates = find_spcas9_sites(sequence, config.max_scan_candidates);
    if candidates.is_empty() {
        return None;
    }

    let candidate_count = candidates.len();
    info!(
        "found {} candidate sites in {} bases",
        candidate_count,
        sequence.len()
    );

    let scored = score_candidates(candidates);
    let ranked = rank_candidates(scored, config.max_result_rows);
    if ranked.is_empty() {
        return None;
    }

    let (mean_gc_score, mean_cpg_density) = ranked_set_averages(&ranked);
    let outcome = simulate_outcome(vector, mean_gc_score, mean_cpg_density, simulate_immune);
    let cut_preview = preview_from_ranked(sequence, &ranked);

    Some(SequenceAnalysis {
        sequence_length: sequence.len(),
        ranked,
        candidate_count,
        mean_gc_score,
        mean_cpg_density,
        outcome,
        cut_preview,
    })
}
