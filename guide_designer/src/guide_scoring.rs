//! Heuristic per-guide metrics. All four scores are pure functions of the
//! guide string; calling them twice must produce identical values.

use crate::models::{Candidate, ScoredCandidate};

const CPG_OFF_TARGET_WEIGHT: f64 = 0.7;

/// Percentage of G/C bases, 0-100. Defined as 0 for an empty string.
pub fn gc_percent(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let gc = sequence
        .bytes()
        .filter(|&b| b == b'G' || b == b'C')
        .count();
    100.0 * gc as f64 / sequence.len() as f64
}

/// Adjacent "CG" pairs per base, rounded to 3 decimals. Typical guides land
/// around 0-0.3. This is a dinucleotide frequency, not methylation.
pub fn cpg_density(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let pairs = sequence
        .as_bytes()
        .windows(2)
        .filter(|w| w[0] == b'C' && w[1] == b'G')
        .count();
    round3(pairs as f64 / sequence.len() as f64)
}

/// Ratio of GC dinucleotides to AT dinucleotides, Laplace-smoothed and
/// rounded to 2 decimals. Near 1.0 is neutral.
pub fn codon_bias_index(sequence: &str) -> f64 {
    if sequence.len() < 2 {
        return 1.0;
    }

    let is_gc = |b: u8| b == b'G' || b == b'C';
    let is_at = |b: u8| b == b'A' || b == b'T';
    let bases = sequence.as_bytes();

    let gc_pairs = bases.windows(2).filter(|w| is_gc(w[0]) && is_gc(w[1])).count();
    let at_pairs = bases.windows(2).filter(|w| is_at(w[0]) && is_at(w[1])).count();

    round2((gc_pairs + 1) as f64 / (at_pairs + 1) as f64)
}

/// 0-100, higher is better (less likely off-target). Penalizes deviation
/// from 50% GC and CpG-rich guides.
pub fn off_target_score(guide: &str, cpg: f64) -> f64 {
    let gc_fraction = gc_percent(guide) / 100.0;
    let gc_penalty = (0.5 - gc_fraction).abs() * 100.0;
    let cpg_penalty = cpg * 100.0 * CPG_OFF_TARGET_WEIGHT;
    round2((100.0 - (gc_penalty + cpg_penalty)).max(0.0))
}

/// Attach all four metrics to each candidate.
pub fn score_candidates(candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .map(|candidate| {
            let gc_score = round2(gc_percent(&candidate.guide));
            let cpg = cpg_density(&candidate.guide);
            let codon_bias = codon_bias_index(&candidate.guide);
            let off_target = off_target_score(&candidate.guide, cpg);

            ScoredCandidate {
                position: candidate.position,
                guide: candidate.guide,
                pam: candidate.pam,
                gc_score,
                cpg_density: cpg,
                codon_bias_index: codon_bias,
                off_target_score: off_target,
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
