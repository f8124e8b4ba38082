//! Simulated delivery/immune outcome from ranked-set averages. A declared
//! heuristic: the contract is reproducibility and bounded output, not
//! biological fidelity.

use crate::models::{DeliveryVector, OutcomeEstimate, ScoredCandidate};

const MIN_DELIVERY_SUCCESS: i64 = 5;
const MAX_DELIVERY_SUCCESS: i64 = 98;
const MAX_IMMUNE_RISK: i64 = 95;

/// GC content above this threshold starts costing delivery success.
const GC_EXCESS_THRESHOLD: f64 = 65.0;
/// Each full 5 points of excess GC costs 1 point of success.
const GC_EXCESS_STEP: f64 = 5.0;
/// Each full 10% of CpG-density-as-percent costs 1 point of success.
const CPG_DELIVERY_STEP: f64 = 10.0;
const CPG_IMMUNE_WEIGHT: f64 = 0.8;
const AAV_IMMUNE_PENALTY: i64 = 5;

/// Mean GC score and mean CpG density over the ranked result set.
pub fn ranked_set_averages(ranked: &[ScoredCandidate]) -> (f64, f64) {
    if ranked.is_empty() {
        return (0.0, 0.0);
    }
    let n = ranked.len() as f64;
    let gc = ranked.iter().map(|c| c.gc_score).sum::<f64>() / n;
    let cpg = ranked.iter().map(|c| c.cpg_density).sum::<f64>() / n;
    (gc, cpg)
}

pub fn compute_delivery_success(vector: DeliveryVector, avg_gc: f64, avg_cpg: f64) -> i64 {
    let mut success = vector.base_success();
    success -= ((avg_gc - GC_EXCESS_THRESHOLD).max(0.0) / GC_EXCESS_STEP) as i64;
    success -= (avg_cpg * 100.0 / CPG_DELIVERY_STEP) as i64;
    success.clamp(MIN_DELIVERY_SUCCESS, MAX_DELIVERY_SUCCESS)
}

/// Immune risk in whole percent. When `simulate` is false the result is 0
/// regardless of every other input; the flag is a hard override.
pub fn compute_immune_risk(simulate: bool, avg_cpg: f64, vector: DeliveryVector) -> i64 {
    if !simulate {
        return 0;
    }

    let mut risk = (avg_cpg * 100.0 * CPG_IMMUNE_WEIGHT).round() as i64;
    if vector == DeliveryVector::Aav {
        risk += AAV_IMMUNE_PENALTY;
    }
    risk.clamp(0, MAX_IMMUNE_RISK)
}

pub fn simulate_outcome(
    vector: DeliveryVector,
    avg_gc: f64,
    avg_cpg: f64,
    simulate_immune: bool,
) -> OutcomeEstimate {
    OutcomeEstimate {
        delivery_success_percent: compute_delivery_success(vector, avg_gc, avg_cpg),
        immune_risk_percent: compute_immune_risk(simulate_immune, avg_cpg, vector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baselines_pass_through_for_benign_averages() {
        assert_eq!(
            compute_delivery_success(DeliveryVector::LipidNanoparticles, 50.0, 0.0),
            85
        );
        assert_eq!(compute_delivery_success(DeliveryVector::Aav, 50.0, 0.0), 75);
        assert_eq!(
            compute_delivery_success(DeliveryVector::Electroporation, 50.0, 0.0),
            65
        );
    }

    #[test]
    fn excess_gc_and_cpg_reduce_delivery_success() {
        // 80% GC: 15 points over the threshold -> -3. CpG 0.2 -> 20% -> -2.
        assert_eq!(
            compute_delivery_success(DeliveryVector::LipidNanoparticles, 80.0, 0.2),
            80
        );
        // GC below the threshold costs nothing.
        assert_eq!(
            compute_delivery_success(DeliveryVector::LipidNanoparticles, 64.9, 0.0),
            85
        );
    }

    #[test]
    fn delivery_success_clamps_to_range() {
        // Electroporation with hostile composition bottoms out at 5.
        assert_eq!(
            compute_delivery_success(DeliveryVector::Electroporation, 100.0, 10.0),
            5
        );
        // The ceiling holds even for a friendly LNP run.
        assert!(compute_delivery_success(DeliveryVector::LipidNanoparticles, 0.0, 0.0) <= 98);
    }

    #[test]
    fn disabled_simulation_forces_zero_risk() {
        // Hard override: CpG-heavy AAV run still reports 0.
        assert_eq!(compute_immune_risk(false, 0.9, DeliveryVector::Aav), 0);
        assert_eq!(compute_immune_risk(false, 0.0, DeliveryVector::LipidNanoparticles), 0);
    }

    #[test]
    fn immune_risk_scales_with_cpg_and_aav_penalty() {
        // 0.25 CpG -> round(25 * 0.8) = 20.
        assert_eq!(
            compute_immune_risk(true, 0.25, DeliveryVector::LipidNanoparticles),
            20
        );
        // AAV adds a flat 5.
        assert_eq!(compute_immune_risk(true, 0.25, DeliveryVector::Aav), 25);
    }

    #[test]
    fn immune_risk_clamps_at_95() {
        assert_eq!(compute_immune_risk(true, 2.0, DeliveryVector::Aav), 95);
    }

    #[test]
    fn averages_over_ranked_set() {
        let ranked: Vec<ScoredCandidate> = [(40.0, 0.1), (60.0, 0.3)]
            .iter()
            .map(|&(gc_score, cpg)| ScoredCandidate {
                position: 0,
                guide: "ATGCATGCATGCATGCATGC".to_string(),
                pam: "AGG".to_string(),
                gc_score,
                cpg_density: cpg,
                codon_bias_index: 1.0,
                off_target_score: 90.0,
            })
            .collect();

        let (avg_gc, avg_cpg) = ranked_set_averages(&ranked);
        assert_eq!(avg_gc, 50.0);
        assert!((avg_cpg - 0.2).abs() < 1e-12);

        assert_eq!(ranked_set_averages(&[]), (0.0, 0.0));
    }

    #[test]
    fn outcome_is_reproducible() {
        let first = simulate_outcome(DeliveryVector::Aav, 72.5, 0.15, true);
        let second = simulate_outcome(DeliveryVector::Aav, 72.5, 0.15, true);
        assert_eq!(first, second);
        assert!((0..=100).contains(&first.delivery_success_percent));
        assert!((0..=95).contains(&first.immune_risk_percent));
    }
}
