use anyhow::bail;
use std::fmt;
use std::str::FromStr;

/// SpCas9 guide width in bases.
pub const GUIDE_LEN: usize = 20;
/// PAM trimer width.
pub const PAM_LEN: usize = 3;
/// Full site width: guide plus PAM.
pub const SITE_LEN: usize = GUIDE_LEN + PAM_LEN;

/// A PAM-adjacent guide site emitted by the scanner. `guide` is exactly 20
/// bases, `pam` exactly 3 and ending in "GG".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub position: usize,
    pub guide: String,
    pub pam: String,
}

/// A candidate with its four heuristic metrics attached. Derived purely from
/// the guide string.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub position: usize,
    pub guide: String,
    pub pam: String,
    /// Percentage of G/C bases, 0-100.
    pub gc_score: f64,
    /// Adjacent "CG" pairs per base, typically 0-0.3.
    pub cpg_density: f64,
    /// Dinucleotide GC/AT ratio proxy, near 1.0 is neutral.
    pub codon_bias_index: f64,
    /// 0-100, higher means less likely off-target binding.
    pub off_target_score: f64,
}

/// Simulated delivery mechanism. Only selects baseline outcome constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryVector {
    LipidNanoparticles,
    Aav,
    Electroporation,
}

impl DeliveryVector {
    pub fn base_success(&self) -> i64 {
        match self {
            DeliveryVector::LipidNanoparticles => 85,
            DeliveryVector::Aav => 75,
            DeliveryVector::Electroporation => 65,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryVector::LipidNanoparticles => "Lipid Nanoparticles",
            DeliveryVector::Aav => "AAV",
            DeliveryVector::Electroporation => "Electroporation",
        }
    }
}

impl FromStr for DeliveryVector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lnp" | "lipid-nanoparticles" => Ok(DeliveryVector::LipidNanoparticles),
            "aav" => Ok(DeliveryVector::Aav),
            "electroporation" => Ok(DeliveryVector::Electroporation),
            other => bail!(
                "unknown delivery vector '{}', expected lnp, aav or electroporation",
                other
            ),
        }
    }
}

impl fmt::Display for DeliveryVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Simulated delivery/immune outcome, both in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeEstimate {
    pub delivery_success_percent: i64,
    /// Forced to 0 when the immune simulation is disabled.
    pub immune_risk_percent: i64,
}

/// Caps applied to one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Scan stops after this many candidate sites, for speed on long inputs.
    pub max_scan_candidates: usize,
    /// Ranked result rows kept for reporting.
    pub max_result_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_scan_candidates: 200,
            max_result_rows: 10,
        }
    }
}

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct SequenceAnalysis {
    /// Length of the analyzed sequence in bases.
    pub sequence_length: usize,
    /// Top guides, best first; at most `max_result_rows` entries.
    pub ranked: Vec<ScoredCandidate>,
    /// Candidate sites found by the scan (after the scan cap).
    pub candidate_count: usize,
    pub mean_gc_score: f64,
    pub mean_cpg_density: f64,
    pub outcome: OutcomeEstimate,
    pub cut_preview: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_parses_from_cli_spellings() {
        assert_eq!(
            "lnp".parse::<DeliveryVector>().unwrap(),
            DeliveryVector::LipidNanoparticles
        );
        assert_eq!("AAV".parse::<DeliveryVector>().unwrap(), DeliveryVector::Aav);
        assert_eq!(
            "Electroporation".parse::<DeliveryVector>().unwrap(),
            DeliveryVector::Electroporation
        );
        assert!("gene gun".parse::<DeliveryVector>().is_err());
    }

    #[test]
    fn vector_baselines() {
        assert_eq!(DeliveryVector::LipidNanoparticles.base_success(), 85);
        assert_eq!(DeliveryVector::Aav.base_success(), 75);
        assert_eq!(DeliveryVector::Electroporation.base_success(), 65);
    }
}
