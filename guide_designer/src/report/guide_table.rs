use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::models::ScoredCandidate;

/// Materialize the ranked guide table in report column order.
pub fn guide_dataframe(ranked: &[ScoredCandidate]) -> PolarsResult<DataFrame> {
    let positions: Vec<u64> = ranked.iter().map(|c| c.position as u64).collect();
    let guides: Vec<&str> = ranked.iter().map(|c| c.guide.as_str()).collect();
    let pams: Vec<&str> = ranked.iter().map(|c| c.pam.as_str()).collect();
    let gc_scores: Vec<f64> = ranked.iter().map(|c| c.gc_score).collect();
    let cpg_densities: Vec<f64> = ranked.iter().map(|c| c.cpg_density).collect();
    let codon_bias: Vec<f64> = ranked.iter().map(|c| c.codon_bias_index).collect();
    let off_target: Vec<f64> = ranked.iter().map(|c| c.off_target_score).collect();

    df![
        "Position" => positions,
        "Guide RNA" => guides,
        "PAM" => pams,
        "GC Score" => gc_scores,
        "CpG Density" => cpg_densities,
        "Codon Bias" => codon_bias,
        "Off-target Score" => off_target,
    ]
}

pub fn write_guides_csv(ranked: &[ScoredCandidate], path: &Path) -> Result<()> {
    let mut df = guide_dataframe(ranked)?;
    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked_fixture() -> Vec<ScoredCandidate> {
        vec![
            ScoredCandidate {
                position: 2,
                guide: "CCCCCAAAAATTTTTGGGGG".to_string(),
                pam: "TGG".to_string(),
                gc_score: 50.0,
                cpg_density: 0.0,
                codon_bias_index: 1.0,
                off_target_score: 100.0,
            },
            ScoredCandidate {
                position: 27,
                guide: "GCGCGCGCGCGCGCGCGCGC".to_string(),
                pam: "AGG".to_string(),
                gc_score: 100.0,
                cpg_density: 0.5,
                codon_bias_index: 20.0,
                off_target_score: 15.0,
            },
        ]
    }

    #[test]
    fn dataframe_has_report_columns_in_order() {
        let df = guide_dataframe(&ranked_fixture()).unwrap();
        assert_eq!(df.height(), 2);

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Position",
                "Guide RNA",
                "PAM",
                "GC Score",
                "CpG Density",
                "Codon Bias",
                "Off-target Score"
            ]
        );
    }

    #[test]
    fn empty_result_set_still_builds_a_frame() {
        let df = guide_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 7);
    }

    #[test]
    fn csv_export_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guides.csv");
        write_guides_csv(&ranked_fixture(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Position,Guide RNA,PAM,GC Score,CpG Density,Codon Bias,Off-target Score"
        );
        assert!(contents.contains("CCCCCAAAAATTTTTGGGGG"));
        assert!(contents.contains("TGG"));
        assert_eq!(contents.lines().count(), 3);
    }
}
