use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Uppercase a raw string and keep only the four nucleotide letters.
/// Whitespace, digits and ambiguity codes are all dropped.
pub fn normalize_sequence(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| {
            let upper = c.to_ascii_uppercase();
            matches!(upper, 'A' | 'T' | 'G' | 'C').then_some(upper)
        })
        .collect()
}

/// A FASTA file reduced to a display identifier and its normalized bases.
#[derive(Debug, Clone)]
pub struct FastaInput {
    pub identifier: String,
    pub sequence: String,
}

/// Read a FASTA file: the first header line becomes the identifier and all
/// non-header lines are joined and normalized. Multi-record files are
/// treated as one concatenated sequence.
pub fn read_fasta_file(path: &Path) -> Result<FastaInput> {
    let file = File::open(path)
        .with_context(|| format!("failed to open FASTA file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut identifier: Option<String> = None;
    let mut raw_sequence = String::new();

    for line in reader.lines() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if let Some(header) = line.strip_prefix('>') {
            if identifier.is_none() {
                identifier = Some(header.trim().to_string());
            }
        } else {
            raw_sequence.push_str(line.trim());
        }
    }

    let sequence = normalize_sequence(&raw_sequence);
    if sequence.is_empty() {
        bail!("no nucleotide data found in {}", path.display());
    }

    Ok(FastaInput {
        identifier: identifier.unwrap_or_else(|| "FASTA".to_string()),
        sequence,
    })
}
