// src/ncbi.rs

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::api_handler::ApiHandler;
use crate::models::{EsearchResponse, FetchedSequence};

const NCBI_EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Search the NCBI nucleotide database by free text and fetch the first hit
/// as FASTA.
pub fn fetch_nucleotide_sequence(search_term: &str) -> Result<FetchedSequence> {
    let api = ApiHandler::new(NCBI_EUTILS_BASE_URL)?;
    let search_term = search_term.trim();

    let nuccore_id = search_nucleotide_db(&api, search_term)?;
    info!("NCBI search '{}' resolved to nuccore {}", search_term, nuccore_id);

    let payload = api.get_plain_text(
        "/efetch.fcgi",
        &[
            ("db", "nucleotide"),
            ("id", nuccore_id.as_str()),
            ("rettype", "fasta"),
            ("retmode", "text"),
        ],
    )?;

    let (header, sequence) = split_fasta_payload(&payload);
    if sequence.is_empty() {
        bail!("NCBI: entry {} contained no sequence data", nuccore_id);
    }
    info!("fetched {} bases from nuccore {}", sequence.len(), nuccore_id);

    Ok(FetchedSequence {
        sequence,
        identifier: format!("NCBI nuccore ID: {} | {}", nuccore_id, header),
    })
}

fn search_nucleotide_db(api: &ApiHandler, term: &str) -> Result<String> {
    let response: EsearchResponse = api.get_json(
        "/esearch.fcgi",
        &[("db", "nucleotide"), ("retmode", "json"), ("term", term)],
    )?;

    response
        .esearch_result
        .id_list
        .into_iter()
        .next()
        .with_context(|| format!("NCBI: no hits for '{}', try a different term", term))
}

/// Split an efetch FASTA payload into its first header line and the
/// concatenated, uppercased sequence body.
fn split_fasta_payload(payload: &str) -> (String, String) {
    let mut header = String::new();
    let mut sequence = String::new();

    for line in payload.trim().lines() {
        if let Some(rest) = line.strip_prefix('>') {
            if header.is_empty() {
                header = rest.trim().to_string();
            }
        } else {
            sequence.push_str(line.trim());
        }
    }

    (header, sequence.to_ascii_uppercase())
}
