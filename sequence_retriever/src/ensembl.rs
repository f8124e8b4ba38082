// src/ensembl.rs

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::api_handler::ApiHandler;
use crate::models::{FetchedSequence, Xref};

const ENSEMBL_BASE_URL: &str = "https://rest.ensembl.org";

/// Resolve a human gene symbol to its genomic sequence via the Ensembl REST
/// API. Fails with a distinct reason for "gene not found" versus "sequence
/// unavailable" so callers can show the message verbatim.
pub fn fetch_gene_sequence(gene_symbol: &str) -> Result<FetchedSequence> {
    let api = ApiHandler::new(ENSEMBL_BASE_URL)?;
    let gene_symbol = gene_symbol.trim();

    let gene_id = lookup_gene_id(&api, gene_symbol)?;
    info!("resolved {} to Ensembl gene {}", gene_symbol, gene_id);

    let sequence = fetch_genomic_sequence(&api, &gene_id)?;
    info!("fetched {} bases for {}", sequence.len(), gene_id);

    Ok(FetchedSequence {
        sequence,
        identifier: format!("Ensembl ID: {}", gene_id),
    })
}

fn lookup_gene_id(api: &ApiHandler, gene_symbol: &str) -> Result<String> {
    let endpoint = format!("/xrefs/symbol/homo_sapiens/{}", gene_symbol);
    let xrefs: Vec<Xref> = api.get_json(&endpoint, &[])?;

    xrefs
        .into_iter()
        .find(|xref| xref.id_type == "gene")
        .map(|xref| xref.id)
        .with_context(|| format!("Ensembl: no gene found for symbol '{}'", gene_symbol))
}

fn fetch_genomic_sequence(api: &ApiHandler, gene_id: &str) -> Result<String> {
    let endpoint = format!("/sequence/id/{}", gene_id);
    let sequence = api.get_plain_text(&endpoint, &[("type", "genomic")])?;

    let sequence = sequence.trim().to_ascii_uppercase();
    if sequence.is_empty() {
        bail!("Ensembl: sequence unavailable for {}", gene_id);
    }
    Ok(sequence)
}
