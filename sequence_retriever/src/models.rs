// src/models.rs

use serde::Deserialize;

/// A nucleotide sequence retrieved from a public database, together with a
/// human-readable identifier suitable for report headers.
#[derive(Debug, Clone)]
pub struct FetchedSequence {
    pub sequence: String,
    pub identifier: String,
}

/// One Ensembl cross-reference entry from the symbol lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct Xref {
    pub id: String,
    #[serde(rename = "type")]
    pub id_type: String,
}

#[derive(Debug, Deserialize)]
pub struct EsearchResponse {
    #[serde(rename = "esearchresult")]
    pub esearch_result: EsearchResult,
}

#[derive(Debug, Deserialize)]
pub struct EsearchResult {
    #[serde(rename = "idlist", default)]
    pub id_list: Vec<String>,
}
