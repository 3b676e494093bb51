//! Search results and the server-side query reference they produce.

use serde::{Deserialize, Serialize};

/// Server-side handle to a stored search (`WebEnv` + `query_key`).
///
/// Lets a later fetch reuse a search without resubmitting the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReference {
    /// History server environment token.
    pub web_env: String,
    /// Key of the query inside that environment.
    pub query_key: String,
}

/// What a nucleotide search returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of matches reported by the server.
    ///
    /// Can exceed the search cap; the cap only bounds the identifiers kept
    /// behind the query reference.
    pub count: u64,
    /// Reusable handle for fetching the matches.
    pub query: QueryReference,
}

/// A resolved taxon and the search issued for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonSearch {
    /// Taxonomic identifier as given.
    pub taxid: String,
    /// Scientific name of the organism.
    pub organism: String,
    /// Total number of matching nucleotide records.
    pub count: u64,
    /// Handle for fetching the records.
    pub query: QueryReference,
}

/// Builds the Entrez search term selecting all records of a taxon.
///
/// # Examples
///
/// ```
/// assert_eq!(taxfetch::core::organism_term("9606"), "txid9606[Organism]");
/// ```
#[must_use]
pub fn organism_term(taxid: &str) -> String {
    format!("txid{}[Organism]", taxid.trim())
}
