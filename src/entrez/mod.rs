//! Access to the remote sequence database.
//!
//! [`SequenceDatabase`] is the seam between the retrieval pipeline and
//! NCBI. [`EutilsClient`] implements it over HTTPS; tests substitute an
//! in-memory implementation.

pub mod client;
pub mod response;

pub use client::{DEFAULT_BASE_URL, EutilsClient};
pub use response::{efetch_markup_error, parse_esearch_json, parse_taxonomy_xml};

use crate::core::{QueryReference, SearchResponse};
use crate::error::Result;
use std::io::Read;

/// Operations the pipeline needs from a sequence database.
///
/// Implementations block until the remote call completes. No retries are
/// attempted at this layer.
pub trait SequenceDatabase {
    /// Looks up the scientific name of a taxon.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::TaxonNotFound` when the taxonomy database has
    /// no entry for `taxid`, or any transport/service error.
    fn scientific_name(&self, taxid: &str) -> Result<String>;

    /// Searches the nucleotide database and keeps the result on the
    /// history server.
    ///
    /// `search_cap` bounds how many identifiers the stored query tracks;
    /// the returned count is the full server-side total.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response lacks a
    /// history handle.
    fn search(&self, term: &str, search_cap: usize) -> Result<SearchResponse>;

    /// Fetches up to `max_records` GenBank flat-text records for a stored
    /// query.
    ///
    /// The returned reader streams the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn fetch(&self, query: &QueryReference, max_records: usize) -> Result<Box<dyn Read>>;
}

impl<T: SequenceDatabase + ?Sized> SequenceDatabase for &T {
    fn scientific_name(&self, taxid: &str) -> Result<String> {
        (**self).scientific_name(taxid)
    }

    fn search(&self, term: &str, search_cap: usize) -> Result<SearchResponse> {
        (**self).search(term, search_cap)
    }

    fn fetch(&self, query: &QueryReference, max_records: usize) -> Result<Box<dyn Read>> {
        (**self).fetch(query, max_records)
    }
}
