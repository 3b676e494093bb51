//! Core domain models for taxfetch.
//!
//! This module contains the data structures threaded through the retrieval
//! pipeline: the client session, query references and filtered records.
//! These are pure domain models with no I/O dependencies.

pub mod config;
pub mod query;
pub mod record;
pub mod session;

pub use config::{
    DEFAULT_CLI_CSV_PATH, DEFAULT_CLI_PLOT_PATH, DEFAULT_FETCH_CAP, DEFAULT_SEARCH_CAP,
    RetrievalConfig,
};
pub use query::{QueryReference, SearchResponse, TaxonSearch, organism_term};
pub use record::{FetchOutcome, FilteredRecord, LengthRange};
pub use session::{Session, TOOL_NAME};
