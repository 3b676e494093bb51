//! # taxfetch
//!
//! Retrieve NCBI nucleotide records for a taxon, filter them by sequence
//! length, and report the result.
//!
//! The pipeline runs in four steps over a single in-memory record list:
//!
//! - **Session**: contact identity and API key for E-utilities
//! - **Resolve**: taxonomic ID to organism name, plus a stored nucleotide search
//! - **Fetch & filter**: stream GenBank records and keep those within a length range
//! - **Report**: CSV table and a PNG chart of length by accession

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod entrez;
pub mod error;
pub mod genbank;
pub mod pipeline;
pub mod report;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{
    FetchOutcome, FilteredRecord, LengthRange, QueryReference, RetrievalConfig, SearchResponse,
    Session, TaxonSearch,
};

// Re-export remote access types
pub use entrez::{EutilsClient, SequenceDatabase};

// Re-export pipeline types
pub use pipeline::{DEFAULT_MAX_RECORDS, Retriever, RunReport};

// Re-export report functions
pub use report::{chart_order, export_csv, generate_plot, read_csv, render_chart_svg};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
