//! The retrieval pipeline: resolve a taxon, fetch and filter its records,
//! export the result.
//!
//! Each step returns its result explicitly; nothing is carried between
//! calls in hidden state.

use crate::core::{
    FetchOutcome, FilteredRecord, LengthRange, QueryReference, RetrievalConfig, TaxonSearch,
    organism_term,
};
use crate::entrez::SequenceDatabase;
use crate::error::Result;
use crate::genbank::filter_genbank;
use crate::report::{export_csv, generate_plot};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Records fetched when the caller gives no cap.
pub const DEFAULT_MAX_RECORDS: usize = 100;

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Scientific name of the taxon, when one was resolved.
    pub organism: Option<String>,
    /// Total matches reported by the search, when one was run.
    pub total_count: Option<u64>,
    /// Records read from the fetched stream.
    pub scanned: usize,
    /// Records within the length bound, in arrival order.
    pub records: Vec<FilteredRecord>,
    /// CSV report path, if one was written.
    pub csv_path: Option<PathBuf>,
    /// Chart path, if one was written.
    pub plot_path: Option<PathBuf>,
}

impl RunReport {
    /// Builds a report from a filter pass, exporting when anything passed.
    ///
    /// Nothing is written for an empty result.
    ///
    /// # Errors
    ///
    /// Returns an output error if either file cannot be written. A CSV
    /// written before a chart failure stays on disk.
    pub fn export(
        outcome: FetchOutcome,
        csv_path: &std::path::Path,
        plot_path: &std::path::Path,
    ) -> Result<Self> {
        let mut report = Self {
            organism: None,
            total_count: None,
            scanned: outcome.scanned,
            records: outcome.records,
            csv_path: None,
            plot_path: None,
        };

        if report.records.is_empty() {
            info!("no records within the length range; skipping export");
            return Ok(report);
        }

        export_csv(&report.records, csv_path)?;
        report.csv_path = Some(csv_path.to_path_buf());
        generate_plot(&report.records, plot_path)?;
        report.plot_path = Some(plot_path.to_path_buf());
        Ok(report)
    }
}

/// Drives a [`SequenceDatabase`] through resolve, fetch and filter.
///
/// # Examples
///
/// ```no_run
/// use taxfetch::core::{LengthRange, Session};
/// use taxfetch::entrez::EutilsClient;
/// use taxfetch::pipeline::Retriever;
///
/// let client = EutilsClient::new(Session::new("me@example.org", "")).unwrap();
/// let retriever = Retriever::new(client);
/// let search = retriever.search_taxid("2697049", 1000).unwrap();
/// let outcome = retriever
///     .fetch_filtered_records(&search.query, LengthRange::new(29000, 30000), Some(200))
///     .unwrap();
/// println!("{} of {} kept", outcome.records.len(), outcome.scanned);
/// ```
#[derive(Debug)]
pub struct Retriever<D> {
    db: D,
}

impl<D: SequenceDatabase> Retriever<D> {
    /// Wraps a database client.
    pub const fn new(db: D) -> Self {
        Self { db }
    }

    /// Resolves a taxon and stores a nucleotide search for it server-side.
    ///
    /// # Errors
    ///
    /// Propagates any remote error; nothing is retried.
    pub fn search_taxid(&self, taxid: &str, search_cap: usize) -> Result<TaxonSearch> {
        let organism = self.db.scientific_name(taxid)?;
        info!(taxid, organism = %organism, "resolved taxon");

        let response = self.db.search(&organism_term(taxid), search_cap)?;
        info!(taxid, count = response.count, "nucleotide search stored");

        Ok(TaxonSearch {
            taxid: taxid.trim().to_string(),
            organism,
            count: response.count,
            query: response.query,
        })
    }

    /// Fetches up to `max_records` records of a stored search and keeps
    /// those within `range`.
    ///
    /// `None` fetches [`DEFAULT_MAX_RECORDS`]. Zero fetched or zero kept is
    /// an empty outcome, not an error.
    ///
    /// # Errors
    ///
    /// Propagates remote and GenBank parse errors.
    pub fn fetch_filtered_records(
        &self,
        query: &QueryReference,
        range: LengthRange,
        max_records: Option<usize>,
    ) -> Result<FetchOutcome> {
        let max_records = max_records.unwrap_or(DEFAULT_MAX_RECORDS);
        if range.is_inverted() {
            warn!(min = range.min, max = range.max, "length range is inverted; nothing can match");
        }

        let stream = self.db.fetch(query, max_records)?;
        let outcome = filter_genbank(stream, range)?;
        info!(
            scanned = outcome.scanned,
            kept = outcome.records.len(),
            "filtered fetched records"
        );
        Ok(outcome)
    }

    /// Runs the whole pipeline for one configuration.
    ///
    /// # Errors
    ///
    /// The first error from any step ends the run. Files written before it
    /// remain on disk.
    pub fn run(&self, config: &RetrievalConfig) -> Result<RunReport> {
        let search = self.search_taxid(&config.taxid, config.search_cap)?;
        let outcome =
            self.fetch_filtered_records(&search.query, config.range, Some(config.fetch_cap))?;

        let mut report = RunReport::export(outcome, &config.csv_path, &config.plot_path)?;
        report.organism = Some(search.organism);
        report.total_count = Some(search.count);
        Ok(report)
    }
}
