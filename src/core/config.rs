//! Run configuration.

use crate::core::{LengthRange, Session};
use std::path::PathBuf;

/// Default cap on identifiers kept behind a search's query reference.
pub const DEFAULT_SEARCH_CAP: usize = 1000;

/// Default cap on records fetched by a full run.
pub const DEFAULT_FETCH_CAP: usize = 200;

/// CSV report written by a full run.
pub const DEFAULT_CLI_CSV_PATH: &str = "taxid_filtered_report.csv";

/// Chart written by a full run.
pub const DEFAULT_CLI_PLOT_PATH: &str = "taxid_sequence_plot.png";

/// Everything one retrieval run needs.
///
/// Replaces interactive prompting: whatever entry point drives the
/// pipeline fills this in.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Client identity.
    pub session: Session,
    /// Taxonomic identifier (opaque, not validated).
    pub taxid: String,
    /// Accepted sequence lengths.
    pub range: LengthRange,
    /// Maximum identifiers tracked by the search.
    pub search_cap: usize,
    /// Maximum records fetched.
    pub fetch_cap: usize,
    /// Where the CSV report goes.
    pub csv_path: PathBuf,
    /// Where the chart goes.
    pub plot_path: PathBuf,
}

impl RetrievalConfig {
    /// Creates a configuration with default caps and output paths.
    #[must_use]
    pub fn new(session: Session, taxid: impl Into<String>, range: LengthRange) -> Self {
        Self {
            session,
            taxid: taxid.into(),
            range,
            search_cap: DEFAULT_SEARCH_CAP,
            fetch_cap: DEFAULT_FETCH_CAP,
            csv_path: PathBuf::from(DEFAULT_CLI_CSV_PATH),
            plot_path: PathBuf::from(DEFAULT_CLI_PLOT_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RetrievalConfig::new(
            Session::new("me@example.org", "key"),
            "9606",
            LengthRange::new(1, 2),
        );
        assert_eq!(config.search_cap, 1000);
        assert_eq!(config.fetch_cap, 200);
        assert_eq!(config.csv_path, PathBuf::from("taxid_filtered_report.csv"));
        assert_eq!(config.plot_path, PathBuf::from("taxid_sequence_plot.png"));
    }
}
