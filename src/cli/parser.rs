//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::core::{DEFAULT_CLI_CSV_PATH, DEFAULT_CLI_PLOT_PATH};
use crate::report::{DEFAULT_CSV_PATH, DEFAULT_PLOT_PATH};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// taxfetch: NCBI nucleotide records for a taxon, filtered by length.
///
/// Resolves a taxonomic ID, fetches GenBank records through E-utilities,
/// keeps those within a length range and writes a CSV report and a chart.
#[derive(Parser, Debug)]
#[command(name = "taxfetch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Identity and endpoint options for E-utilities.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Contact email sent to NCBI.
    #[arg(long, env = "NCBI_EMAIL")]
    pub email: Option<String>,

    /// NCBI API key.
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// E-utilities base URL.
    #[arg(long, env = "NCBI_EUTILS_URL", hide = true)]
    pub eutils_url: Option<String>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, filter and report records for a taxon.
    ///
    /// Any of email, API key, taxid and length bounds not given on the
    /// command line or in the environment is prompted for on stdin.
    Run {
        /// Identity options.
        #[command(flatten)]
        session: SessionArgs,

        /// Taxonomic ID.
        #[arg(short, long)]
        taxid: Option<String>,

        /// Minimum sequence length (inclusive).
        #[arg(long)]
        min_len: Option<usize>,

        /// Maximum sequence length (inclusive).
        #[arg(long)]
        max_len: Option<usize>,

        /// Maximum number of records to fetch.
        #[arg(short = 'n', long, default_value = "200")]
        max_records: usize,

        /// Maximum identifiers tracked by the stored search.
        #[arg(long, default_value = "1000")]
        search_cap: usize,

        /// CSV report path.
        #[arg(long, default_value = DEFAULT_CLI_CSV_PATH)]
        csv: PathBuf,

        /// Chart (PNG) path.
        #[arg(long, default_value = DEFAULT_CLI_PLOT_PATH)]
        plot: PathBuf,
    },

    /// Resolve a taxon and report how many nucleotide records match.
    Search {
        /// Identity options.
        #[command(flatten)]
        session: SessionArgs,

        /// Taxonomic ID.
        #[arg(short, long)]
        taxid: String,

        /// Maximum identifiers tracked by the stored search.
        #[arg(long, default_value = "1000")]
        search_cap: usize,
    },

    /// Filter a local GenBank file and write the report and chart.
    Filter {
        /// GenBank flat file.
        input: PathBuf,

        /// Minimum sequence length (inclusive).
        #[arg(long)]
        min_len: usize,

        /// Maximum sequence length (inclusive).
        #[arg(long)]
        max_len: usize,

        /// CSV report path.
        #[arg(long, default_value = DEFAULT_CSV_PATH)]
        csv: PathBuf,

        /// Chart (PNG) path.
        #[arg(long, default_value = DEFAULT_PLOT_PATH)]
        plot: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from([
            "taxfetch", "run", "--email", "me@example.org", "--api-key", "k", "--taxid", "9606",
            "--min-len", "10", "--max-len", "20",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                session,
                taxid,
                min_len,
                max_len,
                max_records,
                search_cap,
                csv,
                plot,
            } => {
                assert_eq!(session.email.as_deref(), Some("me@example.org"));
                assert_eq!(taxid.as_deref(), Some("9606"));
                assert_eq!(min_len, Some(10));
                assert_eq!(max_len, Some(20));
                assert_eq!(max_records, 200);
                assert_eq!(search_cap, 1000);
                assert_eq!(csv, PathBuf::from("taxid_filtered_report.csv"));
                assert_eq!(plot, PathBuf::from("taxid_sequence_plot.png"));
            }
            other => unreachable!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_filter_defaults() {
        let cli = Cli::try_parse_from([
            "taxfetch", "filter", "in.gb", "--min-len", "10", "--max-len", "20",
        ])
        .unwrap();
        match cli.command {
            Commands::Filter { input, csv, plot, .. } => {
                assert_eq!(input, PathBuf::from("in.gb"));
                assert_eq!(csv, PathBuf::from("report.csv"));
                assert_eq!(plot, PathBuf::from("length_plot.png"));
            }
            other => unreachable!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_length_rejected() {
        let result = Cli::try_parse_from([
            "taxfetch", "filter", "in.gb", "--min-len", "ten", "--max-len", "20",
        ]);
        assert!(result.is_err());
    }
}
