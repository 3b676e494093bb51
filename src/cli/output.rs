//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::TaxonSearch;
use crate::error::Error;
use crate::pipeline::RunReport;
use serde::Serialize;
use std::fmt::Write;

/// Message printed when nothing passed the length filter.
pub const NO_RECORDS_MESSAGE: &str = "No records found within specified length range.";

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the result of a run or a local filter.
#[must_use]
pub fn format_run_report(report: &RunReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_run_report_text(report),
        OutputFormat::Json => format_json(report),
    }
}

fn format_run_report_text(report: &RunReport) -> String {
    let mut output = String::new();
    if let Some(ref organism) = report.organism {
        let _ = writeln!(output, "Organism: {organism}");
    }
    if let Some(total) = report.total_count {
        let _ = writeln!(output, "Total records found: {total}");
    }
    let _ = writeln!(output, "Filtered records: {}", report.records.len());

    if report.records.is_empty() {
        let _ = writeln!(output, "{NO_RECORDS_MESSAGE}");
        return output;
    }
    if let Some(ref path) = report.csv_path {
        let _ = writeln!(output, "Saved CSV report to {}", path.display());
    }
    if let Some(ref path) = report.plot_path {
        let _ = writeln!(output, "Saved plot to {}", path.display());
    }
    output
}

/// Formats a search-only result.
#[must_use]
pub fn format_search(search: &TaxonSearch, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Organism: {}", search.organism);
            let _ = writeln!(output, "Total records found: {}", search.count);
            output
        }
        OutputFormat::Json => format_json(search),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput<'a> {
                success: bool,
                error: String,
                kind: &'a str,
                retryable: bool,
            }
            let (kind, retryable) = match error {
                Error::Input(_) => ("input", false),
                Error::Remote(e) => ("remote", e.is_retryable()),
                Error::Output(_) => ("output", false),
                Error::Config { .. } => ("config", false),
            };
            format_json(&ErrorOutput {
                success: false,
                error: error.to_string(),
                kind,
                retryable,
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FilteredRecord, QueryReference};
    use crate::error::RemoteError;
    use std::path::PathBuf;

    fn report(records: Vec<FilteredRecord>) -> RunReport {
        let exported = !records.is_empty();
        RunReport {
            organism: Some("Escherichia coli".to_string()),
            total_count: Some(5000),
            scanned: 200,
            records,
            csv_path: exported.then(|| PathBuf::from("taxid_filtered_report.csv")),
            plot_path: exported.then(|| PathBuf::from("taxid_sequence_plot.png")),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_format_run_report_text() {
        let text = format_run_report(
            &report(vec![FilteredRecord::new("B", 1000, "b")]),
            OutputFormat::Text,
        );
        assert_eq!(
            text,
            "Organism: Escherichia coli\n\
             Total records found: 5000\n\
             Filtered records: 1\n\
             Saved CSV report to taxid_filtered_report.csv\n\
             Saved plot to taxid_sequence_plot.png\n"
        );
    }

    #[test]
    fn test_format_run_report_empty() {
        let text = format_run_report(&report(Vec::new()), OutputFormat::Text);
        assert!(text.contains("Filtered records: 0\n"));
        assert!(text.ends_with("No records found within specified length range.\n"));
        assert!(!text.contains("Saved"));
    }

    #[test]
    fn test_format_run_report_json() {
        let json = format_run_report(
            &report(vec![FilteredRecord::new("B", 1000, "b")]),
            OutputFormat::Json,
        );
        assert!(json.contains("\"total_count\": 5000"));
        assert!(json.contains("\"accession\": \"B\""));
    }

    #[test]
    fn test_format_search() {
        let search = TaxonSearch {
            taxid: "562".to_string(),
            organism: "Escherichia coli".to_string(),
            count: 42,
            query: QueryReference {
                web_env: "MCID_1".to_string(),
                query_key: "1".to_string(),
            },
        };
        let text = format_search(&search, OutputFormat::Text);
        assert_eq!(text, "Organism: Escherichia coli\nTotal records found: 42\n");
    }

    #[test]
    fn test_format_error_json() {
        let err: Error = RemoteError::Http {
            endpoint: "esearch".to_string(),
            status: 429,
            message: "Too Many Requests".to_string(),
        }
        .into();
        let json = format_error(&err, OutputFormat::Json);
        assert!(json.contains("\"kind\": \"remote\""));
        assert!(json.contains("\"retryable\": true"));
    }
}
