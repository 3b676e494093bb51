//! CSV export of filtered records.

use crate::core::FilteredRecord;
use crate::error::{Error, OutputError, Result};
use crate::report::ensure_parent_dir;
use std::path::Path;
use tracing::info;

/// File name used when no path is given.
pub const DEFAULT_CSV_PATH: &str = "report.csv";

/// Writes records as CSV with an `accession,length,description` header.
///
/// Rows keep the order of `records`. An existing file is overwritten.
///
/// # Errors
///
/// Returns `OutputError::Csv` if the file cannot be created or written.
pub fn export_csv<P: AsRef<Path>>(records: &[FilteredRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();
    let csv_error = |e: csv::Error| OutputError::Csv {
        path: path_str.clone(),
        reason: e.to_string(),
    };

    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| OutputError::WriteFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), rows = records.len(), "saved CSV report");
    Ok(())
}

/// Reads a report written by [`export_csv`].
///
/// # Errors
///
/// Returns `OutputError::ReadFailed` if the file cannot be opened and
/// `OutputError::Csv` if a row does not deserialize.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<FilteredRecord>> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();

    let mut reader = csv::Reader::from_path(path).map_err(|e| OutputError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    reader
        .deserialize::<FilteredRecord>()
        .map(|row| {
            row.map_err(|e| {
                Error::from(OutputError::Csv {
                    path: path_str.clone(),
                    reason: e.to_string(),
                })
            })
        })
        .collect()
}
