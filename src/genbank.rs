//! Streaming GenBank flat-text parsing into [`FilteredRecord`]s.

use crate::core::{FetchOutcome, FilteredRecord, LengthRange};
use crate::error::{Error, RemoteError, Result};
use gb_io::reader::SeqReader;
use gb_io::seq::Seq;
use std::io::Read;

/// Reduces a parsed GenBank entry to accession, length and description.
///
/// The accession is `accession.version` when a `VERSION` line is present,
/// falling back to `ACCESSION` and then the `LOCUS` name. Length counts the
/// residues under `ORIGIN`; entries without sequence data (contig-only
/// records) use the `LOCUS` length. The definition is joined onto one line
/// and a single trailing period is dropped.
#[must_use]
pub fn summarize(seq: &Seq) -> FilteredRecord {
    let accession = seq
        .version
        .as_deref()
        .or(seq.accession.as_deref())
        .or(seq.name.as_deref())
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let length = if seq.seq.is_empty() {
        seq.len.unwrap_or(0)
    } else {
        seq.seq.len()
    };

    // Wrapped DEFINITION lines join with a single space.
    let definition = seq
        .definition
        .as_deref()
        .map(|d| d.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let description = definition
        .strip_suffix('.')
        .unwrap_or(&definition)
        .to_string();

    FilteredRecord {
        accession,
        length,
        description,
    }
}

/// Lazily parses a GenBank stream, one record at a time.
pub fn records<R: Read>(reader: R) -> impl Iterator<Item = Result<FilteredRecord>> {
    SeqReader::new(reader).map(|parsed| {
        parsed
            .map(|seq| summarize(&seq))
            .map_err(|e| Error::from(RemoteError::Parse(e.to_string())))
    })
}

/// Parses a GenBank stream and keeps records within `range`.
///
/// An empty stream, or one where nothing passes, yields an empty outcome.
///
/// # Errors
///
/// Returns `RemoteError::Parse` on the first malformed record.
pub fn filter_genbank<R: Read>(reader: R, range: LengthRange) -> Result<FetchOutcome> {
    FetchOutcome::collect(records(reader), range)
}
