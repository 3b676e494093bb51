//! Filtered sequence records and the length bound used to select them.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One sequence retained after length filtering.
///
/// Field order matches the report columns: `accession,length,description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredRecord {
    /// Accession with version (e.g. `NC_045512.2`).
    pub accession: String,
    /// Number of residues.
    pub length: usize,
    /// Free-text definition line.
    pub description: String,
}

impl FilteredRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(accession: impl Into<String>, length: usize, description: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            length,
            description: description.into(),
        }
    }
}

/// Inclusive sequence-length bound.
///
/// `min <= max` is expected but not enforced: an inverted range is legal
/// and matches nothing.
///
/// # Examples
///
/// ```
/// use taxfetch::core::LengthRange;
///
/// let range = LengthRange::new(500, 1500);
/// assert!(range.contains(500));
/// assert!(range.contains(1500));
/// assert!(!range.contains(1501));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    /// Smallest accepted length.
    pub min: usize,
    /// Largest accepted length.
    pub max: usize,
}

impl LengthRange {
    /// Creates a new inclusive range.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `length` lies within the bound.
    #[must_use]
    pub const fn contains(&self, length: usize) -> bool {
        self.min <= length && length <= self.max
    }

    /// True when `min > max`.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Result of one fetch-and-filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchOutcome {
    /// Number of records read from the stream.
    pub scanned: usize,
    /// Records within the length bound, in arrival order.
    pub records: Vec<FilteredRecord>,
}

impl FetchOutcome {
    /// Consumes a record stream, keeping records within `range`.
    ///
    /// Records are tested one at a time as the stream produces them and the
    /// accepted ones keep their arrival order. The first stream error stops
    /// the pass.
    pub fn collect<I>(records: I, range: LengthRange) -> Result<Self>
    where
        I: IntoIterator<Item = Result<FilteredRecord>>,
    {
        let mut outcome = Self::default();
        for record in records {
            let record = record?;
            outcome.scanned += 1;
            if range.contains(record.length) {
                outcome.records.push(record);
            }
        }
        Ok(outcome)
    }

    /// Whether no record passed the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
