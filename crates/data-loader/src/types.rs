//! Core domain types for the restaurant dataset.
//!
//! A dataset is kept row-oriented: one header of column names and a list of
//! records whose cells line up with that header. Cells are textual and may be
//! missing (`None`), which is how nulls from the source survive the trip.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Raw Records
// =============================================================================

/// A dataset row as acquired from the source, before any numeric derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    values: Vec<Option<String>>,
}

impl RawRecord {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Get the text of a cell by column position.
    ///
    /// Returns `None` both for a null cell and for a position past the end
    /// of the row; callers treat the two the same way.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.values.get(column).and_then(|v| v.as_deref())
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<Option<S>> for RawRecord {
    fn from_iter<I: IntoIterator<Item = Option<S>>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|v| v.map(Into::into)).collect())
    }
}

/// A tabular collection of raw records sharing one header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub(crate) columns: Vec<String>,
    pub(crate) records: Vec<RawRecord>,
}

impl Dataset {
    /// Creates an empty dataset with the given header.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        check_unique(&columns)?;
        Ok(Self {
            columns,
            records: Vec::new(),
        })
    }

    /// Build a dataset from a header and rows of cells.
    pub fn from_rows<I>(columns: Vec<String>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut dataset = Self::new(columns)?;
        for record in rows {
            dataset.push(record)?;
        }
        Ok(dataset)
    }

    /// Append a record, checking that it is as wide as the header.
    pub fn push(&mut self, record: RawRecord) -> Result<()> {
        if record.len() != self.columns.len() {
            return Err(DataLoadError::FieldCountMismatch {
                expected: self.columns.len(),
                found: record.len(),
                row: self.records.len(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column in the header, if the dataset has it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// Look up a cell by row position and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.records.get(row)?.get(idx)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-check the structural invariants.
    ///
    /// Needed after deserializing, since serde bypasses `new`/`push`.
    pub fn validate(&self) -> Result<()> {
        check_unique(&self.columns)?;
        for (row, record) in self.records.iter().enumerate() {
            if record.len() != self.columns.len() {
                return Err(DataLoadError::FieldCountMismatch {
                    expected: self.columns.len(),
                    found: record.len(),
                    row,
                });
            }
        }
        Ok(())
    }
}

fn check_unique(columns: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(DataLoadError::DuplicateColumn(column.clone()));
        }
    }
    Ok(())
}

// =============================================================================
// Preprocessed Records
// =============================================================================

/// A raw record plus the numeric fields derived from its text.
///
/// `rating_value` and `cost_value` are `None` when the source text could not
/// be understood; that is a different thing from a rating or cost of zero.
/// `votes_value` always has a value and falls back to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessedRecord {
    pub raw: RawRecord,
    pub rating_value: Option<f64>,
    pub cost_value: Option<f64>,
    pub votes_value: u64,
}

impl PreprocessedRecord {
    /// Text of one of the original cells.
    pub fn text(&self, column: usize) -> Option<&str> {
        self.raw.get(column)
    }
}

/// Output of the preprocessor: the original header plus derived records,
/// row for row.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessedDataset {
    pub(crate) columns: Vec<String>,
    pub(crate) records: Vec<PreprocessedRecord>,
}

impl PreprocessedDataset {
    /// Assemble a preprocessed dataset from records already derived against
    /// `columns` (e.g. a filtered subset of another preprocessed dataset).
    pub fn with_records(columns: Vec<String>, records: Vec<PreprocessedRecord>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn records(&self) -> &[PreprocessedRecord] {
        &self.records
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.records.get(row)?.text(idx)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
