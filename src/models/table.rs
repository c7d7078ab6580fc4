use serde::{Deserialize, Serialize};

use super::field::{Field, shorthand_of};
use crate::error::{QueryError, Result};

/// Mandatory identifier column of every folder table
pub const SOURCE_FILE_COLUMN: &str = "SourceFile";

/// One row of a folder table
///
/// Cells are stored in column order. An empty cell is a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    cells: Vec<String>,
}

impl MetadataRecord {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, or `None` when absent or empty
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str).filter(|value| !value.is_empty())
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// In-memory form of one folder's metadata table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTable {
    columns: Vec<String>,
    records: Vec<MetadataRecord>,
    source_column: usize,
}

impl FieldTable {
    /// Build a table from qualified column names and raw rows
    ///
    /// Rows shorter than the header are padded with missing cells and longer
    /// rows are truncated. Returns `None` when there is no `SourceFile` column.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Option<Self> {
        let source_column = columns.iter().position(|c| c == SOURCE_FILE_COLUMN)?;
        let width = columns.len();
        let records = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, String::new());
                MetadataRecord::new(cells)
            })
            .collect();

        Some(Self { columns, records, source_column })
    }

    /// Assemble a table whose records already match the header width
    pub(crate) fn from_parts(
        columns: Vec<String>,
        records: Vec<MetadataRecord>,
        source_column: usize,
    ) -> Self {
        Self { columns, records, source_column }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every column as a [`Field`]
    pub fn fields(&self) -> Vec<Field> {
        self.columns.iter().map(|c| Field::new(c.as_str())).collect()
    }

    /// Position of a column by its qualified name
    pub fn column_index(&self, qualified: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == qualified)
    }

    /// Resolve a shorthand field name to the single column carrying it
    ///
    /// `Ok(None)` means the table has no such field, which is expected for
    /// heterogeneous folders. More than one candidate is reported as
    /// [`QueryError::AmbiguousField`] and must not be guessed.
    pub fn resolve_shorthand(&self, shorthand: &str) -> Result<Option<usize>> {
        let candidates: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| shorthand_of(column) == shorthand)
            .map(|(index, _)| index)
            .collect();

        match candidates.as_slice() {
            [] => Ok(None),
            [index] => Ok(Some(*index)),
            _ => Err(QueryError::AmbiguousField {
                field: shorthand.to_string(),
                candidates: candidates.iter().map(|&i| self.columns[i].clone()).collect(),
            }),
        }
    }

    /// Identifier of a record (the `SourceFile` cell, possibly empty)
    pub fn source_file<'a>(&self, record: &'a MetadataRecord) -> &'a str {
        record.cells.get(self.source_column).map(String::as_str).unwrap_or("")
    }

    /// Values of one column, `None` for missing cells
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.records.iter().map(move |record| record.get(index))
    }
}
