use std::fmt;
use std::io::Write;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::dates::METADATA_DATE_FORMAT;

/// One value of a projected table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Date(NaiveDateTime),
    Text(String),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Date(date) => write!(f, "{}", date.format(METADATA_DATE_FORMAT)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Aggregated rows projected onto shorthand columns
///
/// Row positions are contiguous from zero in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ProjectedTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Every cell of a column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Text values of a column, `None` for missing cells
    pub fn text_values(&self, name: &str) -> Option<Vec<Option<&str>>> {
        Some(self.column(name)?.into_iter().map(Cell::as_text).collect())
    }

    /// Values of a column rendered as text, dates in the metadata format
    pub fn display_values(&self, name: &str) -> Option<Vec<Option<String>>> {
        Some(
            self.column(name)?
                .into_iter()
                .map(|cell| (!cell.is_missing()).then(|| cell.to_string()))
                .collect(),
        )
    }

    /// Non-missing dates of a column, in row order
    pub fn dates(&self, name: &str) -> Vec<NaiveDateTime> {
        self.column(name)
            .map(|cells| cells.into_iter().filter_map(Cell::as_date).collect())
            .unwrap_or_default()
    }

    /// Write as UTF-8 CSV with a shorthand header row
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
