//! Multi-folder aggregation.
//!
//! [`Aggregator::grab_data`] merges every known folder's table, keeps the rows
//! asked for by source file and date range, and projects them onto shorthand
//! columns. The order of operations matters:
//!
//! 1. Project each folder table onto shorthand columns, then concatenate
//!    (no deduplication)
//! 2. Keep rows whose identifier contains one of the requested identifiers
//! 3. Parse the primary date column of the remaining rows (any bad value
//!    fails the whole call)
//! 4. Keep rows inside the inclusive date range
//! 5. Project onto the requested fields, dropping fields no table has

pub mod dates;
pub mod projection;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use dates::{
    DateRange, METADATA_DATE_FORMAT, RANGE_BOUND_FORMAT, parse_metadata_date, parse_range_bound,
};
pub use projection::{Cell, ProjectedTable};

use crate::config::ArchiveConfig;
use crate::error::{QueryError, Result};
use crate::models::{FieldTable, MetadataRecord, SOURCE_FILE_COLUMN};
use crate::store::MetadataStore;
use crate::utils::file_name_of;

/// Parameters of one aggregation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrabRequest {
    /// Keep rows whose identifier contains any of these; all rows when `None`
    pub source_files: Option<Vec<String>>,
    /// Shorthand fields to project, in order; all configured fields when `None`
    pub fields: Option<Vec<String>>,
    /// Inclusive lower bound, `YYYYMMDD_HHMMSS`
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYYMMDD_HHMMSS`
    pub end_date: Option<String>,
    pub include_path: bool,
}

impl GrabRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_files<I, S>(mut self, source_files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_files = Some(source_files.into_iter().map(Into::into).collect());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn start_date(mut self, start: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self
    }

    pub fn end_date(mut self, end: impl Into<String>) -> Self {
        self.end_date = Some(end.into());
        self
    }

    pub fn include_path(mut self, include_path: bool) -> Self {
        self.include_path = include_path;
        self
    }
}

/// Aggregates the tables of one store
pub struct Aggregator<'a> {
    config: &'a ArchiveConfig,
    store: &'a mut MetadataStore,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a ArchiveConfig, store: &'a mut MetadataStore) -> Self {
        Self { config, store }
    }

    /// Merge, filter and project every known folder's table
    ///
    /// # Errors
    ///
    /// - [`QueryError::MissingTable`] / [`QueryError::MalformedTable`] for any
    ///   folder whose table cannot be loaded
    /// - [`QueryError::DateParse`] for a malformed range bound, an unparseable
    ///   primary date, or a range requested without a primary date column
    pub fn grab_data(&mut self, request: &GrabRequest) -> Result<ProjectedTable> {
        let range =
            DateRange::from_bounds(request.start_date.as_deref(), request.end_date.as_deref())?;

        let tables = self.store.load_all(self.config.folders())?;
        let merged = merge_tables(&tables);

        let fields = request.fields.clone().unwrap_or_else(|| self.config.fields_short());
        let projected = aggregate(
            &merged,
            request.source_files.as_deref(),
            self.config.date_shorthand(),
            &range,
            &fields,
            request.include_path,
        )?;

        tracing::debug!(
            merged = merged.len(),
            kept = projected.len(),
            columns = projected.columns().len(),
            "aggregation complete"
        );
        Ok(projected)
    }
}

/// Row-wise union of several tables on shorthand columns
///
/// Each table is projected onto shorthand names before concatenation, so
/// `XMP-dc:Subject` in one folder and `IPTC:Subject` in another share the
/// `Subject` column. A shorthand that is ambiguous inside one table is left
/// out of that table only. Columns follow order of first appearance; cells a
/// table does not have are missing.
pub fn merge_tables(tables: &[&FieldTable]) -> FieldTable {
    let mut columns: Vec<String> = vec![SOURCE_FILE_COLUMN.to_string()];
    let mut placements: Vec<Vec<(usize, usize)>> = Vec::with_capacity(tables.len());
    for table in tables {
        let mut placement = Vec::new();
        for (index, shorthand) in shorthand_columns(table) {
            let target = match columns.iter().position(|c| *c == shorthand) {
                Some(target) => target,
                None => {
                    columns.push(shorthand);
                    columns.len() - 1
                }
            };
            placement.push((index, target));
        }
        placements.push(placement);
    }

    let mut rows = Vec::with_capacity(tables.iter().map(|t| t.len()).sum());
    for (table, placement) in tables.iter().zip(&placements) {
        for record in table.records() {
            let mut cells = vec![String::new(); columns.len()];
            cells[0] = table.source_file(record).to_string();
            for &(index, target) in placement {
                if let Some(value) = record.get(index) {
                    cells[target] = value.to_string();
                }
            }
            rows.push(MetadataRecord::new(cells));
        }
    }

    FieldTable::from_parts(columns, rows, 0)
}

/// Column positions of a table's unambiguous shorthand fields, `SourceFile` excluded
fn shorthand_columns(table: &FieldTable) -> Vec<(usize, String)> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for field in table.fields() {
        if field.qualified == SOURCE_FILE_COLUMN || !seen.insert(field.shorthand.clone()) {
            continue;
        }
        match table.resolve_shorthand(&field.shorthand) {
            Ok(Some(index)) => resolved.push((index, field.shorthand)),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "dropping ambiguous field from folder table"),
        }
    }
    resolved
}

/// Filter and project an already merged table
pub fn aggregate(
    merged: &FieldTable,
    source_files: Option<&[String]>,
    date_field: &str,
    range: &DateRange,
    fields: &[String],
    include_path: bool,
) -> Result<ProjectedTable> {
    let kept: Vec<&MetadataRecord> = merged
        .records()
        .iter()
        .filter(|record| match source_files {
            Some(wanted) => {
                let id = merged.source_file(record);
                wanted.iter().any(|w| id.contains(w.as_str()))
            }
            None => true,
        })
        .collect();

    let date_column = merged.resolve_shorthand(date_field)?;
    let dates: Vec<Option<chrono::NaiveDateTime>> = match date_column {
        Some(column) => kept
            .iter()
            .map(|record| record.get(column).map(parse_metadata_date).transpose())
            .collect::<Result<_>>()?,
        None if !range.is_unbounded() => {
            return Err(QueryError::DateParse {
                value: date_field.to_string(),
                reason: "date column not present in any table".to_string(),
            });
        }
        None => vec![None; kept.len()],
    };

    let in_range: Vec<(&MetadataRecord, Option<chrono::NaiveDateTime>)> = kept
        .into_iter()
        .zip(dates)
        .filter(|(_, date)| range.is_unbounded() || date.is_some_and(|d| range.contains(d)))
        .collect();

    let mut columns = Vec::new();
    let mut positions = Vec::new();
    for field in fields {
        match merged.resolve_shorthand(field) {
            Ok(Some(position)) => {
                columns.push(field.clone());
                positions.push(position);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "dropping field from projection"),
        }
    }

    let source_column = merged.column_index(SOURCE_FILE_COLUMN);
    let rows = in_range
        .into_iter()
        .map(|(record, date)| {
            positions
                .iter()
                .map(|&position| {
                    if Some(position) == date_column {
                        return date.map_or(Cell::Missing, Cell::Date);
                    }
                    match record.get(position) {
                        None => Cell::Missing,
                        Some(value) if !include_path && Some(position) == source_column => {
                            Cell::Text(file_name_of(value).to_string())
                        }
                        Some(value) => Cell::Text(value.to_string()),
                    }
                })
                .collect()
        })
        .collect();

    Ok(ProjectedTable::new(columns, rows))
}
