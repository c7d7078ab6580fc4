//! Term search across folders and fields.
//!
//! # Error Handling Strategy
//!
//! Folder tables are heterogeneous, so most anomalies are absorbed here:
//!
//! - **Field absent from a table**: silently skipped for that table
//! - **Ambiguous shorthand**: logged as a warning, skipped for that table only
//! - **Invalid query shape**: logged as a warning, empty result returned so
//!   batch loops over many queries keep going
//! - **Missing or malformed table**: propagated, the caller has to run
//!   extraction for that folder first

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ArchiveConfig;
use crate::error::Result;
use crate::models::FieldTable;
use crate::query::{CombineMode, TermMatcher, classify};
use crate::store::MetadataStore;
use crate::utils::file_name_of;

/// Parameters of one source-file search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceQuery {
    pub terms: Vec<String>,
    /// Shorthand fields to look in; all configured fields when `None`
    pub fields: Option<Vec<String>>,
    /// Folders to look in; all known folders when `None`
    pub folders: Option<Vec<String>>,
    pub mode: CombineMode,
    /// Return full identifiers instead of bare file names
    pub include_path: bool,
}

impl SourceQuery {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { terms: terms.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folders = Some(folders.into_iter().map(Into::into).collect());
        self
    }

    pub fn mode(mut self, mode: CombineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn include_path(mut self, include_path: bool) -> Self {
        self.include_path = include_path;
        self
    }
}

/// Evaluates [`SourceQuery`]s against the tables of one store
pub struct SearchEngine<'a> {
    config: &'a ArchiveConfig,
    store: &'a mut MetadataStore,
}

impl<'a> SearchEngine<'a> {
    pub fn new(config: &'a ArchiveConfig, store: &'a mut MetadataStore) -> Self {
        Self { config, store }
    }

    /// Find the files whose metadata matches the query
    ///
    /// Matches from every folder, field and term are pooled, then
    /// deduplicated and sorted. When `include_path` is false identifiers are
    /// reduced to their file name before deduplication, so two folders
    /// holding `IMG_0001.jpg` yield one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested folder's table is missing or
    /// malformed. Invalid query shapes are not errors: they are logged and
    /// produce an empty result.
    pub fn find_source(&mut self, query: &SourceQuery) -> Result<Vec<String>> {
        let terms = classify(&query.terms);
        let matcher = match TermMatcher::new(&terms, query.mode) {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::warn!(error = %e, terms = ?query.terms, "ignoring invalid query");
                return Ok(Vec::new());
            }
        };

        let fields = query.fields.clone().unwrap_or_else(|| self.config.fields_short());
        let folders = query.folders.clone().unwrap_or_else(|| self.config.folders().to_vec());

        let mut matches = Vec::new();
        for folder in &folders {
            let table = self.store.load(folder)?;
            matches.extend(search_table(table, &fields, &matcher));
        }

        tracing::debug!(terms = ?query.terms, matches = matches.len(), "search complete");
        Ok(finalize_identifiers(matches, query.include_path))
    }
}

/// Identifiers of records in one table whose `fields` match
///
/// Results are in table order and may repeat when several fields match.
pub fn search_table(table: &FieldTable, fields: &[String], matcher: &TermMatcher) -> Vec<String> {
    let mut matches = Vec::new();

    for field in fields {
        let column = match table.resolve_shorthand(field) {
            Ok(Some(column)) => column,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "skipping field for this table");
                continue;
            }
        };

        for record in table.records() {
            if let Some(value) = record.get(column)
                && matcher.is_match(value)
            {
                matches.push(table.source_file(record).to_string());
            }
        }
    }

    matches
}

/// Reduce to the requested output form, then deduplicate and sort
pub fn finalize_identifiers(identifiers: Vec<String>, include_path: bool) -> Vec<String> {
    let unique: BTreeSet<String> = if include_path {
        identifiers.into_iter().collect()
    } else {
        identifiers.iter().map(|id| file_name_of(id).to_string()).collect()
    };
    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_terms;

    fn table() -> FieldTable {
        FieldTable::from_rows(
            vec!["SourceFile".to_string(), "XMP-dc:Subject".to_string(), "XMP-dc:Title".to_string()],
            vec![
                vec!["2019/a.jpg".to_string(), "cat, dog".to_string(), "Garden".to_string()],
                vec!["2019/b.jpg".to_string(), "catnip".to_string(), "cat nap".to_string()],
                vec!["2019/c.jpg".to_string(), "".to_string(), "dog".to_string()],
            ],
        )
        .unwrap()
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_search_table_single_field() {
        let matcher = TermMatcher::new(&parse_terms(&["cat"]).unwrap(), CombineMode::Any).unwrap();
        let result = search_table(&table(), &fields(&["Subject"]), &matcher);
        assert_eq!(result, vec!["2019/a.jpg"]);
    }

    #[test]
    fn test_search_table_several_fields_may_repeat() {
        let matcher = TermMatcher::new(&parse_terms(&["cat"]).unwrap(), CombineMode::Any).unwrap();
        let result = search_table(&table(), &fields(&["Subject", "Title"]), &matcher);
        assert_eq!(result, vec!["2019/a.jpg", "2019/b.jpg"]);
    }

    #[test]
    fn test_search_table_skips_unknown_field() {
        let matcher = TermMatcher::new(&parse_terms(&["dog"]).unwrap(), CombineMode::Any).unwrap();
        let result = search_table(&table(), &fields(&["Coverage", "Title"]), &matcher);
        assert_eq!(result, vec!["2019/c.jpg"]);
    }

    #[test]
    fn test_finalize_strips_paths_before_dedup() {
        let ids = fields(&["2020/x.jpg", "2019/x.jpg", "2019/a.jpg"]);
        assert_eq!(finalize_identifiers(ids.clone(), false), vec!["a.jpg", "x.jpg"]);
        assert_eq!(finalize_identifiers(ids, true), vec!["2019/a.jpg", "2019/x.jpg", "2020/x.jpg"]);
    }

    #[test]
    fn test_source_query_builder() {
        let query = SourceQuery::new(["cat"])
            .fields(["Subject"])
            .folders(["2019"])
            .mode(CombineMode::All)
            .include_path(true);

        assert_eq!(query.terms, vec!["cat"]);
        assert_eq!(query.fields, Some(vec!["Subject".to_string()]));
        assert_eq!(query.folders, Some(vec!["2019".to_string()]));
        assert_eq!(query.mode, CombineMode::All);
        assert!(query.include_path);
    }
}
