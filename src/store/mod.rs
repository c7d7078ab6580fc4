//! Read access to the per-folder metadata tables.
//!
//! [`MetadataStore`] maps a folder identifier to its persisted table
//! (`<table_path>/<folder with separators as __>.csv`), loads it on first use
//! and keeps it for the lifetime of the store. Tables are immutable once
//! loaded; there is no invalidation because nothing in this crate writes them
//! while a store is alive.

pub mod csv_table;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use csv_table::{decode_latin1, encode_latin1, parse_table, read_table, write_table};

use crate::config::ArchiveConfig;
use crate::error::{QueryError, Result};
use crate::models::FieldTable;
use crate::utils::table_file_name;

/// Loads and caches folder tables for one query session
#[derive(Debug)]
pub struct MetadataStore {
    table_path: PathBuf,
    cache: HashMap<String, FieldTable>,
}

impl MetadataStore {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self::with_table_path(config.table_path.clone())
    }

    pub fn with_table_path(table_path: impl Into<PathBuf>) -> Self {
        Self { table_path: table_path.into(), cache: HashMap::new() }
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    /// Location of the table persisted for `folder`
    pub fn table_file(&self, folder: &str) -> PathBuf {
        self.table_path.join(table_file_name(folder))
    }

    /// Whether extraction has produced a table for `folder`
    pub fn has_table(&self, folder: &str) -> bool {
        self.cache.contains_key(folder) || self.table_file(folder).is_file()
    }

    /// Load the table for `folder`, reading it from disk on first use
    ///
    /// # Errors
    ///
    /// - [`QueryError::MissingTable`] if no table has been extracted yet
    /// - [`QueryError::MalformedTable`] if the file is not a usable table
    /// - [`QueryError::Io`] if the file cannot be read
    pub fn load(&mut self, folder: &str) -> Result<&FieldTable> {
        if !self.cache.contains_key(folder) {
            let path = self.table_file(folder);
            if !path.is_file() {
                return Err(QueryError::MissingTable { folder: folder.to_string(), path });
            }

            let table = read_table(&path)?;
            tracing::debug!(folder, rows = table.len(), path = %path.display(), "loaded metadata table");
            self.cache.insert(folder.to_string(), table);
        }

        self.cache
            .get(folder)
            .ok_or_else(|| QueryError::MissingTable { folder: folder.to_string(), path: self.table_file(folder) })
    }

    /// Load several folders, failing on the first unusable table
    pub fn load_all<S: AsRef<str>>(&mut self, folders: &[S]) -> Result<Vec<&FieldTable>> {
        for folder in folders {
            self.load(folder.as_ref())?;
        }

        let mut tables = Vec::with_capacity(folders.len());
        for folder in folders {
            let folder = folder.as_ref();
            let table = self.cache.get(folder).ok_or_else(|| QueryError::MissingTable {
                folder: folder.to_string(),
                path: self.table_file(folder),
            })?;
            tables.push(table);
        }
        Ok(tables)
    }

    /// Number of tables currently held
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
