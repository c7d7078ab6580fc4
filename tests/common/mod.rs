//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use metadata_explorer::models::FieldTable;
use metadata_explorer::store::write_table;
use metadata_explorer::{Archive, ArchiveConfig, table_file_name};
use tempfile::TempDir;

/// Builder for a throwaway archive: a collection directory plus one
/// extracted table per folder
pub struct ArchiveBuilder {
    temp_dir: TempDir,
    folders: Vec<String>,
    fields: Option<Vec<String>>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("collection")).expect("Failed to create collection dir");
        fs::create_dir_all(temp_dir.path().join("tables")).expect("Failed to create table dir");
        Self { temp_dir, folders: Vec::new(), fields: None }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn collection_path(&self) -> PathBuf {
        self.temp_dir.path().join("collection")
    }

    pub fn table_path(&self) -> PathBuf {
        self.temp_dir.path().join("tables")
    }

    /// Add a folder with an extracted table
    pub fn with_table(mut self, folder: &str, table: TableBuilder) -> Self {
        fs::create_dir_all(self.collection_path().join(folder)).expect("Failed to create folder");
        let path = self.table_path().join(table_file_name(folder));
        write_table(&table.build(), &path).expect("Failed to write table");
        self.folders.push(folder.to_string());
        self
    }

    /// Add a folder whose table has not been extracted yet
    pub fn with_missing_table(mut self, folder: &str) -> Self {
        fs::create_dir_all(self.collection_path().join(folder)).expect("Failed to create folder");
        self.folders.push(folder.to_string());
        self
    }

    /// Override the configured qualified field list
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn config(&self) -> ArchiveConfig {
        let mut config = ArchiveConfig {
            collection_path: self.collection_path(),
            table_path: self.table_path(),
            folders: Some(self.folders.clone()),
            ..Default::default()
        };
        if let Some(fields) = &self.fields {
            config.fields = fields.clone();
        }
        config
    }

    pub fn archive(&self) -> Archive {
        Archive::new(self.config())
    }

    /// Write a TOML config listing the folders explicitly
    pub fn write_config(&self) -> PathBuf {
        let mut content = format!(
            "collection_path = {:?}\ntable_path = {:?}\nfolders = {:?}\n",
            self.collection_path().display().to_string(),
            self.table_path().display().to_string(),
            self.folders
        );
        if let Some(fields) = &self.fields {
            content.push_str(&format!("fields = {:?}\n", fields));
        }
        let path = self.temp_dir.path().join("config.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one folder table
pub struct TableBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableBuilder {
    /// Start a table with `SourceFile` plus the given qualified columns
    pub fn new(columns: &[&str]) -> Self {
        let mut all = vec!["SourceFile".to_string()];
        all.extend(columns.iter().map(|c| c.to_string()));
        Self { columns: all, rows: Vec::new() }
    }

    /// Add a row: the identifier followed by one cell per column
    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn build(self) -> FieldTable {
        FieldTable::from_rows(self.columns, self.rows).expect("SourceFile column is always present")
    }
}

/// A small archive with a summer folder and a winter folder
///
/// | folder       | file                   | CreateDate           | Subject            | Coverage |
/// |--------------|------------------------|----------------------|--------------------|----------|
/// | 2019/Summer  | IMG_0001.jpg           | 2019:07:01 12:00:00  | cat, dog           | Paris    |
/// | 2019/Summer  | IMG_0002.jpg           | 2019:07:02 08:30:00  | cat                | London   |
/// | 2019/Summer  | IMG_0003.jpg           | 2019:07:03 18:45:10  | catnip             |          |
/// | 2020/Winter  | IMG_0100.jpg           | 2020:01:15 09:00:00  | dog, snow          | Paris    |
/// | 2020/Winter  | Café.jpg               | 2020:02:29 10:00:00  | snow               | Zürich   |
pub fn realistic_archive() -> ArchiveBuilder {
    ArchiveBuilder::new()
        .with_table(
            "2019/Summer",
            TableBuilder::new(&["CreateDate", "XMP-dc:Subject", "XMP-dc:Coverage"])
                .row(&["2019/Summer/IMG_0001.jpg", "2019:07:01 12:00:00", "cat, dog", "Paris"])
                .row(&["2019/Summer/IMG_0002.jpg", "2019:07:02 08:30:00", "cat", "London"])
                .row(&["2019/Summer/IMG_0003.jpg", "2019:07:03 18:45:10", "catnip", ""]),
        )
        .with_table(
            "2020/Winter",
            TableBuilder::new(&["XMP-dc:Subject", "CreateDate", "XMP-dc:Coverage"])
                .row(&["2020/Winter/IMG_0100.jpg", "dog, snow", "2020:01:15 09:00:00", "Paris"])
                .row(&["2020/Winter/Café.jpg", "snow", "2020:02:29 10:00:00", "Zürich"]),
        )
}
