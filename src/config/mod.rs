//! Archive configuration.
//!
//! An [`ArchiveConfig`] is read once from a TOML file and passed by reference
//! into every component that needs it. Nothing here is global: two configs
//! pointing at two archives can be used side by side in one process.
//!
//! ```toml
//! collection_path = "/Users/alice/Pictures/AllMediaArchive"
//! table_path = "/Users/alice/Pictures/Metadata"
//! exclude_folders = ["Images"]
//! fields = ["SourceFile", "XMP-dc:Subject", "CreateDate"]
//! date_field = "CreateDate"
//! delimiter = ", "
//! ```
//!
//! Every key is optional. When `folders` is absent the folder list is
//! discovered under `collection_path` at load time.

pub mod discovery;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use discovery::discover_folders;

use crate::models::shorthand_of;

/// Default qualified fields of interest, in column order
pub const DEFAULT_FIELDS: &[&str] = &[
    "SourceFile",
    "XMP-dc:Title",
    "XMP-dc:Description",
    "XMP-dc:Coverage",
    "XMP-dc:Subject",
    "CreateDate",
    "XMP-dc:Creator",
    "FileModifyDate",
    "XMP-digiKam:ImageHistory",
    "XMP-acdsee:Notes",
    "XMP-dc:Source",
    "Duration",
];

pub const DEFAULT_DATE_FIELD: &str = "CreateDate";
pub const DEFAULT_DELIMITER: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Root of the media collection
    pub collection_path: PathBuf,
    /// Directory holding one table per folder
    pub table_path: PathBuf,
    /// Folders whose relative path contains any of these are skipped
    pub exclude_folders: Vec<String>,
    /// Explicit folder list; discovered from `collection_path` when absent
    pub folders: Option<Vec<String>>,
    /// Qualified fields of interest
    pub fields: Vec<String>,
    /// Primary date attribute
    pub date_field: String,
    /// Separator packing several tags into one cell
    pub delimiter: String,
    pub verbose: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            collection_path: PathBuf::from("."),
            table_path: PathBuf::from("metadata"),
            exclude_folders: Vec::new(),
            folders: None,
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            date_field: DEFAULT_DATE_FIELD.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            verbose: false,
        }
    }
}

impl ArchiveConfig {
    /// Load configuration from a TOML file, discovering folders if needed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::read_from_file(path)?.with_discovered_folders())
    }

    /// Read and parse a TOML file, leaving folder discovery to the caller
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration text without touching the file system
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ArchiveConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Fill in the folder list from the collection directory when absent
    pub fn with_discovered_folders(mut self) -> Self {
        if self.folders.is_none() {
            self.folders = Some(discover_folders(&self.collection_path, &self.exclude_folders));
        }
        self
    }

    /// Known folders, in configuration or discovery order
    pub fn folders(&self) -> &[String] {
        self.folders.as_deref().unwrap_or(&[])
    }

    /// Shorthand names of the configured fields
    pub fn fields_short(&self) -> Vec<String> {
        self.fields.iter().map(|f| shorthand_of(f).to_string()).collect()
    }

    /// Shorthand of the primary date field
    pub fn date_shorthand(&self) -> &str {
        shorthand_of(&self.date_field)
    }
}
