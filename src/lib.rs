//! Metadata Explorer - query extracted metadata tables of a media archive
//!
//! An external extraction step writes one CSV table per archive folder, one
//! row per media file and one column per metadata field. This library reads
//! those tables and answers questions about them:
//!
//! - Which files mention a keyword, in which fields and folders
//!   ([`SearchEngine::find_source`](search::SearchEngine::find_source))
//! - Set algebra over such results ([`intersect_all`], [`symmetric_difference`])
//! - Merged, date-filtered views across folders
//!   ([`Aggregator::grab_data`](aggregate::Aggregator::grab_data))
//! - Tag frequencies of delimiter-packed fields ([`count_unique`])
//! - Keyword connections and timelines ([`analysis`])
//!
//! # Example
//!
//! ```no_run
//! use metadata_explorer::{Archive, ArchiveConfig, SourceQuery};
//!
//! let config = ArchiveConfig::load_from_file("archive.toml")?;
//! let mut archive = Archive::new(config);
//! let files = archive.find_source(&SourceQuery::new(["Paris"]).fields(["Coverage"]))?;
//! println!("{} files mention Paris", files.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod analysis;
pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod frequency;
pub mod logging;
pub mod models;
pub mod query;
pub mod search;
pub mod sets;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use aggregate::{GrabRequest, ProjectedTable};
pub use archive::Archive;
pub use config::ArchiveConfig;
pub use error::QueryError;
pub use frequency::{FrequencyTable, count_unique};
pub use search::SourceQuery;
pub use sets::{intersect_all, symmetric_difference};
pub use store::MetadataStore;
pub use utils::{file_name_of, format_path_with_tilde, table_file_name};
