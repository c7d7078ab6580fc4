//! Data models for per-folder metadata tables.
//!
//! - [`Field`] - A column known by its qualified name and its shorthand
//! - [`FieldTable`] - One folder's table, as loaded from disk
//! - [`MetadataRecord`] - One row of a [`FieldTable`]
//!
//! Tables are never mutated after load; every query builds new values.

pub mod field;
pub mod table;

pub use field::{Field, NAMESPACE_SEPARATOR, shorthand_of};
pub use table::{FieldTable, MetadataRecord, SOURCE_FILE_COLUMN};
