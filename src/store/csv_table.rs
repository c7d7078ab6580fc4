//! Folder tables on disk: ISO-8859-1 encoded CSV with a qualified header row.
//!
//! Every byte of the file maps to the Unicode code point of the same value,
//! so non-ASCII file names and text fields round-trip exactly.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{QueryError, Result};
use crate::models::FieldTable;

/// Decode ISO-8859-1 bytes
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode text as ISO-8859-1, or `None` if a character is out of range
pub fn encode_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

/// Read a folder table
///
/// The file is read in full and released before parsing starts.
pub fn read_table(path: &Path) -> Result<FieldTable> {
    let bytes =
        fs::read(path).map_err(|source| QueryError::Io { path: path.to_path_buf(), source })?;
    parse_table(&decode_latin1(&bytes), path)
}

/// Parse decoded table text; `path` is only used in error messages
pub fn parse_table(text: &str, path: &Path) -> Result<FieldTable> {
    let malformed =
        |reason: String| QueryError::MalformedTable { path: path.to_path_buf(), reason };

    let mut reader =
        ReaderBuilder::new().has_headers(true).flexible(true).from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| malformed(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| malformed(e.to_string()))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    FieldTable::from_rows(columns, rows)
        .ok_or_else(|| malformed("missing SourceFile column".to_string()))
}

/// Write a folder table back in the persisted encoding
pub fn write_table(table: &FieldTable, path: &Path) -> Result<()> {
    let malformed =
        |reason: String| QueryError::MalformedTable { path: path.to_path_buf(), reason };

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(table.columns()).map_err(|e| malformed(e.to_string()))?;
    for record in table.records() {
        writer.write_record(record.cells()).map_err(|e| malformed(e.to_string()))?;
    }

    let buffer = writer.into_inner().map_err(|e| malformed(e.to_string()))?;
    let text = String::from_utf8(buffer).map_err(|e| malformed(e.to_string()))?;
    let bytes = encode_latin1(&text)
        .ok_or_else(|| malformed("text not representable in ISO-8859-1".to_string()))?;

    fs::write(path, bytes).map_err(|source| QueryError::Io { path: path.to_path_buf(), source })
}
