use serde::{Deserialize, Serialize};

/// Separator between a field's namespace and its name (`XMP-dc:Subject`)
pub const NAMESPACE_SEPARATOR: char = ':';

/// A metadata field, known by its qualified column name and its shorthand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub qualified: String,
    pub shorthand: String,
}

impl Field {
    pub fn new(qualified: impl Into<String>) -> Self {
        let qualified = qualified.into();
        let shorthand = shorthand_of(&qualified).to_string();
        Self { qualified, shorthand }
    }
}

/// Suffix of a qualified name after its last namespace separator
///
/// Names without a namespace are their own shorthand.
///
/// ```
/// use metadata_explorer::models::shorthand_of;
///
/// assert_eq!(shorthand_of("XMP-dc:Subject"), "Subject");
/// assert_eq!(shorthand_of("Composite:GPS:Latitude"), "Latitude");
/// assert_eq!(shorthand_of("SourceFile"), "SourceFile");
/// ```
pub fn shorthand_of(qualified: &str) -> &str {
    qualified.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(qualified)
}
