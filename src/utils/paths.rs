use std::env;
use std::path::Path;

/// Replacement for path separators in table file names
const FOLDER_SEPARATOR_REPLACEMENT: &str = "__";

/// Extension of persisted folder tables
pub const TABLE_EXTENSION: &str = "csv";

/// File name of the table persisted for a folder
///
/// Path separators in the folder's relative identifier become a literal
/// double underscore, preserving the directory structure in a flat name.
///
/// # Examples
///
/// ```
/// use metadata_explorer::table_file_name;
///
/// assert_eq!(table_file_name("2019/Summer/Beach"), "2019__Summer__Beach.csv");
/// assert_eq!(table_file_name("Scans"), "Scans.csv");
/// ```
pub fn table_file_name(folder: &str) -> String {
    let flattened = folder.replace(['/', '\\'], FOLDER_SEPARATOR_REPLACEMENT);
    format!("{}.{}", flattened, TABLE_EXTENSION)
}

/// Final path component of a file identifier
///
/// Identifiers come from the extraction tool, which always writes forward
/// slashes; backslashes are accepted as well so tables produced on Windows
/// resolve the same way.
///
/// # Examples
///
/// ```
/// use metadata_explorer::file_name_of;
///
/// assert_eq!(file_name_of("/photos/2019/IMG_0001.jpg"), "IMG_0001.jpg");
/// assert_eq!(file_name_of("IMG_0001.jpg"), "IMG_0001.jpg");
/// ```
pub fn file_name_of(identifier: &str) -> &str {
    identifier.rsplit(['/', '\\']).next().unwrap_or(identifier)
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use metadata_explorer::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Pictures/Metadata");
/// // Returns "~/Pictures/Metadata" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
///
/// The home directory must match whole path components, so `/home/al` is not
/// a prefix of `/home/alice`.
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref()).filter(|home| !home.is_empty());

    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }

    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_table_file_name_nested() {
        assert_eq!(table_file_name("2020/Trips/Iceland"), "2020__Trips__Iceland.csv");
    }

    #[test]
    fn test_table_file_name_windows_separators() {
        assert_eq!(table_file_name("2020\\Trips"), "2020__Trips.csv");
    }

    #[test]
    fn test_table_file_name_keeps_non_ascii() {
        assert_eq!(table_file_name("Noël/Café"), "Noël__Café.csv");
    }

    #[test]
    fn test_file_name_of_variants() {
        assert_eq!(file_name_of("a/b/c.jpg"), "c.jpg");
        assert_eq!(file_name_of("C:\\photos\\c.jpg"), "c.jpg");
        assert_eq!(file_name_of("c.jpg"), "c.jpg");
        assert_eq!(file_name_of("dir/"), "");
    }

    #[test]
    fn test_format_path_with_tilde() {
        let path = PathBuf::from("/Users/testuser/Pictures/Metadata");
        let formatted = format_path_with_tilde_internal(&path, Some("/Users/testuser"));
        assert_eq!(formatted, "~/Pictures/Metadata");

        let path2 = PathBuf::from("/opt/archive");
        let formatted2 = format_path_with_tilde_internal(&path2, Some("/Users/testuser"));
        assert_eq!(formatted2, "/opt/archive");
    }

    #[test]
    fn test_format_path_with_tilde_requires_component_boundary() {
        let path = PathBuf::from("/home/alice/x");
        assert_eq!(format_path_with_tilde_internal(&path, Some("/home/al")), "/home/alice/x");
        assert_eq!(format_path_with_tilde_internal(&path, Some("/home/alice")), "~/x");
        assert_eq!(format_path_with_tilde_internal(&path, Some("/home/alice/")), "~/x");
    }

    #[test]
    fn test_format_path_with_tilde_home_itself() {
        let path = PathBuf::from("/home/alice");
        assert_eq!(format_path_with_tilde_internal(&path, Some("/home/alice")), "~");
        assert_eq!(format_path_with_tilde_internal(&path, Some("")), "/home/alice");
    }
}
