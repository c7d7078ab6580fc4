use std::path::Path;

use walkdir::WalkDir;

/// Discover every sub-directory of the collection, as relative paths
///
/// The collection root itself is not a folder. Any folder whose relative
/// path contains one of `exclude` is skipped, together with everything
/// below it. Returns an empty list when the collection directory does not
/// exist (not an error: tables may be read from a detached copy).
pub fn discover_folders(collection_path: &Path, exclude: &[String]) -> Vec<String> {
    if !collection_path.is_dir() {
        tracing::warn!(
            path = %collection_path.display(),
            "collection directory not found, no folders discovered"
        );
        return Vec::new();
    }

    let mut folders = Vec::new();
    let walker = WalkDir::new(collection_path).min_depth(1).sort_by_file_name().into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable collection entry");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(collection_path) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");

        if exclude.iter().any(|ex| relative.contains(ex.as_str())) {
            continue;
        }

        folders.push(relative);
    }

    tracing::debug!(count = folders.len(), "discovered collection folders");
    folders
}
