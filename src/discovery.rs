use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Recursively collect files under `start` whose extension is in
/// `extensions`. Returned paths are relative to `root` and sorted.
///
/// Symlinks are not followed. A missing directory is not an error; it yields
/// an empty list.
pub fn discover_source_files(root: &Path, start: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if !start.is_dir() {
        warn!("{} not found", start.display());
        return Vec::new();
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(start) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }
        let path = entry.path();
        found.push(path.strip_prefix(root).unwrap_or(path).to_path_buf());
    }

    found.sort();
    debug!(count = found.len(), "discovered source files");
    found
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

/// Read a file, degrading to an empty string when it cannot be read.
pub fn read_file_content(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("error reading {}: {e}", path.display());
            String::new()
        }
    }
}
