//! Candidate file discovery.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// List regular files under `root` whose extension is exactly `ext` (no leading dot).
///
/// Entries are visited in file-name order. Symlinked directories are not
/// descended into, but a symlink to a regular file is listed under its own path.
/// Unreadable directories, including a missing `root`, are logged and skipped.
pub fn find_files_by_extension(root: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path while walking {:?}: {}", root, e);
                continue;
            }
        };

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && entry.path().extension().is_some_and(|e| e == ext) {
            files.push(entry.into_path());
        }
    }

    debug!("Found {} .{} files under {:?}", files.len(), ext, root);
    files
}
