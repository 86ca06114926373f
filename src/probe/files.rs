//! Marker file helpers.

use std::path::Path;

/// Check if a file exists relative to the project root.
pub fn file_exists(project_root: &Path, file: &str) -> bool {
    project_root.join(file).is_file()
}

/// Check if a directory exists relative to the project root.
pub fn dir_exists(project_root: &Path, dir: &str) -> bool {
    project_root.join(dir).is_dir()
}

/// Return the first of `files` that exists.
pub fn any_file_exists(project_root: &Path, files: &[&str]) -> Option<String> {
    files
        .iter()
        .find(|f| project_root.join(f).is_file())
        .map(|f| f.to_string())
}
