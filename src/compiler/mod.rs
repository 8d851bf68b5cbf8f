//! Page compilation and asset copying.
//!
//! - **partials**: load `{{> name}}` fragments into memory
//! - **pages**: expand page templates and write them to the output
//! - **assets**: copy static files and directories verbatim
//!
//! # Build Flow
//!
//! ```text
//! load_partials() ──► build_pages() ──► copy_static()
//!       │                  │                 │
//!       ▼                  ▼                 ▼
//!    Partials         HTML files        Asset files
//! ```

pub mod assets;
pub mod pages;
pub mod partials;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use assets::copy_static;
pub use pages::build_pages;
pub use partials::load_partials;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively, sorted by file name.
///
/// Symlinks are followed, so a linked file is collected under the link's path.
pub fn collect_all_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

/// Check whether `path` ends with `.{extension}`, ignoring ASCII case.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
