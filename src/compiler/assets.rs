use super::collect_all_files;
use crate::config::SiteConfig;
use crate::log;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Copy static files, static directories and root files into the output.
///
/// Missing entries are skipped. Returns the number of files copied.
pub fn copy_static(config: &SiteConfig) -> Result<usize> {
    let build = &config.build;
    let output = &build.output;
    let mut copied = 0;

    for file in &build.static_files {
        let src = build.source.join(file);
        if src.is_file() {
            copy_file(&src, &output.join(file))?;
            log!("copy"; "{}", file.display());
            copied += 1;
        }
    }

    for dir in &build.static_dirs {
        let src = build.source.join(dir);
        if src.is_dir() {
            copied += copy_dir(&src, &output.join(dir))?;
            log!("copy"; "{}/", dir.display());
        }
    }

    for file in &build.root_files {
        let src = config.get_root().join(file);
        if src.is_file() {
            copy_file(&src, &output.join(file))?;
            log!("copy"; "{}", file.display());
            copied += 1;
        }
    }

    Ok(copied)
}

/// Recursively copy `src` into `dest`, returning the number of files copied.
pub fn copy_dir(src: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create directory: {}", dest.display()))?;

    let files = collect_all_files(src)?;
    for path in &files {
        let relative = path.strip_prefix(src)?;
        copy_file(path, &dest.join(relative))?;
    }

    Ok(files.len())
}

fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    Ok(())
}
