//! Page expansion.
//!
//! Every template under the pages directory is expanded independently and
//! written to the same relative path inside the output directory:
//!
//! | Source                    | Output                 |
//! |---------------------------|------------------------|
//! | `src/pages/index.html`    | `dist/index.html`      |
//! | `src/pages/blog/a.html`   | `dist/blog/a.html`     |

use super::{collect_all_files, has_extension};
use crate::config::SiteConfig;
use crate::log;
use crate::template::{Expander, Partials, Vars};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Fail unless the pages directory exists.
pub fn check_pages_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("No pages directory found at {}", dir.display());
    }
    Ok(())
}

/// Expand and write every page, in file name order.
///
/// Returns the number of pages written.
pub fn build_pages(config: &SiteConfig, partials: &Partials, vars: &Vars) -> Result<usize> {
    let pages_dir = &config.build.pages;
    check_pages_dir(pages_dir)?;

    let expander = Expander::new(partials, vars).with_max_depth(config.build.max_depth);
    let mut count = 0;

    for path in collect_all_files(pages_dir)? {
        if !has_extension(&path, &config.build.extension) {
            continue;
        }
        let relative = path.strip_prefix(pages_dir)?;
        build_page(&path, relative, &config.build.output, &expander)?;
        count += 1;
    }

    Ok(count)
}

/// Expand one page and write it to `output/relative`.
fn build_page(path: &Path, relative: &Path, output: &Path, expander: &Expander<'_>) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page: {}", path.display()))?;

    let expanded = expander
        .expand(&content)
        .with_context(|| format!("Failed to expand page: {}", relative.display()))?;

    for unresolved in &expanded.unresolved {
        log!("warn"; "{}: {}", relative.display(), unresolved);
    }

    let dest = output.join(relative);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest, expanded.text)
        .with_context(|| format!("Failed to write page: {}", dest.display()))?;

    log!("page"; "built {}", relative.display());
    Ok(())
}
