//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output() ──► remove and recreate the output directory
//!     │
//!     ├── load_partials() ───► Partials (read once, immutable)
//!     │
//!     ├── build_pages() ─────► expand every page, write HTML
//!     │
//!     └── copy_static() ─────► static files, dirs and root files
//! ```
//!
//! Everything runs on the calling thread; the first error aborts the build.

use crate::{
    compiler::{build_pages, copy_static, load_partials, pages::check_pages_dir},
    config::SiteConfig,
    log,
    template::Vars,
};
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use std::{fs, path::Path};

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages expanded and written
    pub pages: usize,
    /// Static files copied
    pub assets: usize,
}

/// Build the entire site from scratch.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let build = &config.build;
    let output = &build.output;

    check_pages_dir(&build.pages)?;
    let vars = template_vars(config)?;

    prepare_output(output)?;

    log!("build"; "loading partials...");
    let partials = load_partials(&build.partials, &build.extension)?;

    log!("build"; "building pages...");
    let pages = build_pages(config, &partials, &vars)?;

    log!("build"; "copying static files...");
    let assets = copy_static(config)?;

    log!("done"; "built {} pages to {}", pages, output.display());

    Ok(BuildReport { pages, assets })
}

/// Variables available to every page.
///
/// `year` is the current local year; `[vars]` entries override it.
pub fn template_vars(config: &SiteConfig) -> Result<Vars> {
    let mut vars = builtin_vars(Local::now().year());
    vars.extend(config.vars()?);
    Ok(vars)
}

fn builtin_vars(year: i32) -> Vars {
    Vars::from([("year".to_owned(), year.to_string())])
}

/// Remove any previous output and create an empty output directory.
fn prepare_output(output: &Path) -> Result<()> {
    if output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}
