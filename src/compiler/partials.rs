use super::has_extension;
use crate::log;
use crate::template::{self, Partials};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// Load every `*.{extension}` file directly inside `dir` as a partial.
///
/// The file stem becomes the partial name. A missing directory is not an
/// error, the site simply has no partials.
pub fn load_partials(dir: &Path, extension: &str) -> Result<Partials> {
    let mut partials = Partials::new();

    if !dir.is_dir() {
        log!("warn"; "no partials directory found at {}", dir.display());
        return Ok(partials);
    }

    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("Failed to read partials directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, _>>()?;
    paths.sort();

    for path in paths {
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }

        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            log!("warn"; "skipping partial with non UTF-8 name: {}", path.display());
            continue;
        };
        if !template::is_valid_name(name) {
            log!("warn"; "skipping partial `{name}`, names may only use letters, digits and `_`");
            continue;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read partial: {}", path.display()))?;

        if partials.insert(name.to_owned(), content).is_some() {
            bail!("duplicate partial name `{name}` ({})", path.display());
        }
        log!("partial"; "loaded {name}");
    }

    Ok(partials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_partials() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("header.html"), "<h1>Site</h1>").unwrap();
        fs::write(dir.path().join("footer.html"), "<footer>{{year}}</footer>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let partials = load_partials(dir.path(), "html").unwrap();

        assert_eq!(partials.len(), 2);
        assert_eq!(partials["header"], "<h1>Site</h1>");
        assert_eq!(partials["footer"], "<footer>{{year}}</footer>");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let partials = load_partials(&dir.path().join("partials"), "html").unwrap();
        assert!(partials.is_empty());
    }

    #[test]
    fn test_subdirectories_not_loaded() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.html")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/inner.html"), "x").unwrap();

        let partials = load_partials(dir.path(), "html").unwrap();
        assert!(partials.is_empty());
    }

    #[test]
    fn test_unreferenceable_names_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site-nav.html"), "x").unwrap();
        fs::write(dir.path().join("nav.html"), "y").unwrap();

        let partials = load_partials(dir.path(), "html").unwrap();
        assert_eq!(partials.len(), 1);
        assert!(partials.contains_key("nav"));
    }

    #[test]
    fn test_empty_partial_is_loaded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blank.html"), "").unwrap();

        let partials = load_partials(dir.path(), "html").unwrap();
        assert_eq!(partials["blank"], "");
    }

    // Needs a case-sensitive filesystem to hold both files
    #[cfg(target_os = "linux")]
    #[test]
    fn test_duplicate_names_fail() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nav.html"), "a").unwrap();
        fs::write(dir.path().join("nav.HTML"), "b").unwrap();

        let err = load_partials(dir.path(), "html").unwrap_err();
        assert!(err.to_string().contains("duplicate partial name `nav`"));
    }
}
