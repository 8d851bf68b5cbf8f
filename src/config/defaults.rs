//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use crate::template::DEFAULT_MAX_DEPTH;
    use std::path::PathBuf;

    pub fn source() -> PathBuf {
        "src".into()
    }

    pub fn pages() -> PathBuf {
        "pages".into()
    }

    pub fn partials() -> PathBuf {
        "partials".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn extension() -> String {
        "html".into()
    }

    pub fn max_depth() -> usize {
        DEFAULT_MAX_DEPTH
    }

    pub fn static_files() -> Vec<PathBuf> {
        ["style.css", "script.js", "site.webmanifest", "404.html"]
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }

    pub fn static_dirs() -> Vec<PathBuf> {
        ["assets", ".well-known"]
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }

    pub fn root_files() -> Vec<PathBuf> {
        vec!["CNAME".into()]
    }
}
