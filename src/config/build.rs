//! `[build]` section configuration.
//!
//! Source layout, output directory and the static files copied verbatim.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in stitch.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// source = "src"          # Source directory
/// pages = "pages"         # Page templates, relative to `source`
/// partials = "partials"   # Partials, relative to `source`
/// output = "dist"         # Output directory (recreated on every build)
/// static_files = ["style.css", "script.js"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Source directory holding pages, partials and static files.
    #[serde(default = "defaults::build::source")]
    #[educe(Default = defaults::build::source())]
    pub source: PathBuf,

    /// Page templates directory, relative to `source`.
    #[serde(default = "defaults::build::pages")]
    #[educe(Default = defaults::build::pages())]
    pub pages: PathBuf,

    /// Partials directory, relative to `source`.
    #[serde(default = "defaults::build::partials")]
    #[educe(Default = defaults::build::partials())]
    pub partials: PathBuf,

    /// Build output directory. Removed and recreated on every build.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Extension of page and partial templates, without the leading dot.
    #[serde(default = "defaults::build::extension")]
    #[educe(Default = defaults::build::extension())]
    pub extension: String,

    /// Maximum nesting of partials inside partials.
    #[serde(default = "defaults::build::max_depth")]
    #[educe(Default = defaults::build::max_depth())]
    pub max_depth: usize,

    /// Files copied from `source` into the output root, if present.
    #[serde(default = "defaults::build::static_files")]
    #[educe(Default = defaults::build::static_files())]
    pub static_files: Vec<PathBuf>,

    /// Directories copied recursively from `source`, if present.
    #[serde(default = "defaults::build::static_dirs")]
    #[educe(Default = defaults::build::static_dirs())]
    pub static_dirs: Vec<PathBuf>,

    /// Files copied from the project root into the output root, if present.
    #[serde(default = "defaults::build::root_files")]
    #[educe(Default = defaults::build::root_files())]
    pub root_files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.source, PathBuf::from("src"));
        assert_eq!(config.build.pages, PathBuf::from("pages"));
        assert_eq!(config.build.partials, PathBuf::from("partials"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.extension, "html");
        assert_eq!(config.build.max_depth, 32);
        assert_eq!(
            config.build.static_files,
            vec![
                PathBuf::from("style.css"),
                PathBuf::from("script.js"),
                PathBuf::from("site.webmanifest"),
                PathBuf::from("404.html"),
            ]
        );
        assert_eq!(
            config.build.static_dirs,
            vec![PathBuf::from("assets"), PathBuf::from(".well-known")]
        );
        assert_eq!(config.build.root_files, vec![PathBuf::from("CNAME")]);
    }

    #[test]
    fn test_build_config_custom() {
        let config = r#"
            [build]
            source = "site"
            output = "public"
            extension = "htm"
            max_depth = 4
            static_files = ["robots.txt"]
            static_dirs = []
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.source, PathBuf::from("site"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.extension, "htm");
        assert_eq!(config.build.max_depth, 4);
        assert_eq!(config.build.static_files, vec![PathBuf::from("robots.txt")]);
        assert!(config.build.static_dirs.is_empty());
        // untouched fields keep their defaults
        assert_eq!(config.build.pages, PathBuf::from("pages"));
        assert_eq!(config.build.root_files, vec![PathBuf::from("CNAME")]);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [build]
            minify = true
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
