//! Site initialization module.
//!
//! Creates a starter site: config, one page, two partials, a stylesheet and
//! the UTM forwarding script.

use crate::{
    config::{CONFIG_FILE, SiteConfig},
    log,
    utm::{MARKER_ATTR, UTM_PARAMS},
};
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>My Site</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
{{> header}}
  <main>
    <p>Edit <code>src/pages/index.html</code> to get started.</p>
    <a data-track-utm href="https://example.com/">Visit the shop</a>
  </main>
{{> footer}}
  <script src="/script.js"></script>
</body>
</html>
"#;

const HEADER_PARTIAL: &str = r#"  <header>
    <h1>My Site</h1>
  </header>
"#;

const FOOTER_PARTIAL: &str = r#"  <footer>
    <p>&copy; {{year}}</p>
  </footer>
"#;

const STYLE_SHEET: &str = r#"body {
  margin: 0 auto;
  max-width: 40rem;
  font-family: system-ui, sans-serif;
}
"#;

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `stitch init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_files(config)?;
    init_default_config(config)?;

    let output = config
        .build
        .output
        .strip_prefix(root)
        .unwrap_or(config.build.output.as_path());
    init_ignored_files(root, &[output])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let mut default = SiteConfig::default();
    if let Ok(output) = config.build.output.strip_prefix(config.get_root()) {
        default.build.output = output.to_path_buf();
    }

    let content = toml::to_string_pretty(&default)?;
    fs::write(config.get_root().join(CONFIG_FILE), content)?;
    Ok(())
}

/// Starter files keyed by their absolute path.
fn site_files(config: &SiteConfig) -> Vec<(PathBuf, String)> {
    let build = &config.build;
    let ext = &build.extension;

    vec![
        (build.pages.join(format!("index.{ext}")), INDEX_PAGE.to_owned()),
        (build.partials.join(format!("header.{ext}")), HEADER_PARTIAL.to_owned()),
        (build.partials.join(format!("footer.{ext}")), FOOTER_PARTIAL.to_owned()),
        (build.source.join("style.css"), STYLE_SHEET.to_owned()),
        (build.source.join("script.js"), utm_script()),
    ]
}

/// Write the starter files, refusing to overwrite anything.
fn init_site_files(config: &SiteConfig) -> Result<()> {
    for (path, content) in site_files(config) {
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `stitch init <SITE_NAME>` instead.",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Browser script forwarding the landing page's UTM parameters to marked links.
fn utm_script() -> String {
    let params = UTM_PARAMS
        .iter()
        .map(|p| format!("'{p}'"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"// Forward UTM parameters from the landing URL to links marked with {MARKER_ATTR}
(function () {{
  var FORWARDED = [{params}];

  function utmQuery() {{
    var params = new URLSearchParams(window.location.search);
    var utm = new URLSearchParams();
    FORWARDED.forEach(function (name) {{
      if (params.has(name)) utm.set(name, params.get(name));
    }});
    return utm.toString();
  }}

  function appendUtm(url, utm) {{
    if (!utm) return url;
    var hash = url.indexOf('#');
    var base = hash < 0 ? url : url.slice(0, hash);
    var fragment = hash < 0 ? '' : url.slice(hash);
    return base + (base.indexOf('?') < 0 ? '?' : '&') + utm + fragment;
  }}

  document.addEventListener('DOMContentLoaded', function () {{
    var utm = utmQuery();
    document.querySelectorAll('a[{MARKER_ATTR}]').forEach(function (link) {{
      link.setAttribute('href', appendUtm(link.getAttribute('href') || '', utm));
    }});
  }});
}})();
"#
    )
}

/// Initialize .gitignore and .ignore files with specified paths
pub fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .collect::<Vec<_>>()
        .join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
