//! Site configuration management for `stitch.toml`.
//!
//! The file is optional; without it every field takes its default.
//!
//! # Sections
//!
//! | Section     | Purpose                                       |
//! |-------------|-----------------------------------------------|
//! | `[build]`   | Source layout, output, static passthrough     |
//! | `[vars]`    | Extra template variables (`{{name}}`)         |
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "src"
//! output = "dist"
//! root_files = ["CNAME", ".nojekyll"]
//!
//! [vars]
//! site_name = "Curio"
//! launch_year = 2021
//! ```

mod build;
pub mod defaults;
mod error;

use build::BuildConfig;
pub use error::{ConfigError, VarError};

use crate::{
    cli::{Cli, Commands},
    template::{self, Vars},
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Default config filename
pub const CONFIG_FILE: &str = "stitch.toml";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing stitch.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// User-defined template variables
    #[serde(default)]
    pub vars: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli
            .root
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| self.get_root().to_owned());

        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every directory against the root and normalize to absolute paths.
    ///
    /// `pages` and `partials` are relative to `source`, the rest to the root.
    pub fn update_path_with_root(&mut self, root: &Path, config_file: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_file));

        self.build.source = Self::normalize_path(&root.join(&self.build.source));
        self.build.pages = Self::normalize_path(&self.build.source.join(&self.build.pages));
        self.build.partials = Self::normalize_path(&self.build.source.join(&self.build.partials));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));

        self.build.extension = self.build.extension.trim_start_matches('.').to_owned();
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before building
    pub fn validate(&self) -> Result<()> {
        let build = &self.build;

        if build.extension.is_empty() {
            bail!(ConfigError::InvalidBuild {
                field: "extension",
                reason: "must not be empty",
            });
        }

        if build.max_depth == 0 {
            bail!(ConfigError::InvalidBuild {
                field: "max_depth",
                reason: "must be at least 1",
            });
        }

        self.check_output()?;
        self.vars()?;

        Ok(())
    }

    /// Reject an output directory that holds the root or the source, or that
    /// overlaps the pages, partials or a static directory.
    fn check_output(&self) -> Result<(), ConfigError> {
        let build = &self.build;
        let output = &build.output;
        let overlap = |role: &'static str, path: &Path| ConfigError::OutputOverlap {
            output: output.clone(),
            role,
            path: path.to_path_buf(),
        };

        let root = self.get_root();
        if root.starts_with(output) {
            return Err(overlap("project root", root));
        }
        if build.source.starts_with(output) {
            return Err(overlap("source directory", &build.source));
        }

        let inputs = [
            ("pages directory", build.pages.clone()),
            ("partials directory", build.partials.clone()),
        ]
        .into_iter()
        .chain(
            build
                .static_dirs
                .iter()
                .map(|dir| ("static directory", build.source.join(dir))),
        );

        for (role, path) in inputs {
            if path.starts_with(output) || output.starts_with(&path) {
                return Err(overlap(role, &path));
            }
        }

        Ok(())
    }

    /// `[vars]` coerced to template text.
    ///
    /// Scalars become their display form; arrays and tables are rejected.
    pub fn vars(&self) -> Result<Vars> {
        let mut vars = Vars::with_capacity(self.vars.len());

        for (name, value) in &self.vars {
            let invalid = |reason| ConfigError::InvalidVar {
                name: name.clone(),
                reason,
            };
            if !template::is_valid_name(name) {
                bail!(invalid(VarError::BadName));
            }
            let Some(text) = value_to_text(value) else {
                bail!(invalid(VarError::NotScalar(value.type_str())));
            };
            vars.insert(name.clone(), text);
        }

        Ok(vars)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn value_to_text(value: &toml::Value) -> Option<String> {
    use toml::Value;

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(d) => Some(d.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
