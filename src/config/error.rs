//! Errors raised while loading and validating `stitch.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid stitch.toml")]
    Toml(#[from] toml::de::Error),

    /// A `[build]` field outside its allowed range.
    #[error("[build.{field}] {reason}")]
    InvalidBuild {
        field: &'static str,
        reason: &'static str,
    },

    /// The output directory overlaps a directory it would wipe on rebuild.
    #[error("[build.output] `{}` overlaps the {role} `{}`", output.display(), path.display())]
    OutputOverlap {
        output: PathBuf,
        role: &'static str,
        path: PathBuf,
    },

    #[error("[vars.{name}] {reason}")]
    InvalidVar { name: String, reason: VarError },
}

/// Why a `[vars]` entry cannot become a template variable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VarError {
    #[error("is not a valid variable name, use letters, digits and `_`")]
    BadName,

    #[error("must be a string, number, boolean or datetime, got {0}")]
    NotScalar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("stitch.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.to_string(), "failed to read `stitch.toml`");
    }

    #[test]
    fn test_overlap_display() {
        let err = ConfigError::OutputOverlap {
            output: PathBuf::from("/site/src/pages"),
            role: "pages directory",
            path: PathBuf::from("/site/src/pages"),
        };
        assert_eq!(
            err.to_string(),
            "[build.output] `/site/src/pages` overlaps the pages directory `/site/src/pages`"
        );
    }

    #[test]
    fn test_var_error_display() {
        let err = ConfigError::InvalidVar {
            name: "tags".into(),
            reason: VarError::NotScalar("array"),
        };
        assert_eq!(
            err.to_string(),
            "[vars.tags] must be a string, number, boolean or datetime, got array"
        );

        let err = ConfigError::InvalidBuild {
            field: "extension",
            reason: "must not be empty",
        };
        assert_eq!(err.to_string(), "[build.extension] must not be empty");
    }
}
