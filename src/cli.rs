//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// stitch static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: stitch.toml)
    #[arg(short = 'C', long, default_value = "stitch.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Deletes the output directory if there is one and rebuilds the site
    Build,

    /// Print a link with the UTM parameters of a page query string appended
    Utm {
        /// Query string of the landing page, e.g. `?utm_source=news&ref=1`
        #[arg(short, long)]
        query: String,

        /// Link target to decorate
        href: String,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build)
    }
    pub const fn is_utm(&self) -> bool {
        matches!(self.command, Commands::Utm { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["stitch", "--root", "site", "build"]).unwrap();
        assert!(cli.is_build());
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("stitch.toml"));
    }

    #[test]
    fn test_parse_init_with_name() {
        let cli = Cli::try_parse_from(["stitch", "init", "blog"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Init { name: Some(ref name) } if name == &PathBuf::from("blog")
        ));
    }

    #[test]
    fn test_parse_utm() {
        let cli = Cli::try_parse_from(["stitch", "utm", "-q", "?utm_source=x", "/a"]).unwrap();
        match cli.command {
            Commands::Utm { query, href } => {
                assert_eq!(query, "?utm_source=x");
                assert_eq!(href, "/a");
            }
            _ => panic!("expected utm command"),
        }
    }

    #[test]
    fn test_output_override() {
        let cli = Cli::try_parse_from(["stitch", "-o", "public", "build"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("public")));
    }
}
