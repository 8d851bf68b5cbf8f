//! stitch - a minimal static site generator for HTML pages and partials.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use stitch::{
    build::build_site,
    cli::{Cli, Commands},
    config::{SiteConfig, expand_tilde},
    init::new_site,
    utm,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { name } => new_site(&load_config(&cli)?, name.is_some()),
        Commands::Build => build_site(&load_config(&cli)?).map(|_| ()),
        Commands::Utm { query, href } => {
            println!("{}", utm::append_utm(href, &utm::utm_query(query)));
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments.
///
/// The config file is optional for `build`; `init` refuses to overwrite one.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli
        .root
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| PathBuf::from("./"));
    let config_path = root.join(&cli.config);

    let mut config = if !cli.is_init() && config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    if cli.is_init() {
        if config.config_path.exists() {
            bail!("Config file already exists. Remove it manually or init in a different path.");
        }
    } else {
        config.validate()?;
    }

    Ok(config)
}
