//! Configuration command handlers
//!
//! Handles the `config` subcommand for inspecting and creating the config file.

use crate::config::Config;
use anyhow::{bail, Result};
use std::path::Path;

/// Handle the config command
///
/// # Arguments
/// * `explicit` - Config path given with `--config`, if any
/// * `show` - Print the effective configuration
/// * `init` - Write the default configuration file
pub fn handle(explicit: Option<&Path>, show: bool, init: bool) -> Result<()> {
    if init {
        init_config(explicit)?;
    }

    if show || !init {
        show_config(explicit)?;
    }

    Ok(())
}

/// Display the effective configuration
fn show_config(explicit: Option<&Path>) -> Result<()> {
    let path = Config::resolve_path(explicit)?;
    let config = Config::load(explicit)?;

    if path.exists() {
        println!("# Config file: {}", path.display());
    } else {
        println!("# No config file at {}, using defaults", path.display());
    }
    print!("{}", config.to_toml()?);

    Ok(())
}

/// Write the default configuration, refusing to overwrite an existing file
fn init_config(explicit: Option<&Path>) -> Result<()> {
    let path = Config::resolve_path(explicit)?;
    if path.exists() {
        bail!(
            "Config file already exists at {}; remove it first to reset",
            path.display()
        );
    }

    Config::default().save(&path)?;
    println!("Config saved to: {}", path.display());
    Ok(())
}
