//! Configuration loading.
//!
//! Reads an optional `flap.toml` with a `[reveal]` table mapping onto
//! [`RevealConfig`]; missing file or missing keys fall back to defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flap_core::RevealConfig;
use serde::Deserialize;

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "flap.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reveal: RevealConfig,
}

/// Loads configuration from `path`, or from `./flap.toml` when no path is
/// given. A missing default file yields the built-in defaults; an
/// explicit path that does not exist is an error.
pub fn load(path: Option<&str>) -> Result<Config> {
    let (path, required) = match path {
        Some(path) => (Path::new(path).to_path_buf(), true),
        None => (Path::new(DEFAULT_CONFIG_FILE).to_path_buf(), false),
    };
    if !path.exists() {
        if required {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("parse config file: {}", path.display()))?;
    Ok(config)
}
