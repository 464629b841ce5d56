//! Loading of TOML configuration files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use high_striker_core::MinigameConfig;

/// Reads the configuration at `path`, or the defaults when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<MinigameConfig> {
    let Some(path) = path else {
        return Ok(MinigameConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration from {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid configuration in {}", path.display()))
}

/// Parses and validates a configuration document.
pub(crate) fn parse(text: &str) -> Result<MinigameConfig> {
    let config: MinigameConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Default configuration rendered as a TOML document.
pub(crate) fn render_default() -> Result<String> {
    toml::to_string_pretty(&MinigameConfig::default())
        .context("failed to render the default configuration")
}
