use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// File name searched for when loading configuration
pub const CONFIG_FILE: &str = "specset.toml";

/// The specset configuration file structure (specset.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpecsetConfig {
    /// Named specifier sets (e.g., stable = ">=1.0.0, <2.0.0")
    pub sets: IndexMap<String, String>,
}

impl SpecsetConfig {
    /// Load configuration from specset.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                log::debug!("Reading {}", config_path.display());
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let config: SpecsetConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                return Ok(Some(config));
            }

            if !current.pop() {
                log::debug!("No {} found above {}", CONFIG_FILE, start_dir.display());
                return Ok(None);
            }
        }
    }
}

/// Resolve a specifier argument, expanding `@name` from the configured sets
pub fn resolve_specifier(raw: &str, config: Option<&SpecsetConfig>) -> Result<String> {
    let Some(name) = raw.strip_prefix('@') else {
        return Ok(raw.to_string());
    };

    let Some(config) = config else {
        bail!("Cannot resolve \"@{}\": no {} found", name, CONFIG_FILE);
    };

    match config.sets.get(name) {
        Some(specifier) => {
            log::debug!("Resolved @{} to \"{}\"", name, specifier);
            Ok(specifier.clone())
        }
        None => bail!("Unknown specifier set \"@{}\" in {}", name, CONFIG_FILE),
    }
}
