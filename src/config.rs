//! Sprout configuration.
//!
//! Loaded from `~/.sprout/config.toml`. Every key is optional; a missing file
//! means all defaults.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::create::DEFAULT_PLACEHOLDER_PROVIDER;
use crate::storage::Storage;

/// Sprout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// The wiki references are resolved in when they don't name one.
    pub default_wiki: String,

    /// Local reference of the provider record that only scaffolds the
    /// registry and is never offered as a template.
    pub placeholder_provider: String,

    /// Database location. Defaults to `~/.sprout/wiki.sqlite`.
    pub database: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_wiki: "xwiki".to_string(),
            placeholder_provider: DEFAULT_PLACEHOLDER_PROVIDER.to_string(),
            database: None,
        }
    }
}

impl Config {
    /// Load config from `~/.sprout/config.toml`.
    /// Returns defaults if the file is missing, an error if it is invalid.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or does not parse.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// Parse and validate config file contents.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or an empty `default-wiki`.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(contents).map_err(|e| e.to_string())?;

        if config.default_wiki.is_empty() {
            return Err("default-wiki is empty".to_string());
        }

        Ok(config)
    }

    /// The config file path: `~/.sprout/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".sprout").join("config.toml"))
    }

    /// The database path: the configured one, else the default location.
    #[must_use]
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database.clone().or_else(Storage::default_path)
    }
}
