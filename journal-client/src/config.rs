use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Base URL of the journal backend, e.g. "http://localhost:3001"
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl JournalConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("journal-client")
            .join("config.toml"))
    }

    /// Load config from the config file and `JOURNAL_*` environment variables.
    /// The file is optional; blank values fall back to the defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path, environment())
    }

    fn load_from(path: &Path, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read config at {}", path.display()))?;

        let mut config: Self = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;

        if config.api_url.trim().is_empty() {
            config.api_url = default_api_url();
        }
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("JOURNAL").ignore_empty(true)
}
