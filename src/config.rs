use std::path::{Path, PathBuf};

use tracing::warn;

use crate::ai::DEFAULT_SEARCH_DEPTH;
use crate::error::ConfigError;

/// Deepest search accepted from configuration. Cost grows roughly 7x per ply.
pub const MAX_SEARCH_DEPTH: usize = 10;

/// Settings for the computer opponent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Plies searched by the hard tier and by hints.
    pub search_depth: usize,
    /// Pause before an AI reply, in milliseconds. Presentation only; the
    /// engine never waits.
    pub ai_delay_ms: u64,
    /// Seed for the easy tier, for reproducible games.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            search_depth: DEFAULT_SEARCH_DEPTH,
            ai_delay_ms: 600,
            seed: None,
        }
    }
}

/// Where finished games and player statistics are kept.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: PathBuf::from("connect_four_data"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ai: AiConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ai.search_depth == 0 {
            return Err(ConfigError::Validation(
                "ai.search_depth must be >= 1".into(),
            ));
        }
        if self.ai.search_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "ai.search_depth must be <= {MAX_SEARCH_DEPTH}"
            )));
        }
        if self.store.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "store.data_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
