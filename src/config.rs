use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".bloat-builder.toml";

/// Environment variable that forces JSON log output
pub const JSON_LOG_ENV: &str = "BLOAT_BUILDER_LOG_JSON";

/// Filter used when neither `RUST_LOG` nor the config file sets one
pub const DEFAULT_LOG_FILTER: &str = "bloat_builder=info,bloat_builder_mock=warn";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    #[diagnostic(
        code(config::read_failed),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config from {path:?}: {source}")]
    #[diagnostic(
        code(config::parse_failed),
        help("Only a `[logging]` table with `filter` and `json` keys is recognized.")
    )]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. "bloat_builder=debug"
    #[serde(default)]
    pub filter: Option<String>,
    /// Emit JSON lines instead of the human-readable format
    #[serde(default)]
    pub json: Option<bool>,
}

impl LoggingConfig {
    pub fn filter_or_default(&self) -> String {
        self.filter
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }

    pub fn json_enabled(&self) -> bool {
        std::env::var_os(JSON_LOG_ENV).is_some() || self.json.unwrap_or(false)
    }
}

impl Config {
    /// Load configuration from the working directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load default config if file is missing or broken
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }
}
