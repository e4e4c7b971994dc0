use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "MD_TOOLS_CONFIG";

pub const DEFAULT_WRAP_WIDTH: usize = 80;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings shared by every tool. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target line width for `mdwrap`.
    pub wrap_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Loads the user's config, falling back to defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        Ok(Self::load_from_path(&config_path)?.unwrap_or_default())
    }

    /// `$MD_TOOLS_CONFIG` when set, otherwise `~/.config/md-tools/config.toml`.
    pub fn config_path() -> PathBuf {
        Self::resolve_config_path(std::env::var(CONFIG_ENV).ok().as_deref())
    }

    fn resolve_config_path(override_path: Option<&str>) -> PathBuf {
        match override_path.filter(|p| !p.is_empty()) {
            Some(path) => {
                let path = PathBuf::from(path);
                Self::expand_path(&path).unwrap_or(path)
            }
            None => {
                let config_dir = shellexpand::tilde("~/.config/md-tools");
                PathBuf::from(config_dir.as_ref()).join("config.toml")
            }
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        shellexpand::full(&path.to_string_lossy())
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}
