//! Configuration file support.
//!
//! Reads `{config_dir}/feedlens/config.toml` unless a path is given.
//! A missing default file means defaults; a missing explicit file is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::remote::ANALYZE_PATH;

/// Environment variable that overrides `service.endpoint`.
pub const ENDPOINT_ENV: &str = "FEEDLENS_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("could not read config {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("invalid config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedlensConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Full URL the feedback text is posted to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    format!("http://127.0.0.1:5001{ANALYZE_PATH}")
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base level: trace, debug, info, warn, error. `RUST_LOG` wins if set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file for the TUI. Defaults to `{data_dir}/feedlens/feedlens.log`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn resolved_file(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("feedlens")
                .join("feedlens.log")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Ticks a freshly created chart takes to grow in. 0 disables animation.
    #[serde(default = "default_animation_frames")]
    pub animation_frames: u16,
}

fn default_animation_frames() -> u16 {
    12
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animation_frames: default_animation_frames(),
        }
    }
}

impl FeedlensConfig {
    /// Default config location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("feedlens").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&contents).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| e.to_string())
    }

    /// Apply environment overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.service.endpoint = endpoint;
        }
        self
    }
}
