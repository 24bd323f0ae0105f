use crate::storage::{config_path, DEFAULT_EXPORT_FILE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// User preferences read from `config.yml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub daily_hours: Option<f64>,
    pub export_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config> {
        Config::load_from(&config_path()?)
    }

    /// A missing file yields defaults; nothing is written back.
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(&data).context("parsing config file")?;
        Ok(config)
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// The settings actually in use, with defaults filled in.
    pub fn effective(&self) -> Config {
        Config {
            daily_hours: self.daily_hours,
            export_path: Some(self.export_path()),
            log_level: Some(self.log_level().to_string()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serializing config")
    }
}
