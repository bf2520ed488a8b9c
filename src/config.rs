//! Configuration Module
//! Where the dataset lives and how the window is sized. Read from JSON,
//! every field optional.

use crate::data::TextEncoding;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CLIMATE_DASHBOARD_CONFIG";
/// Env var overriding `data.base_dir`.
pub const DATA_DIR_ENV: &str = "CLIMATE_DATA_DIR";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "climate_dashboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    pub base_dir: PathBuf,
    pub primary_file: String,
    pub fallback_file: String,
    pub encoding: TextEncoding,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            primary_file: "natural_disasters.csv".to_string(),
            fallback_file: "data2.csv".to_string(),
            encoding: TextEncoding::Latin1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Climate Risk Analysis Dashboard".to_string(),
            width: 1400.0,
            height: 900.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataSourceConfig,
    pub window: WindowConfig,
}

impl DashboardConfig {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("invalid dashboard config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Env-named file, else `climate_dashboard.json` if present, else
    /// defaults; then apply the data-dir override.
    pub fn resolve() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.is_file() {
                    bail!("{CONFIG_PATH_ENV} points to missing file {}", path.display());
                }
                Self::load(&path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data.base_dir = PathBuf::from(dir);
        }

        log::debug!("Resolved config: {config:?}");
        Ok(config)
    }
}
