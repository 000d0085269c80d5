use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// How many recently opened datasets to remember.
const MAX_RECENT_DATASETS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default = "default_true")]
    pub dark_theme: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_format")]
    pub default_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default)]
    pub recent_datasets: Vec<String>,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_export_format() -> String {
    "csv".to_string()
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self { dark_theme: true }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: default_export_format(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            recent_datasets: Vec::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            appearance: AppearanceConfig::default(),
            export: ExportConfig::default(),
            dataset: DatasetConfig::default(),
        }
    }
}

impl AppConfig {
    /// Record a successfully opened dataset, most recent first.
    pub fn remember_dataset(&mut self, path: &str) {
        self.dataset.recent_datasets.retain(|p| p != path);
        self.dataset.recent_datasets.insert(0, path.to_string());
        self.dataset.recent_datasets.truncate(MAX_RECENT_DATASETS);
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no suitable config directory available")]
    NoConfigDir,
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    let config_dir = directories::ProjectDirs::from("", "", "rowgrade")?
        .config_dir()
        .to_path_buf();
    Some(config_dir.join("config.toml"))
}

/// Load configuration from file, or return default if file doesn't exist
pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        warn!("No config directory available; using defaults.");
        return AppConfig::default();
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse config file: {}. Using defaults.", e);
                AppConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}. Using defaults.", e);
            AppConfig::default()
        }
    }
}

/// Save configuration to file
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let toml = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml).map_err(|source| ConfigError::Write { path, source })?;

    Ok(())
}
