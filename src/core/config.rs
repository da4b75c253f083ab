use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Simulated latency of the mock data sources, in milliseconds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    pub transaction_delay_ms: u64,
    pub tournament_delay_ms: u64,
    pub event_delay_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            transaction_delay_ms: 0,
            tournament_delay_ms: 500,
            event_delay_ms: 400,
        }
    }
}

fn default_tournaments() -> Vec<String> {
    vec![
        "Summer Smash Fest 2024".to_string(),
        "Apex Arena Championship".to_string(),
    ]
}

fn default_presets() -> Vec<u32> {
    vec![7, 30]
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Names offered by the payments tournament dropdown, besides "All".
    #[serde(default = "default_tournaments")]
    pub tournaments: Vec<String>,
    /// Allowed "last N days" presets.
    #[serde(default = "default_presets")]
    pub presets: Vec<u32>,
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tournaments: default_tournaments(),
            presets: default_presets(),
            loader: LoaderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, or defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("app", "tourney", "tourney")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
