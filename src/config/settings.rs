use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_columns() -> i32 {
    8
}
fn default_rows() -> i32 {
    6
}
fn default_stats_window() -> u32 {
    7
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenConfig {
    /// Grid width; placement columns are 0..columns.
    #[serde(default = "default_columns")]
    pub columns: i32,
    /// Grid height; placement rows are 0..rows.
    #[serde(default = "default_rows")]
    pub rows: i32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Days covered by the completion-rate bar in `tend stats`.
    #[serde(default = "default_stats_window")]
    pub window_days: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_days: default_stats_window(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub garden: GardenConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "tend").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("tend.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            // First run: write the defaults so there is a file to edit.
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
