// src/core/config_manager.rs
//! Configuration: optional YAML file plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::core::FsOps;
use crate::render::RenderTiming;

const CONFIG_PATH_ENV: &str = "RESUME_SCORER_CONFIG";
const SERVICE_URL_ENV: &str = "RESUME_SCORER_URL";
const DEFAULT_CONFIG_FILE: &str = "resume_scorer.yaml";
const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub service: ServiceConfig,
    pub render: RenderConfig,
    pub notifications: NotificationConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub stagger_ms: u64,
    pub score_tick_ms: u64,
    pub score_steps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub toast_duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub report_dir: PathBuf,
    pub theme_path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    service: ServiceConfig,
    render: RenderConfig,
    notifications: NotificationConfig,
    paths: PathsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let timing = RenderTiming::default();
        Self {
            stagger_ms: timing.stagger.as_millis() as u64,
            score_tick_ms: timing.score_tick.as_millis() as u64,
            score_steps: timing.score_steps,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("reports"),
            theme_path: PathBuf::from("theme.toml"),
        }
    }
}

impl RenderConfig {
    pub fn timing(&self) -> RenderTiming {
        RenderTiming {
            stagger: Duration::from_millis(self.stagger_ms),
            score_tick: Duration::from_millis(self.score_tick_ms),
            score_steps: self.score_steps,
        }
    }
}

impl NotificationConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

impl ConfigManager {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let base_dir = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_file(&PathBuf::from(path), &base_dir)?,
            Err(_) => {
                let default_path = base_dir.join(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path, &base_dir)?
                } else {
                    info!("No configuration file found, using defaults");
                    Self::from_yaml_str("{}", &base_dir)?
                }
            }
        };

        if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
            config.service.base_url = url;
        }

        info!("Scoring service URL: {}", config.service.base_url);
        Ok(config)
    }

    pub fn load_from_file(path: &Path, base_dir: &Path) -> Result<Self> {
        info!("Loading configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&content, base_dir)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml_str(content: &str, base_dir: &Path) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Invalid YAML")?;

        Ok(Self {
            service: file.service,
            render: file.render,
            notifications: file.notifications,
            paths: PathsConfig {
                report_dir: FsOps::normalize_path(base_dir, &file.paths.report_dir),
                theme_path: FsOps::normalize_path(base_dir, &file.paths.theme_path),
            },
        })
    }
}
