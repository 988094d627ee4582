// src/theme.rs
//! Persisted light/dark preference

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::FsOps;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => f.write_str("dark"),
            Theme::Light => f.write_str("light"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub struct ThemeManager {
    path: PathBuf,
    current: Theme,
}

impl ThemeManager {
    /// Load the saved preference; unreadable or missing files fall back to dark.
    pub async fn load(path: &Path) -> Result<Self> {
        let current = match FsOps::read_optional(path).await? {
            Some(content) => match toml::from_str::<ThemeFile>(&content) {
                Ok(file) => file.theme,
                Err(e) => {
                    warn!("Ignoring invalid theme file {}: {}", path.display(), e);
                    Theme::default()
                }
            },
            None => Theme::default(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            current,
        })
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist it.
    pub async fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        let content =
            toml::to_string(&ThemeFile { theme: next }).context("Failed to serialize theme")?;
        FsOps::write_file_safe(&self.path, &content).await?;

        self.current = next;
        info!("Switched to {} theme", next);
        Ok(next)
    }
}
