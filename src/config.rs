//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Banner shown above the form when no merchant text is configured
const DEFAULT_BANNER: &str = "You are one step away from story perfection!";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Mask the CVV while typing (default: true)
    pub mask_cvv: Option<bool>,
    /// Banner text shown above the card form
    pub banner: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "checkout", "checkout-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path, defaulting when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn mask_cvv(&self) -> bool {
        self.mask_cvv.unwrap_or(true)
    }

    pub fn banner(&self) -> &str {
        self.banner.as_deref().unwrap_or(DEFAULT_BANNER)
    }
}
