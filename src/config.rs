//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default backend address
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Default path of the onboarding endpoint
pub const DEFAULT_ONBOARDING_PATH: &str = "/api/onboarding";

/// Environment variable overriding the server address
pub const SERVER_URL_ENV: &str = "ONBOARDING_SERVER_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Backend base URL
    pub server_url: Option<String>,
    /// Path of the onboarding endpoint on the backend
    pub onboarding_path: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "onboarding", "onboarding-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: TuiConfig = serde_json::from_str(&content)?;
            return Ok(config);
        }

        let config = Self::with_defaults();
        if let Err(err) = config.save() {
            tracing::warn!("Could not write default config to {}: {err}", path.display());
        }
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Config with every field set to its default value
    pub fn with_defaults() -> Self {
        Self {
            server_url: Some(DEFAULT_SERVER_URL.to_string()),
            onboarding_path: Some(DEFAULT_ONBOARDING_PATH.to_string()),
        }
    }

    /// Server URL, preferring the environment over the file
    pub fn resolve_server_url(&self) -> String {
        self.resolve_server_url_with(std::env::var(SERVER_URL_ENV).ok())
    }

    fn resolve_server_url_with(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    pub fn resolve_onboarding_path(&self) -> String {
        self.onboarding_path
            .clone()
            .unwrap_or_else(|| DEFAULT_ONBOARDING_PATH.to_string())
    }
}
