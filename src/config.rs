//! Application configuration persistence
//!
//! Stores settings in `~/.config/runpad/config.yaml`

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::download::DEFAULT_BASENAME;
use crate::services::ServiceEndpoints;

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the execution and generation service
    #[serde(default = "default_genai_url")]
    pub genai_url: String,
    /// Base URL of the account and usage-count backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Per-request timeout; unset means requests may wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Base name for exported files
    #[serde(default = "default_download_basename")]
    pub download_basename: String,
    /// Viewport width assumed at startup (pixels)
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
}

fn default_genai_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_download_basename() -> String {
    DEFAULT_BASENAME.to_string()
}

fn default_viewport_width() -> u32 {
    1280
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            genai_url: default_genai_url(),
            backend_url: default_backend_url(),
            request_timeout_secs: None,
            download_basename: default_download_basename(),
            viewport_width: default_viewport_width(),
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn endpoints(&self) -> ServiceEndpoints {
        ServiceEndpoints::new(self.genai_url.clone(), self.backend_url.clone())
    }

    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs.map(std::time::Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: AppConfig = serde_yaml::from_str("genai_url: http://example:1\n").unwrap();
        assert_eq!(config.genai_url, "http://example:1");
        assert_eq!(config.backend_url, default_backend_url());
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.download_basename, "file");
    }

    #[test]
    fn test_no_timeout_by_default() {
        assert_eq!(AppConfig::default().request_timeout(), None);
    }
}
