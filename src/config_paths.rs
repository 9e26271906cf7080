//! Centralized configuration paths for runpad
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/runpad/`
//! - Windows: `%APPDATA%\runpad\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "runpad";

/// Base config directory for runpad
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/runpad`
///   - Else: `~/.config/runpad`
///
/// Windows:
///   - `%APPDATA%\runpad`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/runpad/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/runpad/auth.json` (durable token and username)
pub fn credentials_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("auth.json"))
}

/// `~/.config/runpad/sessions/`
pub fn sessions_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("sessions"))
}

/// `~/.config/runpad/sessions/<tab>.json`
///
/// Characters outside `[A-Za-z0-9_-]` in the tab name are replaced with `_`.
pub fn session_file(tab: &str) -> Option<PathBuf> {
    sessions_dir().map(|dir| dir.join(format!("{}.json", file_stem(tab))))
}

/// Prefix of the daily-rotated log files under `~/.config/runpad/logs/`
/// for one tab: `runpad.<tab>.log`
pub fn log_file_prefix(tab: &str) -> String {
    format!("{}.{}.log", APP_DIR, file_stem(tab))
}

fn file_stem(tab: &str) -> String {
    let name: String = tab
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        "default".to_string()
    } else {
        name
    }
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure sessions dir exists, returning it
pub fn ensure_sessions_dir() -> Result<PathBuf, String> {
    let sessions = ensure_config_dir()?.join("sessions");
    ensure_dir(&sessions)?;
    Ok(sessions)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
