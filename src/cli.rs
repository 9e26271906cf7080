//! Command-line argument parsing for the terminal editor
//!
//! Supports:
//! - Choosing the language to open
//! - Naming the session tab (or keeping the session in memory only)
//! - Overriding service URLs, timeout and viewport width from the config file

use clap::Parser;

use crate::config::AppConfig;
use crate::languages::find_language;

/// A multi-language code runner with AI-assisted generation
#[derive(Parser, Debug, Default)]
#[command(
    name = "runpad",
    version,
    about = "Edit, run, generate and refactor code in 19 languages"
)]
pub struct CliArgs {
    /// Language to open (e.g. python, rust, mongodb)
    #[arg(short, long, default_value = "python")]
    pub language: String,

    /// Session tab name; each tab keeps its own sessions
    #[arg(short, long, default_value = "default")]
    pub tab: String,

    /// Keep sessions in memory only (nothing written to disk)
    #[arg(short, long)]
    pub memory: bool,

    /// Execution and generation service base URL
    #[arg(long, env = "RUNPAD_GENAI_URL", value_name = "URL")]
    pub genai_url: Option<String>,

    /// Account and usage-count backend base URL
    #[arg(long, env = "RUNPAD_BACKEND_URL", value_name = "URL")]
    pub backend_url: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Viewport width in pixels, used to pick the device profile
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,
}

/// Where the tab's sessions are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMedium {
    Memory,
    /// A JSON file per named tab under the config dir
    Tab(String),
}

/// Configuration derived from CLI arguments layered over the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub language: String,
    pub sessions: SessionMedium,
    pub config: AppConfig,
}

impl CliArgs {
    pub fn session_medium(&self) -> SessionMedium {
        if self.memory {
            SessionMedium::Memory
        } else {
            SessionMedium::Tab(self.tab.clone())
        }
    }

    /// Merge CLI overrides into `file` and validate the language
    pub fn into_config(self, mut file: AppConfig) -> Result<StartupConfig, String> {
        let sessions = self.session_medium();
        let language = self.language.to_lowercase();
        if find_language(&language).is_none() {
            return Err(format!("Unknown language '{}'", self.language));
        }

        if let Some(url) = self.genai_url {
            file.genai_url = url;
        }
        if let Some(url) = self.backend_url {
            file.backend_url = url;
        }
        if let Some(secs) = self.timeout {
            file.request_timeout_secs = Some(secs);
        }
        if let Some(width) = self.width {
            file.viewport_width = width;
        }

        Ok(StartupConfig {
            language,
            sessions,
            config: file,
        })
    }
}
