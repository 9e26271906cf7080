//! runpad terminal editor

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::Instrument;

use runpad::cli::{CliArgs, SessionMedium};
use runpad::model::{AppModel, SessionStore};
use runpad::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use runpad::{AppConfig, AuthGate, HttpServices, Runtime};

mod terminal;

use terminal::{Repl, TerminalHost};

fn session_medium(medium: &SessionMedium) -> Result<Arc<dyn KeyValueStore>> {
    match medium {
        SessionMedium::Memory => Ok(Arc::new(MemoryStore::new())),
        SessionMedium::Tab(tab) => {
            runpad::config_paths::ensure_sessions_dir().map_err(|e| anyhow!(e))?;
            let path = runpad::config_paths::session_file(tab)
                .context("No config directory available for sessions")?;
            tracing::info!("Tab '{}' sessions at {}", tab, path.display());
            Ok(Arc::new(JsonFileStore::open(path)))
        }
    }
}

fn credential_store() -> Arc<dyn KeyValueStore> {
    match runpad::config_paths::credentials_file() {
        Some(path) => Arc::new(JsonFileStore::open(path)),
        None => {
            tracing::warn!("No config directory; credentials will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let tab = match args.session_medium() {
        SessionMedium::Memory => "memory".to_string(),
        SessionMedium::Tab(tab) => tab,
    };
    runpad::tracing::init(&tab);

    let startup = args
        .into_config(AppConfig::load())
        .map_err(|e| anyhow!(e))?;
    tracing::debug!("Startup: {:?}", startup);

    let services = HttpServices::new(startup.config.endpoints(), startup.config.request_timeout())
        .context("Failed to build HTTP client")?;

    let sessions = SessionStore::new(session_medium(&startup.sessions)?);
    let model = AppModel::new(sessions, &startup.language, startup.config.viewport_width)
        .with_download_basename(startup.config.download_basename.clone());

    let download_dir = std::env::current_dir().context("No current directory")?;
    let host = Arc::new(TerminalHost::new(download_dir));
    let runtime = Runtime::new(
        model,
        Arc::new(services),
        host.clone(),
        AuthGate::new(credential_store()),
    );

    Repl::new(runtime, host)
        .run()
        .instrument(runpad::tracing::tab_span(&tab))
        .await
}
