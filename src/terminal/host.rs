//! Terminal implementation of the runtime's platform effects

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use runpad::download::DownloadArtifact;
use runpad::model::{Notification, NotificationLevel, PromptSpec};
use runpad::routes::Route;
use runpad::Host;

pub struct TerminalHost {
    /// Directory exported files are written to
    download_dir: PathBuf,
    /// Answer channel of the open prompt, if any
    prompt: Mutex<Option<oneshot::Sender<Option<String>>>>,
    /// Set when the output region should be shown
    scroll_requested: AtomicBool,
}

impl TerminalHost {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            download_dir,
            prompt: Mutex::new(None),
            scroll_requested: AtomicBool::new(false),
        }
    }

    fn prompt_slot(&self) -> std::sync::MutexGuard<'_, Option<oneshot::Sender<Option<String>>>> {
        self.prompt.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt_slot().is_some()
    }

    /// Route an input line to the open prompt. Returns false if no prompt
    /// is open. `:cancel` cancels the prompt.
    pub fn answer_prompt(&self, line: &str) -> bool {
        let Some(tx) = self.prompt_slot().take() else {
            return false;
        };
        let answer = if line.trim() == ":cancel" {
            None
        } else {
            Some(line.to_string())
        };
        let _ = tx.send(answer);
        true
    }

    /// Consume a pending scroll-to-output request
    pub fn take_scroll_request(&self) -> bool {
        self.scroll_requested.swap(false, Ordering::SeqCst)
    }
}

#[async_trait]
impl Host for TerminalHost {
    async fn write_clipboard(&self, text: &str) -> Result<(), String> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_text(text))
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    }

    async fn prompt(&self, spec: PromptSpec) -> Option<String> {
        let (tx, rx) = oneshot::channel();
        *self.prompt_slot() = Some(tx);
        println!(
            "── {} ── {} ({}; :cancel to cancel)",
            spec.title, spec.label, spec.placeholder
        );
        rx.await.ok().flatten()
    }

    fn navigate(&self, route: &Route) {
        println!("→ {}", route.path());
    }

    fn scroll_to_output(&self) {
        self.scroll_requested.store(true, Ordering::SeqCst);
    }

    fn save_download(&self, artifact: &DownloadArtifact) -> Result<(), String> {
        let path = self.download_dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.content)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        println!(
            "Saved {} ({}, {} bytes)",
            path.display(),
            artifact.mime_type,
            artifact.len()
        );
        Ok(())
    }

    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Error => {
                eprintln!("[{}] {}", notification.title, notification.message)
            }
            NotificationLevel::Info => {
                println!("[{}] {}", notification.title, notification.message)
            }
        }
    }
}
