//! Platform effects the runtime delegates to its front end

use async_trait::async_trait;

use crate::download::DownloadArtifact;
use crate::model::{Notification, PromptSpec};
use crate::routes::Route;

/// Everything outside the editor state that a front end provides
#[async_trait]
pub trait Host: Send + Sync {
    /// Write text to the system clipboard
    async fn write_clipboard(&self, text: &str) -> Result<(), String>;

    /// Show a free-text prompt; `None` when the user cancels
    async fn prompt(&self, spec: PromptSpec) -> Option<String>;

    /// Leave the current view for `route`
    fn navigate(&self, route: &Route);

    /// Bring the output region into view
    fn scroll_to_output(&self);

    /// Hand an exported file to the user
    fn save_download(&self, artifact: &DownloadArtifact) -> Result<(), String>;

    fn notify(&self, notification: &Notification);
}
