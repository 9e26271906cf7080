//! Application model - the complete state of one editor view
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod actions;
pub mod clipboard;
pub mod session;
pub mod ui;

pub use actions::{ActionKind, ActionState, LoadingState, Ticket};
pub use clipboard::{ClipboardFeedback, ClipboardState, CLIPBOARD_RESET_MS};
pub use session::{EditorSession, SessionStore, StoredSession};
pub use ui::{
    Notification, NotificationLevel, OpenPrompt, PromptSpec, UiState, GENERATE_PROMPT,
};

use crate::download::DEFAULT_BASENAME;
use crate::languages::editor_mode;
use crate::responsive::EditorPresentation;

/// Label and enabled state of one action-bar control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub label: &'static str,
    pub disabled: bool,
}

/// The action bar as it should currently be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionControls {
    pub run: ControlState,
    pub clear: ControlState,
    pub copy: ControlState,
    pub download: ControlState,
    pub generate: ControlState,
    pub refactor: ControlState,
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Session of the language currently being edited
    pub session: EditorSession,
    /// Loading flags per action kind
    pub actions: ActionState,
    /// Copy control feedback
    pub clipboard: ClipboardFeedback,
    pub ui: UiState,
    /// Write-through persistence for `session`
    pub sessions: SessionStore,
    /// Base name for downloaded files
    pub download_basename: String,
}

impl AppModel {
    /// Open `language` from the store
    pub fn new(sessions: SessionStore, language: &str, viewport_width: u32) -> Self {
        let session = sessions.open(language);
        tracing::debug!(
            "Opened {} session ({} code bytes)",
            language,
            session.code.len()
        );
        Self {
            session,
            actions: ActionState::new(),
            clipboard: ClipboardFeedback::new(),
            ui: UiState::new(viewport_width),
            sessions,
            download_basename: DEFAULT_BASENAME.to_string(),
        }
    }

    pub fn with_download_basename(mut self, basename: impl Into<String>) -> Self {
        self.download_basename = basename.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.session.language
    }

    /// Manual edits are refused while a buffer-replacing action is pending
    pub fn is_read_only(&self) -> bool {
        self.actions.locks_buffer()
    }

    /// Ticket identifying the current buffer state
    pub fn ticket(&self) -> Ticket {
        Ticket {
            language: self.session.language.clone(),
            revision: self.session.revision,
        }
    }

    /// True if `ticket` was issued against the current buffer
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.language == self.session.language && ticket.revision == self.session.revision
    }

    fn persist(&self) {
        self.sessions
            .save(&self.session.language, &self.session.code, &self.session.output);
    }

    /// Replace the code buffer and persist
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.session.code = code.into();
        self.session.revision += 1;
        self.persist();
    }

    /// Replace the output buffer and persist
    pub fn set_output(&mut self, output: impl Into<String>) {
        self.session.output = output.into();
        self.persist();
    }

    /// Empty both buffers and persist
    pub fn clear(&mut self) {
        self.session.code.clear();
        self.session.output.clear();
        self.session.revision += 1;
        self.persist();
    }

    /// Switch to another language's session
    ///
    /// Revisions keep counting across switches so a ticket issued before
    /// leaving a language never matches after coming back.
    pub fn open_language(&mut self, language: &str) {
        let next_revision = self.session.revision + 1;
        self.session = self.sessions.open(language);
        self.session.revision = next_revision;
        tracing::debug!("Switched to {} session", language);
    }

    /// Parameters for the editing widget
    pub fn presentation(&self) -> EditorPresentation {
        EditorPresentation {
            font_size: self.ui.device.font_size(),
            folding: self.ui.device.folding(),
            read_only: self.is_read_only(),
            mode: editor_mode(self.language()).to_string(),
        }
    }

    pub fn controls(&self) -> ActionControls {
        let empty = self.session.is_empty();
        let running = self.actions.is_pending(ActionKind::Run);
        let generating = self.actions.is_pending(ActionKind::Generate);
        let refactoring = self.actions.is_pending(ActionKind::Refactor);

        ActionControls {
            run: ControlState {
                label: if running { "Running..." } else { "Run" },
                disabled: running,
            },
            clear: ControlState {
                label: "Clear All",
                disabled: false,
            },
            copy: ControlState {
                label: self.clipboard.state.label(),
                disabled: self.clipboard.state == ClipboardState::Copying,
            },
            download: ControlState {
                label: "Download",
                disabled: empty,
            },
            generate: ControlState {
                label: if generating { "Generating..." } else { "Generate" },
                disabled: generating,
            },
            refactor: ControlState {
                label: if refactoring {
                    "Refactoring..."
                } else {
                    "Refactor"
                },
                disabled: empty || refactoring,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::default_sample;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn model(language: &str) -> AppModel {
        AppModel::new(SessionStore::new(Arc::new(MemoryStore::new())), language, 1280)
    }

    #[test]
    fn test_new_model_seeds_sample() {
        let model = model("rust");
        assert_eq!(model.session.code, default_sample("rust"));
        assert_eq!(model.session.output, "");
    }

    #[test]
    fn test_set_code_writes_through() {
        let mut model = model("python");
        model.set_code("x = 1");
        assert_eq!(model.sessions.load("python").code, "x = 1");

        model.set_output("1");
        assert_eq!(model.sessions.load("python").output, "1");
    }

    #[test]
    fn test_tickets_go_stale_on_edit_and_switch() {
        let mut model = model("python");
        let ticket = model.ticket();
        assert!(model.is_current(&ticket));

        model.set_code("y = 2");
        assert!(!model.is_current(&ticket));

        let ticket = model.ticket();
        model.open_language("ruby");
        model.open_language("python");
        assert!(!model.is_current(&ticket));
    }

    #[test]
    fn test_controls_reflect_state() {
        let mut model = model("python");
        model.actions.begin(ActionKind::Run, crate::auth::AuthContext::anonymous());
        let controls = model.controls();
        assert_eq!(controls.run.label, "Running...");
        assert!(controls.run.disabled);
        assert!(!controls.generate.disabled);

        model.clear();
        let controls = model.controls();
        assert!(controls.download.disabled);
        assert!(controls.refactor.disabled);
        assert!(!controls.clear.disabled);
    }

    #[test]
    fn test_presentation_follows_device_and_lock() {
        let mut model = model("mongodb");
        model.ui.resize(500);
        model.actions.begin(ActionKind::Refactor, crate::auth::AuthContext::anonymous());
        let presentation = model.presentation();
        assert_eq!(presentation.font_size, 12);
        assert!(!presentation.folding);
        assert!(presentation.read_only);
        assert_eq!(presentation.mode, "javascript");
    }
}
