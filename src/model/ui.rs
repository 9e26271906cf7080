//! UI state - viewport profile, notifications, and the generate prompt

use crate::auth::AuthContext;
use crate::responsive::DeviceProfile;

// ============================================================================
// Notifications
// ============================================================================

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A user-facing notification (the "alert" of an action)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Generate Prompt
// ============================================================================

/// Text of the free-text prompt shown before generating code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSpec {
    pub title: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
}

pub const GENERATE_PROMPT: PromptSpec = PromptSpec {
    title: "Enter",
    label: "What code do you want?",
    placeholder: "e.g., simple calculator",
};

/// The open generate prompt: its serial and the identity captured when
/// generate was invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPrompt {
    pub serial: u64,
    pub auth: AuthContext,
}

// ============================================================================
// UI State
// ============================================================================

#[derive(Debug, Clone)]
pub struct UiState {
    /// Last reported viewport width in pixels
    pub viewport_width: u32,
    /// Device profile derived from `viewport_width`
    pub device: DeviceProfile,
    /// Most recent notification, until dismissed
    pub notification: Option<Notification>,
    /// Set while the generate prompt is open
    pub prompt: Option<OpenPrompt>,
    /// Serial of the most recently opened prompt
    prompt_serial: u64,
}

impl UiState {
    pub fn new(viewport_width: u32) -> Self {
        Self {
            viewport_width,
            device: DeviceProfile::classify(viewport_width),
            notification: None,
            prompt: None,
            prompt_serial: 0,
        }
    }

    /// Record a new viewport width. Returns true if the profile changed.
    pub fn resize(&mut self, width: u32) -> bool {
        self.viewport_width = width;
        let device = DeviceProfile::classify(width);
        let changed = device != self.device;
        self.device = device;
        changed
    }

    pub fn is_prompt_open(&self) -> bool {
        self.prompt.is_some()
    }

    /// Open a new prompt on behalf of `auth` and return its serial
    pub fn open_prompt(&mut self, auth: AuthContext) -> u64 {
        self.prompt_serial += 1;
        self.prompt = Some(OpenPrompt {
            serial: self.prompt_serial,
            auth,
        });
        self.prompt_serial
    }

    /// Close the prompt with `serial`, returning the identity it was opened
    /// for. Answers to a prompt that is no longer open yield `None`.
    pub fn take_prompt(&mut self, serial: u64) -> Option<AuthContext> {
        match self.prompt.take() {
            Some(open) if open.serial == serial => Some(open.auth),
            other => {
                self.prompt = other;
                None
            }
        }
    }

    pub fn close_prompt(&mut self) {
        self.prompt = None;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(1280)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_reclassifies() {
        let mut ui = UiState::new(1280);
        assert_eq!(ui.device, DeviceProfile::Desktop);
        assert!(ui.resize(800));
        assert_eq!(ui.device, DeviceProfile::Tablet);
        assert!(!ui.resize(900));
        assert!(ui.resize(768));
        assert_eq!(ui.device, DeviceProfile::Mobile);
    }

    #[test]
    fn test_answer_to_closed_prompt_is_ignored() {
        let mut ui = UiState::default();
        let first = ui.open_prompt(AuthContext::anonymous());
        ui.close_prompt();
        let second = ui.open_prompt(AuthContext::authenticated("tok", None));

        assert_eq!(ui.take_prompt(first), None);
        assert!(ui.is_prompt_open());
        assert_eq!(
            ui.take_prompt(second),
            Some(AuthContext::authenticated("tok", None))
        );
        assert!(!ui.is_prompt_open());
    }
}
