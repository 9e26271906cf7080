//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::auth::AuthContext;
use crate::model::{ActionKind, Notification, Ticket};
use crate::services::{CodeResponse, OutputResponse, ServiceError};

/// Edit-buffer messages
#[derive(Debug, Clone)]
pub enum EditorMsg {
    /// Replace the buffer with user-edited text
    SetCode(String),
    /// Empty code and output
    Clear,
    /// Switch to another language's session
    OpenLanguage(String),
}

/// Remote action messages
///
/// Invocations carry the identity captured when the user triggered them.
#[derive(Debug, Clone)]
pub enum ActionMsg {
    /// Run the buffer
    Run(AuthContext),
    RunCompleted {
        ticket: Ticket,
        result: Result<OutputResponse, ServiceError>,
    },

    /// Open the generate prompt
    Generate(AuthContext),
    /// The generate prompt with `serial` closed (`answer` is `None` when
    /// cancelled)
    PromptSubmitted {
        serial: u64,
        answer: Option<String>,
    },
    GenerateCompleted {
        ticket: Ticket,
        result: Result<CodeResponse, ServiceError>,
    },

    Refactor(AuthContext),
    RefactorCompleted {
        ticket: Ticket,
        result: Result<CodeResponse, ServiceError>,
    },

    /// A usage-count report finished (result is only logged)
    UsageReported {
        kind: ActionKind,
        result: Result<(), ServiceError>,
    },
}

/// Copy control messages
#[derive(Debug, Clone)]
pub enum ClipboardMsg {
    /// Copy the buffer
    Copy,
    /// Platform clipboard write finished
    WriteCompleted(Result<(), String>),
    /// Reset timer fired
    ResetElapsed { generation: u64 },
}

/// Presentation messages
#[derive(Debug, Clone)]
pub enum UiMsg {
    /// Viewport width changed (pixels)
    Resize(u32),
    /// Export the buffer as a file
    Download,
    /// Show a notification raised outside the action flow
    Notify(Notification),
    DismissNotification,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Editor(EditorMsg),
    Action(ActionMsg),
    Clipboard(ClipboardMsg),
    Ui(UiMsg),
}

impl From<EditorMsg> for Msg {
    fn from(msg: EditorMsg) -> Self {
        Msg::Editor(msg)
    }
}

impl From<ActionMsg> for Msg {
    fn from(msg: ActionMsg) -> Self {
        Msg::Action(msg)
    }
}

impl From<ClipboardMsg> for Msg {
    fn from(msg: ClipboardMsg) -> Self {
        Msg::Clipboard(msg)
    }
}

impl From<UiMsg> for Msg {
    fn from(msg: UiMsg) -> Self {
        Msg::Ui(msg)
    }
}
