//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod actions;
mod clipboard;
mod editor;
mod ui;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

pub use actions::{
    update_actions, CODE_GENERATION_FAILED, NO_CODE_GENERATED, NO_OUTPUT_RETURNED,
    NO_REFACTORED_CODE, REFACTOR_FAILED, RUN_FAILED,
};
pub use clipboard::update_clipboard;
pub use editor::update_editor;
pub use ui::update_ui;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    tracing::trace!("update: {:?}", msg);
    match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Action(m) => actions::update_actions(model, m),
        Msg::Clipboard(m) => clipboard::update_clipboard(model, m),
        Msg::Ui(m) => ui::update_ui(model, m),
    }
}
