//! Edit-buffer update handlers

use crate::commands::Cmd;
use crate::messages::EditorMsg;
use crate::model::AppModel;

/// Handle edit-buffer messages
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::SetCode(code) => {
            if model.is_read_only() {
                tracing::debug!("Edit ignored: buffer is read-only");
                return None;
            }
            if code != model.session.code {
                model.set_code(code);
            }
            None
        }

        EditorMsg::Clear => {
            model.clear();
            None
        }

        EditorMsg::OpenLanguage(language) => {
            if language == model.session.language {
                return None;
            }
            // A prompt opened for the previous language no longer applies
            model.ui.close_prompt();
            model.open_language(&language);
            None
        }
    }
}
