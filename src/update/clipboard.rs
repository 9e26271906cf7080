//! Copy control update handlers

use crate::commands::Cmd;
use crate::messages::ClipboardMsg;
use crate::model::{AppModel, CLIPBOARD_RESET_MS};

/// Handle copy control messages
pub fn update_clipboard(model: &mut AppModel, msg: ClipboardMsg) -> Option<Cmd> {
    match msg {
        ClipboardMsg::Copy => {
            if model.session.is_empty() {
                return None;
            }
            if !model.clipboard.begin_copy() {
                tracing::debug!("Copy ignored: already copying");
                return None;
            }
            Some(Cmd::WriteClipboard {
                text: model.session.code.clone(),
            })
        }

        ClipboardMsg::WriteCompleted(result) => {
            if let Err(ref e) = result {
                tracing::warn!("Clipboard write failed: {}", e);
            }
            let generation = model.clipboard.finish_copy(result.is_ok());
            Some(Cmd::ScheduleClipboardReset {
                generation,
                delay_ms: CLIPBOARD_RESET_MS,
            })
        }

        ClipboardMsg::ResetElapsed { generation } => {
            if !model.clipboard.reset(generation) {
                tracing::trace!("Ignoring superseded clipboard reset {}", generation);
            }
            None
        }
    }
}
