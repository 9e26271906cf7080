//! Presentation update handlers

use crate::commands::Cmd;
use crate::download;
use crate::messages::UiMsg;
use crate::model::AppModel;

/// Handle presentation messages
pub fn update_ui(model: &mut AppModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::Resize(width) => {
            if model.ui.resize(width) {
                tracing::debug!("Viewport {}px -> {}", width, model.ui.device.name());
            }
            None
        }

        UiMsg::Download => {
            if model.session.is_empty() {
                return None;
            }
            let artifact = download::format(
                &model.session.code,
                &model.download_basename,
                model.language(),
            );
            tracing::info!(
                "Exporting {} ({}, {} bytes)",
                artifact.file_name,
                artifact.mime_type,
                artifact.len()
            );
            Some(Cmd::SaveDownload(artifact))
        }

        UiMsg::Notify(notification) => {
            model.ui.notification = Some(notification.clone());
            Some(Cmd::ShowNotification(notification))
        }

        UiMsg::DismissNotification => {
            model.ui.notification = None;
            None
        }
    }
}
