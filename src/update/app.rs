//! App message handlers (file loading, themes, quit)

use crate::commands::Cmd;
use crate::highlight::StyleSurface;
use crate::messages::{AppMsg, EditMsg};
use crate::model::AppModel;
use crate::theme::load_theme;

use super::edit::update_edit;

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::FileLoaded { path, result } => match result {
            Ok(content) => {
                tracing::info!("Reloaded {}", path.display());
                update_edit(model, EditMsg::ReplaceAll(content))
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", path.display(), e);
                None
            }
        },

        AppMsg::FileChangedOnDisk(path) => {
            tracing::debug!("File changed on disk: {}", path.display());
            Some(Cmd::LoadFile { path })
        }

        AppMsg::SwitchTheme(theme_id) => {
            let theme = match load_theme(&theme_id) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::warn!("Failed to load theme '{}': {}", theme_id, e);
                    return None;
                }
            };
            tracing::info!("Switched theme to {}", theme.name);
            model.apply_theme(theme);
            model.config.theme = theme_id;

            let buffer = &mut model.document.buffer;
            if model.highlighter.is_enabled() {
                model.highlighter.force_pass(buffer);
            } else {
                buffer.suspend_notifications();
                buffer.reset_styles(&model.highlighter.palette().base);
                buffer.resume_notifications();
            }
            Some(Cmd::Redraw)
        }

        AppMsg::Quit => {
            model.quit_requested = true;
            Some(Cmd::Quit)
        }
    }
}
