//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod edit;
mod highlight;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

pub use app::update_app;
pub use edit::update_edit;
pub use highlight::update_highlight;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    tracing::trace!("update: {:?}", msg);

    match msg {
        Msg::Edit(m) => edit::update_edit(model, m),
        Msg::Highlight(m) => highlight::update_highlight(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}
