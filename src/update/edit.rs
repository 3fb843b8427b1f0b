//! Text editing handlers

use crate::commands::Cmd;
use crate::highlight::StyleSurface;
use crate::messages::{EditMsg, HighlightMsg};
use crate::model::AppModel;

use super::highlight::update_highlight;

/// Handle edit messages
pub fn update_edit(model: &mut AppModel, msg: EditMsg) -> Option<Cmd> {
    let buffer = &mut model.document.buffer;
    match msg {
        EditMsg::Insert { offset, text } => buffer.insert(offset, &text),
        EditMsg::Delete(range) => buffer.remove(range),
        EditMsg::ReplaceAll(text) => buffer.set_text(&text),
        EditMsg::SetCursor(offset) => {
            buffer.set_cursor(offset);
            return Some(Cmd::Redraw);
        }
        EditMsg::Select(range) => {
            buffer.select(range);
            return Some(Cmd::Redraw);
        }
    }

    after_text_change(model)
}

/// Forward buffer change notifications to the highlighter
fn after_text_change(model: &mut AppModel) -> Option<Cmd> {
    if model.document.buffer.take_notifications() == 0 {
        return None;
    }
    model.document.revision += 1;

    let schedule = update_highlight(model, HighlightMsg::TextChanged);
    Some(Cmd::batch(vec![Cmd::Redraw, Cmd::from_option(schedule)]))
}
