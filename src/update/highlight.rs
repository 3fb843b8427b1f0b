//! Markdown highlighting update handlers
//!
//! Text changes arm the debounce timer; the timer's `DebounceElapsed` comes
//! back through here and runs the pass. A stale generation is dropped by the
//! coordinator without touching the buffer.

use crate::commands::Cmd;
use crate::highlight::{PassOutcome, StyleSurface};
use crate::messages::HighlightMsg;
use crate::model::AppModel;

/// Handle highlighting messages
pub fn update_highlight(model: &mut AppModel, msg: HighlightMsg) -> Option<Cmd> {
    match msg {
        HighlightMsg::TextChanged => {
            let text = model.document.buffer.text();
            model.highlighter.on_text_changed(&text).map(Cmd::schedule)
        }

        HighlightMsg::DebounceElapsed { generation } => {
            let outcome = model
                .highlighter
                .on_timer_elapsed(generation, &mut model.document.buffer);
            redraw_after(outcome)
        }

        HighlightMsg::ForceHighlight => {
            let outcome = model.highlighter.force_pass(&mut model.document.buffer);
            redraw_after(outcome)
        }

        HighlightMsg::ToggleHighlighting => {
            model.highlighter.toggle(&mut model.document.buffer);
            Some(Cmd::Redraw)
        }
    }
}

fn redraw_after(outcome: PassOutcome) -> Option<Cmd> {
    match outcome {
        PassOutcome::Completed(report) => {
            for failure in &report.rule_failures {
                tracing::debug!("Rule {} failed during pass: {}", failure.rule, failure.message);
            }
            Some(Cmd::Redraw)
        }
        PassOutcome::Skipped(reason) => {
            tracing::debug!("Highlight pass skipped: {:?}", reason);
            None
        }
    }
}
