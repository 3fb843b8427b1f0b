//! Terminal rendering
//!
//! Turns a styled buffer into text for a terminal: 24-bit ANSI escapes for the
//! styled view, the bare text for `--plain`, and a JSON dump of a pass's spans.

use std::fmt::Write as _;

use serde::Serialize;

use crate::highlight::{HighlightPass, RuleFailure, RuleKind, StyleSurface, TextStyle};
use crate::model::{AppModel, StyledBuffer};
use crate::theme::Color;

const RESET: &str = "\x1b[0m";

/// SGR escape for a style
fn sgr(style: &TextStyle) -> String {
    let mut codes: Vec<String> = Vec::new();
    if style.font.bold {
        codes.push("1".into());
    }
    if style.font.italic {
        codes.push("3".into());
    }
    if style.font.underline {
        codes.push("4".into());
    }
    codes.push(color_code(38, style.foreground));
    if let Some(bg) = style.background {
        codes.push(color_code(48, bg));
    }
    format!("\x1b[{}m", codes.join(";"))
}

fn color_code(selector: u8, color: Color) -> String {
    format!("{};2;{};{};{}", selector, color.r, color.g, color.b)
}

/// Render with ANSI colors. Styles are closed before every line break so
/// backgrounds don't bleed to the terminal edge.
pub fn render_ansi(buffer: &StyledBuffer) -> String {
    let text = buffer.text();
    let mut out = String::with_capacity(text.len() * 2);

    for (range, style) in buffer.segments() {
        let Some(segment) = text.get(range) else {
            continue;
        };
        let open = sgr(&style);
        for (i, line) in segment.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if !line.is_empty() {
                out.push_str(&open);
                out.push_str(line);
                out.push_str(RESET);
            }
        }
    }
    out
}

/// The document text without styling
pub fn render_plain(buffer: &StyledBuffer) -> String {
    buffer.text()
}

/// One-line status for watch mode
pub fn status_line(model: &AppModel) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "{} | highlighting {} | {} passes | theme {}",
        model.document.display_name(),
        if model.highlighter.is_enabled() {
            "on"
        } else {
            "off"
        },
        model.highlighter.passes_run(),
        model.theme.name
    );
    line
}

#[derive(Serialize)]
struct SpanView<'a> {
    start: usize,
    len: usize,
    rule: RuleKind,
    text: &'a str,
    style: &'a TextStyle,
}

#[derive(Serialize)]
struct PassDump<'a> {
    oversized: bool,
    rules_run: usize,
    capped: &'a [RuleKind],
    failures: &'a [RuleFailure],
    spans: Vec<SpanView<'a>>,
}

/// Pretty JSON of the spans a pass produced over `text`
pub fn spans_json(text: &str, pass: &HighlightPass) -> Result<String, serde_json::Error> {
    let spans = pass
        .spans
        .iter()
        .map(|span| SpanView {
            start: span.start,
            len: span.len,
            rule: span.rule,
            text: text.get(span.range()).unwrap_or_default(),
            style: &span.style,
        })
        .collect();

    serde_json::to_string_pretty(&PassDump {
        oversized: pass.oversized,
        rules_run: pass.rules_run,
        capped: &pass.capped,
        failures: &pass.failures,
        spans,
    })
}
