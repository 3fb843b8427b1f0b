//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::ops::Range;

use markpad::commands::Cmd;
use markpad::config::EditorConfig;
use markpad::highlight::{MarkdownPalette, StyleSurface, SurfaceError, TextStyle};
use markpad::messages::Msg;
use markpad::model::{AppModel, Document, StyledBuffer};
use markpad::theme::Theme;
use markpad::update::update;

pub fn palette() -> MarkdownPalette {
    MarkdownPalette::from_theme(&Theme::default())
}

/// Markdown document model with default config and theme
pub fn test_model(text: &str) -> AppModel {
    test_model_with_config(text, EditorConfig::default())
}

pub fn test_model_with_config(text: &str, config: EditorConfig) -> AppModel {
    let theme = Theme::default();
    let base = MarkdownPalette::from_theme(&theme).base;
    AppModel::new(Document::with_text(text, base), theme, config)
}

/// Run a message through `update`, returning the flattened commands
pub fn step(model: &mut AppModel, msg: Msg) -> Vec<Cmd> {
    Cmd::from_option(update(model, msg)).flatten()
}

/// Generation of the last `ScheduleHighlight` among `cmds`
pub fn scheduled_generation(cmds: &[Cmd]) -> Option<u64> {
    cmds.iter().rev().find_map(|cmd| match cmd {
        Cmd::ScheduleHighlight { generation, .. } => Some(*generation),
        _ => None,
    })
}

/// Text covered by each run of the buffer
pub fn run_texts(buffer: &StyledBuffer) -> Vec<String> {
    buffer
        .runs()
        .iter()
        .map(|run| buffer.slice(run.range.clone()))
        .collect()
}

/// Runs never overlap and are sorted
pub fn assert_runs_disjoint(buffer: &StyledBuffer) {
    for pair in buffer.runs().windows(2) {
        assert!(
            pair[0].range.end <= pair[1].range.start,
            "runs overlap: {:?} and {:?}",
            pair[0].range,
            pair[1].range
        );
    }
}

/// A surface that edits its own text the first time it is styled.
///
/// Stands in for a rule with side effects: the edit lands while the pass
/// holds notifications suspended, so it must not schedule another pass.
pub struct MutatingSurface {
    pub inner: StyledBuffer,
    /// Byte range removed on the first `apply_style`
    pub remove_on_first_style: Range<usize>,
    pub mutated: bool,
    /// Whether notifications were attached at the moment of the mutation
    pub attached_during_mutation: Option<bool>,
}

impl MutatingSurface {
    pub fn new(text: &str, remove_on_first_style: Range<usize>) -> Self {
        Self {
            inner: StyledBuffer::new(text, palette().base),
            remove_on_first_style,
            mutated: false,
            attached_during_mutation: None,
        }
    }
}

impl StyleSurface for MutatingSurface {
    fn text(&self) -> String {
        self.inner.text()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn cursor(&self) -> usize {
        self.inner.cursor()
    }

    fn set_cursor(&mut self, offset: usize) {
        self.inner.set_cursor(offset);
    }

    fn reset_styles(&mut self, base: &TextStyle) {
        self.inner.reset_styles(base);
    }

    fn apply_style(&mut self, range: Range<usize>, style: &TextStyle) -> Result<(), SurfaceError> {
        if !self.mutated {
            self.mutated = true;
            self.attached_during_mutation = Some(self.inner.notifications_attached());
            self.inner.remove(self.remove_on_first_style.clone());
        }
        self.inner.apply_style(range, style)
    }

    fn suspend_notifications(&mut self) {
        self.inner.suspend_notifications();
    }

    fn resume_notifications(&mut self) {
        self.inner.resume_notifications();
    }
}

/// A surface whose first `apply_style` panics, standing in for a styling
/// call that blows up half-way through a pass.
pub struct PanickingSurface {
    pub inner: StyledBuffer,
    pub panicked: bool,
}

impl PanickingSurface {
    pub fn new(text: &str) -> Self {
        Self {
            inner: StyledBuffer::new(text, palette().base),
            panicked: false,
        }
    }
}

impl StyleSurface for PanickingSurface {
    fn text(&self) -> String {
        self.inner.text()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn cursor(&self) -> usize {
        self.inner.cursor()
    }

    fn set_cursor(&mut self, offset: usize) {
        self.inner.set_cursor(offset);
    }

    fn reset_styles(&mut self, base: &TextStyle) {
        self.inner.reset_styles(base);
    }

    fn apply_style(&mut self, range: Range<usize>, style: &TextStyle) -> Result<(), SurfaceError> {
        if !self.panicked {
            self.panicked = true;
            panic!("surface refused to style {:?}", range);
        }
        self.inner.apply_style(range, style)
    }

    fn suspend_notifications(&mut self) {
        self.inner.suspend_notifications();
    }

    fn resume_notifications(&mut self) {
        self.inner.resume_notifications();
    }
}
