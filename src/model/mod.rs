//! Application model - the complete state of the editor session
//!
//! Following the Elm Architecture, everything `update()` may change lives here.

pub mod buffer;
pub mod document;

pub use buffer::{StyleRun, StyledBuffer};
pub use document::{is_markdown_path, Document};

use crate::config::EditorConfig;
use crate::highlight::{HighlightCoordinator, MarkdownPalette};
use crate::theme::{load_theme, Theme};

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub document: Document,
    /// Debounced Markdown highlighter for `document`
    pub highlighter: HighlightCoordinator,
    /// Theme for colors and styling
    pub theme: Theme,
    /// Persisted editor configuration
    pub config: EditorConfig,
    /// Set once a quit has been requested
    pub quit_requested: bool,
}

impl AppModel {
    /// Build a model around `document`.
    ///
    /// Highlighting starts enabled only if the config allows it and the
    /// document is Markdown.
    pub fn new(mut document: Document, theme: Theme, config: EditorConfig) -> Self {
        let palette = MarkdownPalette::from_theme(&theme);
        let mut highlighter = HighlightCoordinator::from_config(&config.highlight, palette);
        if highlighter.is_enabled() && !document.markdown {
            tracing::debug!(
                "{} is not Markdown, highlighting off",
                document.display_name()
            );
            highlighter.set_enabled(false, &mut document.buffer);
        }

        Self {
            document,
            highlighter,
            theme,
            config,
            quit_requested: false,
        }
    }

    /// Resolve the configured theme, falling back to the default on error
    pub fn resolve_theme(config: &EditorConfig) -> Theme {
        load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load theme '{}': {}, using default",
                config.theme,
                e
            );
            Theme::default()
        })
    }

    /// Swap in a new theme and its palette
    pub fn apply_theme(&mut self, theme: Theme) {
        self.highlighter
            .set_palette(MarkdownPalette::from_theme(&theme));
        self.theme = theme;
    }
}
