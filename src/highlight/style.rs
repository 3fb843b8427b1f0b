//! Style values produced by highlight rules

use std::ops::Range;

use serde::Serialize;

use super::rules::RuleKind;
use crate::theme::{Color, Theme};

/// Font family choice; `Inherit` keeps the surface's current font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    #[default]
    Inherit,
    Monospace,
}

/// Font variation applied on top of the surface's base font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FontStyle {
    pub family: FontFamily,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Points added to the base font size
    pub size_delta: u8,
}

impl FontStyle {
    pub const REGULAR: FontStyle = FontStyle {
        family: FontFamily::Inherit,
        bold: false,
        italic: false,
        underline: false,
        size_delta: 0,
    };

    pub const fn bold() -> Self {
        Self {
            bold: true,
            ..Self::REGULAR
        }
    }

    pub const fn italic() -> Self {
        Self {
            italic: true,
            ..Self::REGULAR
        }
    }

    pub const fn underline() -> Self {
        Self {
            underline: true,
            ..Self::REGULAR
        }
    }

    pub const fn monospace() -> Self {
        Self {
            family: FontFamily::Monospace,
            ..Self::REGULAR
        }
    }
}

/// One formatting decision: colors plus font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextStyle {
    pub foreground: Color,
    /// `None` clears the background back to the surface default
    pub background: Option<Color>,
    pub font: FontStyle,
}

impl TextStyle {
    /// Foreground only, regular font, no background
    pub const fn plain(foreground: Color) -> Self {
        Self {
            foreground,
            background: None,
            font: FontStyle::REGULAR,
        }
    }

    pub const fn with_font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    pub const fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }
}

/// A styled byte range of the text snapshot a pass ran over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSpan {
    /// Byte offset of the first styled byte
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    /// Rule that produced the span
    pub rule: RuleKind,
    pub style: TextStyle,
}

impl StyleSpan {
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Resolved styles for every rule, derived from the active theme
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownPalette {
    /// Style a pass resets the whole text to before painting
    pub base: TextStyle,
    pub code_block: TextStyle,
    pub inline_code: TextStyle,
    /// Index 0 is level 1
    pub headers: [TextStyle; 6],
    pub link: TextStyle,
    pub bold: TextStyle,
    pub italic: TextStyle,
    pub quote: TextStyle,
    pub list_marker: TextStyle,
    pub horizontal_rule: TextStyle,
}

impl MarkdownPalette {
    pub fn from_theme(theme: &Theme) -> Self {
        let md = &theme.markdown;
        // Styles without their own background sit on the editor background
        let on_editor = |foreground: Color| {
            TextStyle::plain(foreground).with_background(theme.editor.background)
        };

        let headers = std::array::from_fn(|i| {
            let level = i as u8 + 1;
            on_editor(md.headers[i]).with_font(FontStyle {
                bold: true,
                size_delta: 7 - level,
                ..FontStyle::REGULAR
            })
        });

        Self {
            base: on_editor(theme.editor.foreground),
            code_block: TextStyle::plain(md.code_foreground)
                .with_font(FontStyle::monospace())
                .with_background(md.code_block_background),
            inline_code: TextStyle::plain(md.code_foreground)
                .with_font(FontStyle::monospace())
                .with_background(md.inline_code_background),
            headers,
            link: on_editor(md.link).with_font(FontStyle::underline()),
            bold: on_editor(md.bold).with_font(FontStyle::bold()),
            italic: on_editor(md.italic).with_font(FontStyle::italic()),
            quote: TextStyle::plain(md.quote_foreground)
                .with_font(FontStyle::italic())
                .with_background(md.quote_background),
            list_marker: on_editor(md.list_marker).with_font(FontStyle::bold()),
            horizontal_rule: on_editor(md.horizontal_rule).with_font(FontStyle::bold()),
        }
    }

    /// Header style for `level` (clamped to 1..=6)
    pub fn header(&self, level: u8) -> &TextStyle {
        let idx = level.clamp(1, 6) as usize - 1;
        &self.headers[idx]
    }

    /// Style for a non-header rule. Headers resolve through [`Self::header`].
    pub fn for_rule(&self, rule: RuleKind) -> &TextStyle {
        match rule {
            RuleKind::CodeBlock => &self.code_block,
            RuleKind::InlineCode => &self.inline_code,
            RuleKind::Header => self.header(1),
            RuleKind::Link => &self.link,
            RuleKind::Bold => &self.bold,
            RuleKind::Italic => &self.italic,
            RuleKind::Quote => &self.quote,
            RuleKind::List => &self.list_marker,
            RuleKind::HorizontalRule => &self.horizontal_rule,
        }
    }
}

impl Default for MarkdownPalette {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}
