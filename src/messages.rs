//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::ops::Range;
use std::path::PathBuf;

/// Text editing messages. Offsets are byte offsets into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMsg {
    /// Insert text at an offset
    Insert { offset: usize, text: String },
    /// Remove a byte range
    Delete(Range<usize>),
    /// Replace the whole document text
    ReplaceAll(String),
    /// Move the cursor (collapses the selection)
    SetCursor(usize),
    /// Select a byte range
    Select(Range<usize>),
}

/// Markdown highlighting messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMsg {
    /// The document text changed; (re)arm the debounce timer
    TextChanged,
    /// A debounce timer expired
    DebounceElapsed { generation: u64 },
    /// Run a pass immediately (Ctrl+H)
    ForceHighlight,
    /// Switch highlighting on/off (Ctrl+Shift+M)
    ToggleHighlighting,
}

/// Application-level messages (file operations, theme, lifecycle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// File load completed (async result)
    FileLoaded {
        path: PathBuf,
        result: Result<String, String>,
    },
    /// The watched file was modified on disk
    FileChangedOnDisk(PathBuf),
    /// Switch to a theme by id
    SwitchTheme(String),
    /// Quit the application
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Text editing
    Edit(EditMsg),
    /// Highlighting lifecycle
    Highlight(HighlightMsg),
    /// App messages (file I/O, theme, quit)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Msg::Edit(EditMsg::Insert {
            offset,
            text: text.into(),
        })
    }

    pub fn delete(range: Range<usize>) -> Self {
        Msg::Edit(EditMsg::Delete(range))
    }

    pub fn debounce_elapsed(generation: u64) -> Self {
        Msg::Highlight(HighlightMsg::DebounceElapsed { generation })
    }
}
