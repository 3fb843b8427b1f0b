//! markpad - debounced Markdown highlighting
//!
//! The highlighting engine lives in [`highlight`]; the rest of the crate wraps
//! it in an Elm-style loop (`Msg` → `update` → `Cmd`) that renders a document
//! to the terminal and re-highlights it as it changes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod fs_watcher;
pub mod highlight;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use highlight::{highlight_text, HighlightCoordinator, StyleSurface};
pub use messages::Msg;
pub use model::AppModel;
pub use theme::Theme;
