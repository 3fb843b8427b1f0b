//! Configurable keyboard mapping
//!
//! Maps key chords to editor commands, loaded from YAML so users can rebind:
//!
//! ```text
//! "ctrl+shift+m" → Keystroke → Keymap::lookup() → Command → Vec<Msg>
//! ```
//!
//! ```ignore
//! let keymap = Keymap::with_bindings(load_default_keymap());
//! let stroke = parse_key_string("ctrl+h")?;
//! let msgs = keymap.lookup(&stroke).map(Command::to_msgs);
//! ```

mod binding;
mod command;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use defaults::{default_bindings, load_default_keymap, merge_bindings, DEFAULT_KEYMAP_YAML};
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
