//! Command enum representing all executable editor actions
//!
//! Commands are the bridge between keybindings and the message system.
//! Each command maps to one or more `Msg` values for the Elm-style update loop.

use std::str::FromStr;

use crate::messages::{AppMsg, HighlightMsg, Msg};

/// All executable commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Run a highlight pass immediately
    ForceHighlight,
    /// Switch Markdown highlighting on/off
    ToggleHighlighting,
    /// Switch to the builtin light theme
    UseLightTheme,
    /// Switch to the builtin dark theme
    UseDarkTheme,
    /// Quit the application
    Quit,
    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// Convert this command to message(s) for the Elm update loop
    pub fn to_msgs(self) -> Vec<Msg> {
        match self {
            Command::ForceHighlight => vec![Msg::Highlight(HighlightMsg::ForceHighlight)],
            Command::ToggleHighlighting => vec![Msg::Highlight(HighlightMsg::ToggleHighlighting)],
            Command::UseLightTheme => vec![Msg::App(AppMsg::SwitchTheme("light".to_string()))],
            Command::UseDarkTheme => vec![Msg::App(AppMsg::SwitchTheme("dark".to_string()))],
            Command::Quit => vec![Msg::App(AppMsg::Quit)],
            Command::Unbound => vec![],
        }
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            Command::ForceHighlight => "Highlight Now",
            Command::ToggleHighlighting => "Toggle Markdown Highlighting",
            Command::UseLightTheme => "Light Theme",
            Command::UseDarkTheme => "Dark Theme",
            Command::Quit => "Quit",
            Command::Unbound => "Unbound",
        }
    }
}

// Implement FromStr for Command to parse from YAML
impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ForceHighlight" => Ok(Command::ForceHighlight),
            "ToggleHighlighting" => Ok(Command::ToggleHighlighting),
            "UseLightTheme" => Ok(Command::UseLightTheme),
            "UseDarkTheme" => Ok(Command::UseDarkTheme),
            "Quit" => Ok(Command::Quit),
            "Unbound" => Ok(Command::Unbound),
            _ => Err(()),
        }
    }
}
