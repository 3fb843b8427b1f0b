//! Theme system for the editor
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/markpad/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary
//!
//! A theme supplies two things to the highlighter: the baseline editor
//! colors a pass resets to, and the Markdown palette the rules paint with.

use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

// Embed theme YAML files at compile time
pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// Theme used when the config names nothing else
pub const DEFAULT_THEME_ID: &str = "light";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "light", "dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "light",
        yaml: LIGHT_YAML,
    },
    BuiltinTheme {
        id: "dark",
        yaml: DARK_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/markpad/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Stable identifier (e.g., "light", "my-custom-theme")
    pub id: String,
    /// Display name from YAML (e.g., "Markpad Light")
    pub name: String,
    /// Where this theme is loaded from
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// List all available themes from all sources
///
/// User themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                        if seen_ids.insert(id.to_string()) {
                            let name = extract_theme_name(&path).unwrap_or_else(|| id.to_string());
                            themes.push(ThemeInfo {
                                id: id.to_string(),
                                name,
                                source: ThemeSource::User,
                            });
                        }
                    }
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// Extract theme name from YAML file without full parsing
fn extract_theme_name(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(value) = trimmed.strip_prefix("name:") {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            return Some(value.to_string());
        }
    }
    None
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        match s.len() {
            6 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: 255,
            }),
            8 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: u8::from_str_radix(&s[6..8], 16).map_err(|e| e.to_string())?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#rrggbb", or "#rrggbbaa" when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
}

/// UI theme colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub editor: EditorThemeData,
    #[serde(default)]
    pub markdown: MarkdownThemeData,
}

/// Editor area colors
#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
}

/// Markdown highlight colors (all optional, missing keys use the light palette)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MarkdownThemeData {
    #[serde(default)]
    pub code_foreground: Option<String>,
    #[serde(default)]
    pub code_block_background: Option<String>,
    #[serde(default)]
    pub inline_code_background: Option<String>,
    /// Header colors, level 1 first
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub bold: Option<String>,
    #[serde(default)]
    pub italic: Option<String>,
    #[serde(default)]
    pub quote_foreground: Option<String>,
    #[serde(default)]
    pub quote_background: Option<String>,
    #[serde(default)]
    pub list_marker: Option<String>,
    #[serde(default)]
    pub horizontal_rule: Option<String>,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub editor: EditorTheme,
    pub markdown: MarkdownTheme,
}

/// Editor colors (resolved)
#[derive(Debug, Clone, PartialEq)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
}

/// Markdown highlight colors (resolved)
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownTheme {
    pub code_foreground: Color,
    pub code_block_background: Color,
    pub inline_code_background: Color,
    /// Index 0 is level 1 (most prominent)
    pub headers: [Color; 6],
    pub link: Color,
    pub bold: Color,
    pub italic: Color,
    pub quote_foreground: Color,
    pub quote_background: Color,
    pub list_marker: Color,
    pub horizontal_rule: Color,
}

impl MarkdownTheme {
    /// Palette for light backgrounds
    pub fn default_light() -> Self {
        Self {
            code_foreground: Color::rgb(0x5F, 0x7A, 0x6B),
            code_block_background: Color::rgb(0xEE, 0xEE, 0xEE),
            inline_code_background: Color::rgb(0xF5, 0xF5, 0xF5),
            headers: [
                Color::rgb(0x0B, 0x2E, 0x7A),
                Color::rgb(0x12, 0x40, 0x9C),
                Color::rgb(0x1A, 0x55, 0xBE),
                Color::rgb(0x23, 0x6B, 0xD8),
                Color::rgb(0x3A, 0x82, 0xEA),
                Color::rgb(0x55, 0x99, 0xF7),
            ],
            link: Color::rgb(0x03, 0x66, 0xD6),
            bold: Color::rgb(0x8B, 0x1A, 0x1A),
            italic: Color::rgb(0x6F, 0x42, 0xC1),
            quote_foreground: Color::rgb(0x6A, 0x73, 0x7D),
            quote_background: Color::rgb(0xF6, 0xF8, 0xFA),
            list_marker: Color::rgb(0xB3, 0x59, 0x00),
            horizontal_rule: Color::rgb(0xC0, 0xC0, 0xC0),
        }
    }

    fn from_data(data: &MarkdownThemeData) -> Result<Self, String> {
        let defaults = Self::default_light();
        let pick = |value: &Option<String>, fallback: Color| -> Result<Color, String> {
            value
                .as_ref()
                .map(|s| Color::from_hex(s))
                .transpose()
                .map(|c| c.unwrap_or(fallback))
        };

        let mut headers = defaults.headers;
        if !data.headers.is_empty() {
            if data.headers.len() != 6 {
                return Err(format!(
                    "markdown.headers needs 6 colors, got {}",
                    data.headers.len()
                ));
            }
            for (slot, hex) in headers.iter_mut().zip(&data.headers) {
                *slot = Color::from_hex(hex)?;
            }
        }

        Ok(Self {
            code_foreground: pick(&data.code_foreground, defaults.code_foreground)?,
            code_block_background: pick(
                &data.code_block_background,
                defaults.code_block_background,
            )?,
            inline_code_background: pick(
                &data.inline_code_background,
                defaults.inline_code_background,
            )?,
            headers,
            link: pick(&data.link, defaults.link)?,
            bold: pick(&data.bold, defaults.bold)?,
            italic: pick(&data.italic, defaults.italic)?,
            quote_foreground: pick(&data.quote_foreground, defaults.quote_foreground)?,
            quote_background: pick(&data.quote_background, defaults.quote_background)?,
            list_marker: pick(&data.list_marker, defaults.list_marker)?,
            horizontal_rule: pick(&data.horizontal_rule, defaults.horizontal_rule)?,
        })
    }
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        Ok(Theme {
            name: data.name,
            editor: EditorTheme {
                background: Color::from_hex(&data.ui.editor.background)?,
                foreground: Color::from_hex(&data.ui.editor.foreground)?,
            },
            markdown: MarkdownTheme::from_data(&data.ui.markdown)?,
        })
    }

    /// Default light theme (YAML-backed with Rust fallback)
    pub fn default_light() -> Self {
        match Theme::from_yaml(LIGHT_YAML) {
            Ok(theme) => theme,
            Err(_) => Theme {
                name: "Markpad Light".to_string(),
                editor: EditorTheme {
                    background: Color::rgb(0xFF, 0xFF, 0xFF),
                    foreground: Color::rgb(0x24, 0x29, 0x2E),
                },
                markdown: MarkdownTheme::default_light(),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_light()
    }
}
