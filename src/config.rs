//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/markpad/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::highlight::{DebouncePolicy, DebounceTier, PassLimits};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Selected theme id (e.g., "light", "dark")
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Markdown highlighting knobs
    #[serde(default)]
    pub highlight: HighlightConfig,
}

fn default_theme() -> String {
    crate::theme::DEFAULT_THEME_ID.to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            highlight: HighlightConfig::default(),
        }
    }
}

/// Markdown highlighting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Start with highlighting on (Ctrl+Shift+M toggles at runtime)
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Documents longer than this (in characters) stay unstyled
    #[serde(default = "default_max_document_chars")]
    pub max_document_chars: usize,
    /// Ceiling on styled matches per rule per pass
    #[serde(default = "default_max_matches_per_rule")]
    pub max_matches_per_rule: usize,
    #[serde(default)]
    pub debounce: DebounceConfig,
}

fn default_enabled() -> bool {
    true
}

fn default_max_document_chars() -> usize {
    PassLimits::DEFAULT.max_document_chars
}

fn default_max_matches_per_rule() -> usize {
    PassLimits::DEFAULT.max_matches_per_rule
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_document_chars: default_max_document_chars(),
            max_matches_per_rule: default_max_matches_per_rule(),
            debounce: DebounceConfig::default(),
        }
    }
}

impl HighlightConfig {
    pub fn pass_limits(&self) -> PassLimits {
        PassLimits {
            max_document_chars: self.max_document_chars,
            max_matches_per_rule: self.max_matches_per_rule,
        }
    }

    pub fn debounce_policy(&self) -> DebouncePolicy {
        self.debounce.to_policy()
    }
}

/// Debounce delay tiers keyed by document length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Checked in order; the first tier whose `max_chars` covers the document wins
    #[serde(default = "default_tiers")]
    pub tiers: Vec<DebounceTierConfig>,
    /// Delay for documents longer than every tier
    #[serde(default = "default_fallback_ms")]
    pub fallback_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceTierConfig {
    pub max_chars: usize,
    pub delay_ms: u64,
}

fn default_tiers() -> Vec<DebounceTierConfig> {
    DebouncePolicy::default()
        .tiers()
        .iter()
        .map(|tier| DebounceTierConfig {
            max_chars: tier.max_chars,
            delay_ms: tier.delay.as_millis() as u64,
        })
        .collect()
}

fn default_fallback_ms() -> u64 {
    DebouncePolicy::default().fallback().as_millis() as u64
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            fallback_ms: default_fallback_ms(),
        }
    }
}

impl DebounceConfig {
    pub fn to_policy(&self) -> DebouncePolicy {
        let tiers = self
            .tiers
            .iter()
            .map(|tier| DebounceTier {
                max_chars: tier.max_chars,
                delay: Duration::from_millis(tier.delay_ms),
            })
            .collect();
        DebouncePolicy::new(tiers, Duration::from_millis(self.fallback_ms))
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Update theme and save
    pub fn set_theme(&mut self, theme_id: &str) -> Result<(), String> {
        self.theme = theme_id.to_string();
        self.save()
    }
}
