//! Command-line argument parsing
//!
//! Supports:
//! - Rendering a file (or stdin) with Markdown highlighting
//! - Dumping the highlight spans as JSON
//! - Watch mode: re-highlight (debounced) whenever the file changes

use clap::Parser;
use std::path::PathBuf;

/// Debounced Markdown highlighting for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "markpad",
    version,
    about = "Debounced Markdown highlighting for the terminal"
)]
pub struct CliArgs {
    /// File to open; reads stdin when omitted
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Print the highlight spans as JSON instead of rendering
    #[arg(long, conflicts_with = "plain")]
    pub spans: bool,

    /// Print the document without styling
    #[arg(long)]
    pub plain: bool,

    /// Keep running and re-highlight when the file changes on disk
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Theme id (builtin: light, dark; or a file in the themes directory)
    #[arg(short = 't', long, value_name = "ID")]
    pub theme: Option<String>,
}

/// Where the document text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

/// How the highlighted document is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// 24-bit ANSI colors
    Styled,
    /// Text only
    Plain,
    /// JSON span dump
    Spans,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub source: InputSource,
    pub output: OutputMode,
    pub watch: bool,
    /// Theme override; the configured theme is used when `None`
    pub theme: Option<String>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let source = match self.path {
            Some(path) if path.as_os_str() == "-" => InputSource::Stdin,
            Some(path) => {
                if path.is_dir() {
                    return Err(format!("{} is a directory", path.display()));
                }
                InputSource::File(path)
            }
            None => InputSource::Stdin,
        };

        if self.watch && source == InputSource::Stdin {
            return Err("--watch needs a file path".to_string());
        }

        let output = if self.spans {
            OutputMode::Spans
        } else if self.plain {
            OutputMode::Plain
        } else {
            OutputMode::Styled
        };

        Ok(StartupConfig {
            source,
            output,
            watch: self.watch,
            theme: self.theme,
        })
    }
}

impl StartupConfig {
    /// Path of the file being opened, if any
    pub fn file_path(&self) -> Option<&PathBuf> {
        match &self.source {
            InputSource::File(path) => Some(path),
            InputSource::Stdin => None,
        }
    }
}
