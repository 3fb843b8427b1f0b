use std::io::Read;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use markpad::cli::{CliArgs, InputSource};
use markpad::fs_watcher::FileWatcher;
use markpad::highlight::MarkdownPalette;
use markpad::keymap::{load_default_keymap, Keymap};
use markpad::model::{AppModel, Document};
use markpad::runtime::App;
use markpad::EditorConfig;

fn main() -> Result<()> {
    let startup = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;

    markpad::tracing::init();

    let mut config = EditorConfig::load();
    if let Some(theme) = &startup.theme {
        config.theme = theme.clone();
    }
    let theme = AppModel::resolve_theme(&config);
    let base = MarkdownPalette::from_theme(&theme).base;

    let document = match &startup.source {
        InputSource::File(path) => Document::from_file(path.clone(), base)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Document::with_text(&text, base)
        }
    };

    let model = AppModel::new(document, theme, config);
    let keymap = Keymap::with_bindings(load_default_keymap());
    let mut app = App::new(model, keymap, startup.output);
    let mut stdout = std::io::stdout().lock();

    if startup.watch {
        if let Some(path) = startup.file_path() {
            let watcher = FileWatcher::new(path)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
            app = app.with_watcher(watcher);
        }
        app.run_watch(&mut stdout)?;
    } else {
        app.run_once(&mut stdout)?;
    }

    Ok(())
}
