//! Application runtime
//!
//! Owns the model and the message channel. Update functions stay pure; every
//! side effect they ask for (`Cmd`) is carried out here, and anything that
//! finishes later (file loads, debounce timers, key chords read from stdin)
//! comes back as a `Msg` on the channel.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::cli::OutputMode;
use crate::commands::Cmd;
use crate::fs_watcher::FileWatcher;
use crate::highlight::{HighlightPass, StyleSurface};
use crate::keymap::{parse_key_string, Keymap};
use crate::messages::{AppMsg, HighlightMsg, Msg};
use crate::model::AppModel;
use crate::update::update;
use crate::view;

use super::timer::schedule_highlight;

/// How often watch mode checks the file watcher between messages
const POLL_INTERVAL: Duration = Duration::from_millis(50);

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub struct App {
    model: AppModel,
    keymap: Keymap,
    output: OutputMode,
    watcher: Option<FileWatcher>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl App {
    pub fn new(model: AppModel, keymap: Keymap, output: OutputMode) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            keymap,
            output,
            watcher: None,
            msg_tx,
            msg_rx,
        }
    }

    /// Re-read the document whenever `watcher` reports a change
    pub fn with_watcher(mut self, watcher: FileWatcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    /// Sender for feeding messages in from other threads
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Highlight once and write the result
    pub fn run_once(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.dispatch(Msg::Highlight(HighlightMsg::ForceHighlight));
        out.write_all(self.render()?.as_bytes())?;
        out.flush()
    }

    /// Redraw on every change until a quit is requested.
    ///
    /// Key chords (`ctrl+h`, `ctrl+shift+m`, ...) are read one per line from
    /// stdin and resolved through the keymap.
    pub fn run_watch(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.spawn_chord_reader();
        self.dispatch(Msg::Highlight(HighlightMsg::ForceHighlight));
        self.redraw(out)?;

        while !self.model.quit_requested {
            match self.msg_rx.recv_timeout(POLL_INTERVAL) {
                Ok(msg) => {
                    if self.dispatch(msg) {
                        self.redraw(out)?;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let changed = self.watcher.as_ref().is_some_and(|w| w.poll_changed());
            if changed {
                if let Some(path) = self.model.document.file_path.clone() {
                    self.dispatch(Msg::App(AppMsg::FileChangedOnDisk(path)));
                }
            }
        }

        tracing::info!(
            "Leaving watch mode after {} highlight passes",
            self.model.highlighter.passes_run()
        );
        Ok(())
    }

    /// Drain messages that are already waiting. Returns whether any of them
    /// asked for a redraw.
    pub fn process_pending(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            needs_redraw |= self.dispatch(msg);
        }
        needs_redraw
    }

    /// Run one message through `update` and carry out the resulting command
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                let needs_redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                needs_redraw
            }
            None => false,
        }
    }

    fn process_cmd(&self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::ScheduleHighlight {
                generation,
                delay_ms,
            } => {
                schedule_highlight(
                    self.msg_tx.clone(),
                    generation,
                    Duration::from_millis(delay_ms),
                );
            }
            Cmd::LoadFile { path } => {
                let tx = self.msg_tx.clone();
                std::thread::spawn(move || {
                    let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                    let _ = tx.send(Msg::App(AppMsg::FileLoaded { path, result }));
                });
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::Quit => {
                tracing::debug!("Quit requested");
            }
        }
    }

    /// The document in the current output mode
    pub fn render(&mut self) -> io::Result<String> {
        let buffer = &self.model.document.buffer;
        let mut rendered = match self.output {
            OutputMode::Styled => view::render_ansi(buffer),
            OutputMode::Plain => view::render_plain(buffer),
            OutputMode::Spans => {
                let text = buffer.text();
                let pass = if self.model.highlighter.is_enabled() {
                    self.model.highlighter.preview_spans(&text)
                } else {
                    HighlightPass::default()
                };
                view::spans_json(&text, &pass).map_err(io::Error::other)?
            }
        };
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }

    fn redraw(&mut self, out: &mut impl Write) -> io::Result<()> {
        let rendered = self.render()?;
        write!(
            out,
            "{}{}\n{}\n",
            CLEAR_SCREEN,
            rendered,
            view::status_line(&self.model)
        )?;
        out.flush()
    }

    fn spawn_chord_reader(&self) {
        let tx = self.msg_tx.clone();
        let keymap = self.keymap.clone();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                for msg in chord_to_msgs(&keymap, &line) {
                    if tx.send(msg).is_err() {
                        return;
                    }
                }
            }
            tracing::debug!("stdin closed, no more key chords");
        });
    }
}

/// Resolve one typed chord line (e.g. `ctrl+shift+m`) to messages
pub fn chord_to_msgs(keymap: &Keymap, line: &str) -> Vec<Msg> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    match parse_key_string(line) {
        Ok(keystroke) => match keymap.lookup(&keystroke) {
            Some(command) => {
                tracing::debug!("{} -> {}", keystroke, command.display_name());
                command.to_msgs()
            }
            None => {
                tracing::info!("{} is not bound", keystroke);
                Vec::new()
            }
        },
        Err(e) => {
            tracing::warn!("Ignoring key chord '{}': {}", line, e);
            Vec::new()
        }
    }
}
