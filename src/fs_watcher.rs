//! File watching for the open document
//!
//! Uses the `notify` crate with debouncing to notice when the document is
//! rewritten on disk. The parent directory is watched (non-recursively) so
//! editors that save by renaming a temp file over the original are still seen.

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Watches a single file and reports when it changes
pub struct FileWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    /// Receiver for debounced events
    rx: Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    /// File being watched
    target: PathBuf,
}

impl FileWatcher {
    /// Start watching `path`
    ///
    /// Events are debounced with a 200ms delay so a save that touches the
    /// file several times reports once.
    pub fn new(path: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut debouncer = new_debouncer(Duration::from_millis(200), tx)?;
        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Watching {} for changes", target.display());

        Ok(Self {
            _debouncer: debouncer,
            rx,
            target,
        })
    }

    /// The watched file
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Poll for pending events (non-blocking)
    ///
    /// Returns true if the watched file changed since the last poll.
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;

        // Drain all pending events from the channel
        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    changed |= events.iter().any(|event| {
                        // Continuous events during active writes - wait for the settled one
                        matches!(event.kind, DebouncedEventKind::Any)
                            && self.is_target(&event.path)
                    });
                }
                Err(e) => {
                    tracing::warn!("File watcher error: {:?}", e);
                }
            }
        }

        if changed {
            tracing::debug!("Detected change to {}", self.target.display());
        }
        changed
    }

    fn is_target(&self, path: &Path) -> bool {
        path == self.target || std::fs::canonicalize(path).is_ok_and(|p| p == self.target)
    }
}
