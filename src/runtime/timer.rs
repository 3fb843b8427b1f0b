//! Debounce timers
//!
//! Each armed pass gets its own sleeping thread. Timers are never cancelled;
//! a timer whose generation has been superseded reports back anyway and the
//! highlighter drops it as stale.

use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::messages::Msg;

/// Send `DebounceElapsed { generation }` on `tx` after `delay`
pub fn schedule_highlight(tx: Sender<Msg>, generation: u64, delay: Duration) -> JoinHandle<()> {
    std::thread::spawn(move || {
        std::thread::sleep(delay);
        tracing::trace!("Debounce timer {} elapsed", generation);
        // Receiver gone means the app is shutting down
        let _ = tx.send(Msg::debounce_elapsed(generation));
    })
}
