//! Markdown highlighting engine
//!
//! Re-colors a live text buffer after edits without disturbing the cursor,
//! the selection, or typing latency:
//! - Regex and line-scanning rules over the full text snapshot
//! - A size guard and a per-rule match cap to bound pass cost
//! - A re-armable debounce timer whose delay grows with document size
//! - A pass guard that keeps the engine's own style mutations from
//!   re-triggering scheduling
//!
//! ## Architecture
//!
//! ```text
//! Edit → Msg::Highlight(TextChanged) → DebounceScheduler arms → Cmd::ScheduleHighlight
//!      → (timer thread) → Msg::Highlight(DebounceElapsed) → HighlightCoordinator::run_pass
//!      → highlight_text() → StyleApplier → StyleSurface
//! ```
//!
//! `highlight_text` is a pure function of the text; everything that touches a
//! concrete surface goes through the [`StyleSurface`] trait.

mod applier;
mod coordinator;
mod patterns;
mod rules;
mod scheduler;
mod style;

pub use applier::{ApplyStats, StyleApplier, StyleSurface, SurfaceError};
pub use coordinator::{
    HighlightCoordinator, HighlightPhase, PassOutcome, PassReport, PassState, SkipReason,
};
pub use patterns::PatternRegistry;
pub use rules::{
    highlight_text, HighlightPass, PassLimits, RuleError, RuleFailure, RuleKind, RULE_ORDER,
};
pub use scheduler::{DebouncePolicy, DebounceScheduler, DebounceTier, PendingPass, TimerState};
pub use style::{FontFamily, FontStyle, MarkdownPalette, StyleSpan, TextStyle};
