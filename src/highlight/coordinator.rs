//! Highlight pass lifecycle
//!
//! The coordinator owns the pattern cache, the palette, the debounce
//! scheduler and the pass guard. It is driven from the update layer:
//!
//! - `on_text_changed` when the surface reports an edit (may arm the timer)
//! - `on_timer_elapsed` when the runtime's timer fires
//! - `force_pass` / `set_enabled` for the keyboard commands
//!
//! A pass detaches the surface's change notifications before touching any
//! styles and re-attaches them on the way out, together with restoring the
//! cursor and clearing the guard. That cleanup lives in a drop guard so it
//! happens on every exit path.

use crate::config::HighlightConfig;

use super::applier::{StyleApplier, StyleSurface};
use super::patterns::PatternRegistry;
use super::rules::{highlight_text, HighlightPass, PassLimits, RuleFailure};
use super::scheduler::{DebouncePolicy, DebounceScheduler, PendingPass, TimerState};
use super::style::MarkdownPalette;

/// Reentrancy guard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PassState {
    #[default]
    Idle,
    Running,
}

/// Combined view of timer and guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightPhase {
    Idle,
    Scheduled(PendingPass),
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Highlighting is switched off
    Disabled,
    /// A pass was already in progress
    Reentrant,
    /// Nothing to highlight
    EmptyDocument,
    /// The timer that fired was superseded or cancelled
    Stale,
}

/// Summary of a completed pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub rules_run: usize,
    pub spans_applied: usize,
    pub spans_skipped: usize,
    pub spans_failed: usize,
    pub rule_failures: Vec<RuleFailure>,
    /// The size guard left the document unstyled
    pub oversized: bool,
    /// Cursor after restoration
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Completed(PassReport),
    Skipped(SkipReason),
}

impl PassOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, PassOutcome::Completed(_))
    }
}

/// Restores the surface and clears the guard when a pass ends
struct PassScope<'a> {
    state: &'a mut PassState,
    surface: &'a mut dyn StyleSurface,
    cursor: usize,
}

impl PassScope<'_> {
    fn restored_cursor(&self) -> usize {
        self.cursor.min(self.surface.len())
    }
}

impl Drop for PassScope<'_> {
    fn drop(&mut self) {
        let cursor = self.restored_cursor();
        self.surface.set_cursor(cursor);
        self.surface.resume_notifications();
        *self.state = PassState::Idle;
    }
}

#[derive(Debug)]
pub struct HighlightCoordinator {
    registry: PatternRegistry,
    palette: MarkdownPalette,
    limits: PassLimits,
    scheduler: DebounceScheduler,
    state: PassState,
    enabled: bool,
    passes_run: u64,
}

impl Default for HighlightCoordinator {
    fn default() -> Self {
        Self::new(
            MarkdownPalette::default(),
            PassLimits::DEFAULT,
            DebouncePolicy::default(),
        )
    }
}

impl HighlightCoordinator {
    pub fn new(palette: MarkdownPalette, limits: PassLimits, policy: DebouncePolicy) -> Self {
        Self {
            registry: PatternRegistry::new(),
            palette,
            limits,
            scheduler: DebounceScheduler::new(policy),
            state: PassState::Idle,
            enabled: true,
            passes_run: 0,
        }
    }

    pub fn from_config(config: &HighlightConfig, palette: MarkdownPalette) -> Self {
        let mut coordinator = Self::new(palette, config.pass_limits(), config.debounce_policy());
        coordinator.enabled = config.enabled;
        coordinator
    }

    pub fn phase(&self) -> HighlightPhase {
        match (self.state, self.scheduler.state()) {
            (PassState::Running, _) => HighlightPhase::Running,
            (PassState::Idle, TimerState::Armed(pending)) => HighlightPhase::Scheduled(pending),
            (PassState::Idle, TimerState::Idle) => HighlightPhase::Idle,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn palette(&self) -> &MarkdownPalette {
        &self.palette
    }

    pub fn limits(&self) -> &PassLimits {
        &self.limits
    }

    pub fn scheduler(&self) -> &DebounceScheduler {
        &self.scheduler
    }

    /// Number of passes that ran to completion
    pub fn passes_run(&self) -> u64 {
        self.passes_run
    }

    /// Text changed on the surface. Returns a pass for the runtime to time.
    pub fn on_text_changed(&mut self, text: &str) -> Option<PendingPass> {
        if !self.enabled || self.state == PassState::Running {
            return None;
        }
        let pending = self.scheduler.notify_changed(text)?;
        tracing::debug!(
            "Highlight pass {} scheduled in {:?}",
            pending.generation,
            pending.delay
        );
        Some(pending)
    }

    /// A debounce timer fired
    pub fn on_timer_elapsed(
        &mut self,
        generation: u64,
        surface: &mut dyn StyleSurface,
    ) -> PassOutcome {
        if !self.scheduler.fire(generation) {
            return PassOutcome::Skipped(SkipReason::Stale);
        }
        self.run_pass(surface)
    }

    /// Run a pass now, dropping any pending timer
    pub fn force_pass(&mut self, surface: &mut dyn StyleSurface) -> PassOutcome {
        self.scheduler.cancel();
        self.run_pass(surface)
    }

    /// Switch highlighting on or off.
    ///
    /// Turning it off cancels the timer and resets the surface to the base
    /// style. Turning it on runs a pass straight away.
    pub fn set_enabled(&mut self, enabled: bool, surface: &mut dyn StyleSurface) -> PassOutcome {
        self.enabled = enabled;
        self.scheduler.cancel();
        self.scheduler.forget_highlighted();

        if enabled {
            tracing::info!("Markdown highlighting enabled");
            return self.run_pass(surface);
        }

        tracing::info!("Markdown highlighting disabled");
        surface.suspend_notifications();
        surface.reset_styles(&self.palette.base);
        surface.resume_notifications();
        PassOutcome::Skipped(SkipReason::Disabled)
    }

    pub fn toggle(&mut self, surface: &mut dyn StyleSurface) -> PassOutcome {
        self.set_enabled(!self.enabled, surface)
    }

    /// Swap the palette. The caller decides whether to re-run a pass.
    pub fn set_palette(&mut self, palette: MarkdownPalette) {
        self.palette = palette;
        self.scheduler.forget_highlighted();
    }

    pub fn set_limits(&mut self, limits: PassLimits) {
        self.limits = limits;
    }

    /// Run the rules over `text` without touching any surface
    pub fn preview_spans(&mut self, text: &str) -> HighlightPass {
        highlight_text(text, &mut self.registry, &self.palette, &self.limits)
    }

    fn run_pass(&mut self, surface: &mut dyn StyleSurface) -> PassOutcome {
        if !self.enabled {
            return PassOutcome::Skipped(SkipReason::Disabled);
        }
        if self.state == PassState::Running {
            tracing::debug!("Highlight pass requested while one is running, ignoring");
            return PassOutcome::Skipped(SkipReason::Reentrant);
        }
        if surface.is_empty() {
            return PassOutcome::Skipped(SkipReason::EmptyDocument);
        }

        self.state = PassState::Running;
        let cursor = surface.cursor();
        let text = surface.text();
        self.scheduler.record_highlighted(text.clone());
        surface.suspend_notifications();

        let scope = PassScope {
            state: &mut self.state,
            surface,
            cursor,
        };

        scope.surface.reset_styles(&self.palette.base);
        let pass = highlight_text(&text, &mut self.registry, &self.palette, &self.limits);

        let mut applier = StyleApplier::new();
        applier.apply_all(&mut *scope.surface, &pass.spans);
        let stats = applier.stats();

        let report = PassReport {
            rules_run: pass.rules_run,
            spans_applied: stats.applied,
            spans_skipped: stats.skipped,
            spans_failed: stats.failed,
            rule_failures: pass.failures,
            oversized: pass.oversized,
            cursor: scope.restored_cursor(),
        };
        drop(scope);

        self.passes_run += 1;
        tracing::debug!(
            "Highlight pass done: {} spans applied, {} skipped, {} failed",
            report.spans_applied,
            report.spans_skipped,
            report.spans_failed
        );
        PassOutcome::Completed(report)
    }
}
