//! Debounce scheduling for highlight passes
//!
//! The scheduler does not own a clock. Arming hands back a [`PendingPass`]
//! whose generation the caller passes to a timer; when the timer reports
//! back, [`DebounceScheduler::fire`] accepts it only if nothing re-armed in
//! the meantime. Re-arming is therefore the cancellation mechanism: older
//! generations simply go stale.

use std::time::Duration;

/// Documents up to `max_chars` characters wait `delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTier {
    pub max_chars: usize,
    pub delay: Duration,
}

/// Maps document length to a debounce delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncePolicy {
    /// Sorted by `max_chars`
    tiers: Vec<DebounceTier>,
    fallback: Duration,
}

impl DebouncePolicy {
    pub fn new(mut tiers: Vec<DebounceTier>, fallback: Duration) -> Self {
        tiers.sort_by_key(|t| t.max_chars);
        Self { tiers, fallback }
    }

    pub fn tiers(&self) -> &[DebounceTier] {
        &self.tiers
    }

    pub fn fallback(&self) -> Duration {
        self.fallback
    }

    /// Delay for a document of `chars` characters
    pub fn delay_for(&self, chars: usize) -> Duration {
        self.tiers
            .iter()
            .find(|t| chars <= t.max_chars)
            .map(|t| t.delay)
            .unwrap_or(self.fallback)
    }
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self::new(
            vec![
                DebounceTier {
                    max_chars: 1_000,
                    delay: Duration::from_millis(400),
                },
                DebounceTier {
                    max_chars: 5_000,
                    delay: Duration::from_millis(800),
                },
                DebounceTier {
                    max_chars: 10_000,
                    delay: Duration::from_millis(1_500),
                },
            ],
            Duration::from_millis(2_000),
        )
    }
}

/// An armed timer waiting to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPass {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimerState {
    #[default]
    Idle,
    Armed(PendingPass),
}

/// Single-shot, re-triggerable debounce timer state.
///
/// At most one pass is armed at a time.
#[derive(Debug, Default)]
pub struct DebounceScheduler {
    policy: DebouncePolicy,
    state: TimerState,
    generation: u64,
    last_delay: Option<Duration>,
    /// Text of the last completed pass
    last_highlighted: Option<String>,
}

impl DebounceScheduler {
    pub fn new(policy: DebouncePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &DebouncePolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: DebouncePolicy) {
        self.policy = policy;
    }

    /// Handle a text-change notification.
    ///
    /// Returns the pass to schedule, or `None` when `text` is identical to
    /// what the last pass highlighted. Any previously armed pass is replaced.
    pub fn notify_changed(&mut self, text: &str) -> Option<PendingPass> {
        if self.last_highlighted.as_deref() == Some(text) {
            tracing::trace!("Text unchanged since last pass, not re-arming");
            return None;
        }

        let delay = self.policy.delay_for(text.chars().count());
        self.generation = self.generation.wrapping_add(1);
        let pending = PendingPass {
            generation: self.generation,
            delay,
        };

        if let TimerState::Armed(prev) = self.state {
            tracing::trace!(
                "Re-arming debounce: generation {} replaces {}",
                pending.generation,
                prev.generation
            );
        }

        self.state = TimerState::Armed(pending);
        self.last_delay = Some(delay);
        Some(pending)
    }

    /// Timer callback. True only for the currently armed generation, which
    /// also disarms the scheduler.
    pub fn fire(&mut self, generation: u64) -> bool {
        match self.state {
            TimerState::Armed(pending) if pending.generation == generation => {
                self.state = TimerState::Idle;
                true
            }
            _ => {
                tracing::trace!("Ignoring stale debounce generation {}", generation);
                false
            }
        }
    }

    /// Disarm without firing
    pub fn cancel(&mut self) {
        self.state = TimerState::Idle;
    }

    /// Remember the text a completed pass ran over
    pub fn record_highlighted(&mut self, text: String) {
        self.last_highlighted = Some(text);
    }

    /// Drop the remembered text so the next change always schedules
    pub fn forget_highlighted(&mut self) {
        self.last_highlighted = None;
    }

    pub fn last_highlighted(&self) -> Option<&str> {
        self.last_highlighted.as_deref()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed(_))
    }

    /// Delay chosen by the most recent arm
    pub fn last_delay(&self) -> Option<Duration> {
        self.last_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let policy = DebouncePolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(400));
        assert_eq!(policy.delay_for(1_000), Duration::from_millis(400));
        assert_eq!(policy.delay_for(1_001), Duration::from_millis(800));
        assert_eq!(policy.delay_for(10_000), Duration::from_millis(1_500));
        assert_eq!(policy.delay_for(10_001), Duration::from_millis(2_000));
    }

    #[test]
    fn test_policy_sorts_tiers() {
        let policy = DebouncePolicy::new(
            vec![
                DebounceTier {
                    max_chars: 100,
                    delay: Duration::from_millis(50),
                },
                DebounceTier {
                    max_chars: 10,
                    delay: Duration::from_millis(5),
                },
            ],
            Duration::from_millis(99),
        );
        assert_eq!(policy.tiers()[0].max_chars, 10);
        assert_eq!(policy.delay_for(7), Duration::from_millis(5));
        assert_eq!(policy.delay_for(1_000), Duration::from_millis(99));
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let mut scheduler = DebounceScheduler::default();
        let first = scheduler.notify_changed("a").unwrap();
        let second = scheduler.notify_changed("ab").unwrap();

        assert_ne!(first.generation, second.generation);
        assert_eq!(scheduler.state(), TimerState::Armed(second));
        assert!(!scheduler.fire(first.generation));
        assert!(scheduler.is_armed());
        assert!(scheduler.fire(second.generation));
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn test_fire_twice_only_accepts_once() {
        let mut scheduler = DebounceScheduler::default();
        let pending = scheduler.notify_changed("x").unwrap();
        assert!(scheduler.fire(pending.generation));
        assert!(!scheduler.fire(pending.generation));
    }

    #[test]
    fn test_cancel_makes_pending_stale() {
        let mut scheduler = DebounceScheduler::default();
        let pending = scheduler.notify_changed("x").unwrap();
        scheduler.cancel();
        assert_eq!(scheduler.state(), TimerState::Idle);
        assert!(!scheduler.fire(pending.generation));
    }

    #[test]
    fn test_identical_text_is_not_rescheduled() {
        let mut scheduler = DebounceScheduler::default();
        scheduler.record_highlighted("# done".to_string());
        assert!(scheduler.notify_changed("# done").is_none());
        assert!(!scheduler.is_armed());

        scheduler.forget_highlighted();
        assert!(scheduler.notify_changed("# done").is_some());
    }

    #[test]
    fn test_delay_uses_character_count() {
        let mut scheduler = DebounceScheduler::default();
        // 1000 chars but 2000 bytes
        let text = "é".repeat(1_000);
        let pending = scheduler.notify_changed(&text).unwrap();
        assert_eq!(pending.delay, Duration::from_millis(400));
        assert_eq!(scheduler.last_delay(), Some(Duration::from_millis(400)));
    }
}
