use std::time::{Duration, Instant};

/// Trailing-edge debouncer: fires once after `quiet` has elapsed since the
/// last trigger.
///
/// Time is passed in by the caller so the host event loop (or a test) owns
/// the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingDebouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl TrailingDebouncer {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Records an event, pushing the deadline out.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once per burst, when the quiet period has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
