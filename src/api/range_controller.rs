use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::TimeWindow;

use super::config::BusyPolicy;

/// Outcome of one range-selection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeDecision {
    /// Empty dataset or `start > end` after clamping; nothing changed.
    Rejected,
    /// Continuous drag: the display follows, charts do not.
    DisplayOnly(TimeWindow),
    /// The window is already drawn (or about to be); no chart work.
    Unchanged(TimeWindow),
    /// A pass was in flight and the policy discards late requests.
    Dropped(TimeWindow),
    /// A pass was in flight; the window waits in the single pending slot.
    Coalesced(TimeWindow),
    /// The caller must render this window, then call `finish_render`.
    Render(TimeWindow),
}

impl RangeDecision {
    /// Window now shown by the range display, if the event was accepted.
    #[must_use]
    pub fn window(self) -> Option<TimeWindow> {
        match self {
            Self::Rejected => None,
            Self::DisplayOnly(window)
            | Self::Unchanged(window)
            | Self::Dropped(window)
            | Self::Coalesced(window)
            | Self::Render(window) => Some(window),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeControllerStats {
    pub display_updates: u64,
    pub renders_started: u64,
    pub renders_finished: u64,
    pub deduplicated: u64,
    pub dropped: u64,
    pub coalesced: u64,
    pub rejected: u64,
}

/// Single owner of the shared time window.
///
/// Drag events only move `current_window`; commit events additionally ask for
/// a render pass, which is skipped when it would redraw what is already shown
/// and guarded so that two passes never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeController {
    total_points: usize,
    policy: BusyPolicy,
    current: Option<TimeWindow>,
    last_applied: Option<TimeWindow>,
    in_flight: Option<TimeWindow>,
    pending: Option<TimeWindow>,
    stats: RangeControllerStats,
}

impl RangeController {
    #[must_use]
    pub fn new(total_points: usize, default_window_points: usize, policy: BusyPolicy) -> Self {
        Self {
            total_points,
            policy,
            current: TimeWindow::leading(default_window_points, total_points),
            last_applied: None,
            in_flight: None,
            pending: None,
            stats: RangeControllerStats::default(),
        }
    }

    #[must_use]
    pub fn total_points(&self) -> usize {
        self.total_points
    }

    #[must_use]
    pub fn policy(&self) -> BusyPolicy {
        self.policy
    }

    #[must_use]
    pub fn current_window(&self) -> Option<TimeWindow> {
        self.current
    }

    #[must_use]
    pub fn last_applied_window(&self) -> Option<TimeWindow> {
        self.last_applied
    }

    #[must_use]
    pub fn pending_window(&self) -> Option<TimeWindow> {
        self.pending
    }

    #[must_use]
    pub fn is_render_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn stats(&self) -> RangeControllerStats {
        self.stats
    }

    #[must_use]
    pub fn full_window(&self) -> Option<TimeWindow> {
        TimeWindow::full(self.total_points)
    }

    /// In-progress drag notification: updates the displayed window only.
    pub fn drag(&mut self, start: i64, end: i64) -> RangeDecision {
        let Some(window) = self.accept(start, end) else {
            return RangeDecision::Rejected;
        };
        trace!(start = window.start(), end = window.end(), "drag window");
        RangeDecision::DisplayOnly(window)
    }

    /// Drag-finished or discrete-step notification: updates the display and
    /// requests a render pass.
    pub fn request_window(&mut self, start: i64, end: i64) -> RangeDecision {
        let Some(window) = self.accept(start, end) else {
            return RangeDecision::Rejected;
        };
        self.schedule(window)
    }

    /// Requests the window currently shown by the display, e.g. right after load.
    pub fn request_current(&mut self) -> RangeDecision {
        match self.current {
            Some(window) => self.schedule(window),
            None => {
                self.stats.rejected += 1;
                RangeDecision::Rejected
            }
        }
    }

    /// Marks the in-flight pass complete.
    ///
    /// Returns the coalesced window that must be rendered next, already marked
    /// in flight, or `None` when the controller is idle again.
    pub fn finish_render(&mut self) -> Option<TimeWindow> {
        let done = self.in_flight.take()?;
        self.last_applied = Some(done);
        self.stats.renders_finished += 1;
        debug!(start = done.start(), end = done.end(), "render pass finished");

        let next = self.pending.take()?;
        if Some(next) == self.last_applied {
            self.stats.deduplicated += 1;
            return None;
        }
        self.begin_render(next);
        Some(next)
    }

    fn accept(&mut self, start: i64, end: i64) -> Option<TimeWindow> {
        match TimeWindow::clamped(start, end, self.total_points) {
            Some(window) => {
                self.current = Some(window);
                self.stats.display_updates += 1;
                Some(window)
            }
            None => {
                self.stats.rejected += 1;
                debug!(start, end, total_points = self.total_points, "rejected window request");
                None
            }
        }
    }

    fn schedule(&mut self, window: TimeWindow) -> RangeDecision {
        let target = self.pending.or(self.in_flight).or(self.last_applied);
        if target == Some(window) {
            self.stats.deduplicated += 1;
            trace!(start = window.start(), end = window.end(), "window already applied");
            return RangeDecision::Unchanged(window);
        }

        if self.in_flight.is_some() {
            return match self.policy {
                BusyPolicy::Drop => {
                    self.stats.dropped += 1;
                    debug!(
                        start = window.start(),
                        end = window.end(),
                        "render in flight, dropping request"
                    );
                    RangeDecision::Dropped(window)
                }
                BusyPolicy::CoalesceLatest => {
                    self.pending = Some(window);
                    self.stats.coalesced += 1;
                    debug!(
                        start = window.start(),
                        end = window.end(),
                        "render in flight, request queued"
                    );
                    RangeDecision::Coalesced(window)
                }
            };
        }

        self.begin_render(window);
        RangeDecision::Render(window)
    }

    fn begin_render(&mut self, window: TimeWindow) {
        self.in_flight = Some(window);
        self.stats.renders_started += 1;
        debug!(start = window.start(), end = window.end(), "render pass started");
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeController, RangeDecision};
    use crate::api::BusyPolicy;
    use crate::core::TimeWindow;

    fn window(start: usize, end: usize) -> TimeWindow {
        TimeWindow::new(start, end).expect("window")
    }

    #[test]
    fn finish_render_records_last_applied() {
        let mut controller = RangeController::new(50, 10, BusyPolicy::CoalesceLatest);
        assert_eq!(controller.request_current(), RangeDecision::Render(window(0, 9)));
        assert!(controller.is_render_in_flight());
        assert_eq!(controller.finish_render(), None);
        assert_eq!(controller.last_applied_window(), Some(window(0, 9)));
        assert!(!controller.is_render_in_flight());
    }

    #[test]
    fn coalesced_request_equal_to_finished_pass_is_skipped() {
        let mut controller = RangeController::new(50, 10, BusyPolicy::CoalesceLatest);
        controller.request_window(0, 5);
        assert_eq!(
            controller.request_window(1, 5),
            RangeDecision::Coalesced(window(1, 5))
        );
        assert_eq!(
            controller.request_window(0, 5),
            RangeDecision::Coalesced(window(0, 5))
        );
        assert_eq!(controller.finish_render(), None);
        assert_eq!(controller.stats().deduplicated, 1);
    }

    #[test]
    fn finish_without_pass_is_noop() {
        let mut controller = RangeController::new(50, 10, BusyPolicy::Drop);
        assert_eq!(controller.finish_render(), None);
        assert_eq!(controller.last_applied_window(), None);
    }
}
