use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// Inclusive `[start, end]` index range over a dataset's time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct TimeWindow {
    start: usize,
    end: usize,
}

impl TimeWindow {
    pub fn new(start: usize, end: usize) -> DashResult<Self> {
        if start > end {
            return Err(DashError::InvalidWindow {
                start: start as i64,
                end: end as i64,
            });
        }
        Ok(Self { start, end })
    }

    /// Clamps raw bounds into `[0, total_points - 1]`.
    ///
    /// Returns `None` for an empty dataset or when `start > end` after clamping.
    #[must_use]
    pub fn clamped(start: i64, end: i64, total_points: usize) -> Option<Self> {
        let last = i64::try_from(total_points).ok()?.checked_sub(1)?;
        if last < 0 {
            return None;
        }
        let start = start.clamp(0, last);
        let end = end.clamp(0, last);
        if start > end {
            return None;
        }
        Some(Self {
            start: start as usize,
            end: end as usize,
        })
    }

    /// First `min(points, total_points)` indices, the window shown after load.
    #[must_use]
    pub fn leading(points: usize, total_points: usize) -> Option<Self> {
        let len = points.min(total_points);
        if len == 0 {
            return None;
        }
        Some(Self {
            start: 0,
            end: len - 1,
        })
    }

    #[must_use]
    pub fn full(total_points: usize) -> Option<Self> {
        Self::leading(total_points, total_points)
    }

    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Number of indices covered; never zero.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

impl TryFrom<(usize, usize)> for TimeWindow {
    type Error = DashError;

    fn try_from((start, end): (usize, usize)) -> DashResult<Self> {
        Self::new(start, end)
    }
}

impl From<TimeWindow> for (usize, usize) {
    fn from(window: TimeWindow) -> Self {
        (window.start, window.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Heatmap,
}

/// Heatmap palette selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ColorScale {
    /// Perceptual dark-violet to pale-yellow ramp.
    #[serde(rename = "grafana_style", alias = "scientific")]
    Scientific,
    /// Blue-to-red diverging ramp.
    #[default]
    #[serde(rename = "standard", alias = "diverging")]
    Diverging,
}

/// Explicit min/max pair applied to a chart's value axis or color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBounds {
    pub min: f64,
    pub max: f64,
}

impl ValueBounds {
    pub fn new(min: f64, max: f64) -> DashResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DashError::InvalidValueRange(
                "bounds must be finite numbers".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::TimeWindow;

    #[test]
    fn clamped_pulls_bounds_into_dataset() {
        let window = TimeWindow::clamped(-5, 10_000, 200).expect("window");
        assert_eq!((window.start(), window.end()), (0, 199));
    }

    #[test]
    fn clamped_rejects_inverted_and_empty() {
        assert!(TimeWindow::clamped(50, 10, 200).is_none());
        assert!(TimeWindow::clamped(0, 0, 0).is_none());
    }

    #[test]
    fn leading_window_caps_at_dataset_length() {
        assert_eq!(
            TimeWindow::leading(100, 40),
            Some(TimeWindow::new(0, 39).expect("window"))
        );
        assert_eq!(TimeWindow::leading(100, 200).map(TimeWindow::len), Some(100));
    }

    #[test]
    fn deserialize_rejects_inverted_pair() {
        let parsed: Result<TimeWindow, _> = serde_json::from_str("[9, 3]");
        assert!(parsed.is_err());
    }
}
