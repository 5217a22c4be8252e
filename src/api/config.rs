use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// What the range controller does with a commit that arrives mid-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BusyPolicy {
    /// Discard the request; the user's final position may never render.
    Drop,
    /// Keep only the most recent request and render it once the pass finishes.
    #[default]
    CoalesceLatest,
}

/// Session bootstrap configuration.
///
/// Serializable so hosts can ship it next to the dataset payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Length of the window selected right after load.
    pub default_window_points: usize,
    /// Quiet period before a burst of resize events triggers one canvas resize.
    pub resize_debounce_ms: u64,
    pub busy_policy: BusyPolicy,
    /// Characters kept from a time label in the from/to range display.
    pub range_label_chars: usize,
    /// Characters kept from a time label in slider handle tooltips.
    pub slider_label_chars: usize,
    /// Characters kept from a chart title in its value-range control.
    pub control_title_chars: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_window_points: 100,
            resize_debounce_ms: 100,
            busy_policy: BusyPolicy::default(),
            range_label_chars: 16,
            slider_label_chars: 10,
            control_title_chars: 25,
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_busy_policy(mut self, busy_policy: BusyPolicy) -> Self {
        self.busy_policy = busy_policy;
        self
    }

    #[must_use]
    pub fn with_default_window_points(mut self, points: usize) -> Self {
        self.default_window_points = points;
        self
    }

    #[must_use]
    pub fn with_resize_debounce_ms(mut self, millis: u64) -> Self {
        self.resize_debounce_ms = millis;
        self
    }

    #[must_use]
    pub fn resize_debounce(self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn validate(self) -> DashResult<()> {
        if self.default_window_points == 0 {
            return Err(DashError::InvalidData(
                "default_window_points must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("range_label_chars", self.range_label_chars),
            ("slider_label_chars", self.slider_label_chars),
            ("control_title_chars", self.control_title_chars),
        ] {
            if value == 0 {
                return Err(DashError::InvalidData(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> DashResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashError::InvalidData(format!("failed to parse dashboard config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(self) -> DashResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| DashError::InvalidData(format!("failed to serialize dashboard config: {e}")))
    }
}
