use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{TimeWindow, ValueBounds};
use crate::error::{DashError, DashResult};
use crate::render::ChartSurface;

use super::config::BusyPolicy;
use super::range_controller::RangeControllerStats;
use super::range_display::RangeDisplay;
use super::session::DashboardSession;

pub const SESSION_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of a session's window state, for debugging and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub schema_version: u32,
    pub total_points: usize,
    pub busy_policy: BusyPolicy,
    pub current_window: Option<TimeWindow>,
    pub last_applied_window: Option<TimeWindow>,
    pub render_in_flight: bool,
    pub display: Option<RangeDisplay>,
    pub render_passes: u64,
    pub controller_stats: RangeControllerStats,
    pub mounted_charts: Vec<String>,
    pub value_overrides: IndexMap<String, ValueBounds>,
    pub diagnostics: usize,
}

impl SessionSnapshot {
    pub fn to_json_pretty(&self) -> DashResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashError::InvalidData(format!("failed to serialize session snapshot: {e}")))
    }

    pub fn from_json_str(input: &str) -> DashResult<Self> {
        let snapshot: Self = serde_json::from_str(input)
            .map_err(|e| DashError::InvalidData(format!("failed to parse session snapshot: {e}")))?;
        if snapshot.schema_version != SESSION_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(DashError::InvalidData(format!(
                "unsupported session snapshot schema version: {}",
                snapshot.schema_version
            )));
        }
        Ok(snapshot)
    }
}

impl<S: ChartSurface> DashboardSession<S> {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let controller = self.controller();
        SessionSnapshot {
            schema_version: SESSION_SNAPSHOT_JSON_SCHEMA_V1,
            total_points: controller.total_points(),
            busy_policy: controller.policy(),
            current_window: controller.current_window(),
            last_applied_window: controller.last_applied_window(),
            render_in_flight: controller.is_render_in_flight(),
            display: self.display().cloned(),
            render_passes: self.render_passes(),
            controller_stats: controller.stats(),
            mounted_charts: self.mounted_chart_ids().map(str::to_owned).collect(),
            value_overrides: self.value_overrides().clone(),
            diagnostics: self.diagnostics().len(),
        }
    }
}
