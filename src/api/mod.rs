mod config;
mod debounce;
mod diagnostics;
mod range_controller;
mod range_display;
mod range_widget;
mod session;
mod snapshot;
mod value_range;

pub use config::{BusyPolicy, DashboardConfig};
pub use debounce::TrailingDebouncer;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use range_controller::{RangeController, RangeControllerStats, RangeDecision};
pub use range_display::{RangeDisplay, slider_tooltip};
pub use range_widget::{FallbackRangeInputs, RangeSelector, RangeWidget};
pub use session::{DashboardSession, RangeEvent};
pub use snapshot::{SESSION_SNAPSHOT_JSON_SCHEMA_V1, SessionSnapshot};
pub use value_range::{ValueRangeControl, format_bound, parse_value_bounds};
