//! particle-dash: time-window synchronized dashboards for particle measurements.
//!
//! A loaded [`core::Dataset`] holds shared time labels plus line and heatmap
//! charts. A [`api::DashboardSession`] owns the single selected time window,
//! slices every chart to it and hands declarative option objects to an
//! external charting engine through [`render::ChartHost`].

pub mod api;
pub mod core;
pub mod error;
pub mod ingest;
pub mod render;
pub mod telemetry;

pub use api::{DashboardConfig, DashboardSession};
pub use error::{DashError, DashResult};
