pub mod dataset;
pub mod stats;
pub mod types;
pub mod windowing;

pub use dataset::{ChartConfig, ChartData, ChartDefinition, Dataset, HeatmapPoint};
pub use stats::ValueStats;
pub use types::{ChartKind, ColorScale, TimeWindow, ValueBounds};
pub use windowing::{
    HeatmapSlice, LineSlice, WindowedSlice, filter_chart, heatmap_points_in_window, window_slice,
};
