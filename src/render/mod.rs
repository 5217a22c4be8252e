mod chart_spec_builder;
mod palette;
mod spec;
mod surface;

pub use chart_spec_builder::{
    build_chart_spec, heatmap_tooltip, heatmap_value_range, line_value_range,
};
pub use palette::{LINE_PALETTE, line_color};
pub use spec::{
    AxisKind, AxisPointerSpec, AxisSpec, ChartSpec, DataZoomSpec, DataZoomToolSpec,
    DataZoomToolTitles, GridSpec, InRangeSpec, LegendSpec, LineStyleSpec, SaveAsImageSpec,
    SeriesData, SeriesKind, SeriesSpec, ShowFlag, TitleSpec, ToolboxFeatures, ToolboxSpec,
    TooltipSpec, TooltipTrigger, VisualMapSpec,
};
pub use surface::{ChartHost, ChartSurface, RecordingHost, RecordingSurface};
