use crate::core::{
    ChartDefinition, HeatmapPoint, HeatmapSlice, LineSlice, TimeWindow, ValueBounds,
    WindowedSlice,
};

use super::palette::line_color;
use super::spec::{
    AxisKind, AxisPointerSpec, AxisSpec, ChartSpec, DataZoomSpec, DataZoomToolSpec,
    DataZoomToolTitles, GridSpec, InRangeSpec, LegendSpec, LineStyleSpec, SaveAsImageSpec,
    SeriesData, SeriesKind, SeriesSpec, ShowFlag, TitleSpec, ToolboxFeatures, ToolboxSpec,
    TooltipSpec, TooltipTrigger, VisualMapSpec,
};

/// Heatmap color-mapping range: user override, else per-bound config default,
/// else the chart's precomputed statistics.
#[must_use]
pub fn heatmap_value_range(chart: &ChartDefinition, user: Option<ValueBounds>) -> ValueBounds {
    user.unwrap_or(ValueBounds {
        min: chart.config.default_min.unwrap_or(chart.stats.min),
        max: chart.config.default_max.unwrap_or(chart.stats.max),
    })
}

/// Line value-axis bounds; `None` leaves the axis auto-scaled.
#[must_use]
pub fn line_value_range(
    chart: &ChartDefinition,
    user: Option<ValueBounds>,
) -> (Option<f64>, Option<f64>) {
    match user {
        Some(bounds) => (Some(bounds.min), Some(bounds.max)),
        None => (chart.config.default_min, chart.config.default_max),
    }
}

/// Builds the declarative option object for one chart's windowed slice.
#[must_use]
pub fn build_chart_spec(
    chart: &ChartDefinition,
    slice: &WindowedSlice<'_>,
    user_bounds: Option<ValueBounds>,
) -> ChartSpec {
    match slice {
        WindowedSlice::Line(line) => build_line_spec(chart, line, user_bounds),
        WindowedSlice::Heatmap(heatmap) => build_heatmap_spec(chart, heatmap, user_bounds),
    }
}

fn build_heatmap_spec(
    chart: &ChartDefinition,
    slice: &HeatmapSlice<'_>,
    user_bounds: Option<ValueBounds>,
) -> ChartSpec {
    let config = &chart.config;
    let range = heatmap_value_range(chart, user_bounds);

    ChartSpec {
        title: TitleSpec {
            text: config.title.clone(),
            subtext: format!(
                "{} ({} columns, showing {} time points)",
                config.description,
                slice.columns.len(),
                slice.labels.len()
            ),
            left: "center",
        },
        tooltip: TooltipSpec {
            trigger: TooltipTrigger::Item,
            position: Some("top"),
            axis_pointer: None,
        },
        legend: None,
        grid: GridSpec {
            top: "15%",
            left: "10%",
            right: "10%",
            bottom: None,
            height: Some("60%"),
            contain_label: None,
        },
        x_axis: AxisSpec {
            kind: AxisKind::Category,
            data: Some(slice.labels.to_vec()),
            name: "Time".to_owned(),
            name_location: "middle",
            name_gap: 30,
            boundary_gap: None,
            split_area: Some(ShowFlag { show: true }),
            min: None,
            max: None,
        },
        y_axis: AxisSpec {
            kind: AxisKind::Category,
            data: Some(slice.columns.to_vec()),
            name: format!("Variables ({})", config.units),
            name_location: "middle",
            name_gap: 80,
            boundary_gap: None,
            split_area: Some(ShowFlag { show: true }),
            min: None,
            max: None,
        },
        visual_map: Some(VisualMapSpec {
            min: range.min,
            max: range.max,
            calculable: true,
            orient: "horizontal",
            left: "center",
            bottom: "2%",
            in_range: InRangeSpec {
                color: config.colour_scale.stops().to_vec(),
            },
        }),
        series: vec![SeriesSpec {
            name: config.title.clone(),
            kind: SeriesKind::Heatmap,
            data: SeriesData::Cells(slice.points.clone()),
            smooth: None,
            symbol: None,
            color: None,
            line_style: None,
            label: Some(ShowFlag { show: false }),
        }],
        toolbox: ToolboxSpec {
            show: true,
            feature: ToolboxFeatures {
                save_as_image: SaveAsImageSpec {
                    title: "Save as Image",
                    name: format!("{}_heatmap", config.title),
                },
                data_zoom: None,
            },
        },
        data_zoom: Vec::new(),
    }
}

fn build_line_spec(
    chart: &ChartDefinition,
    slice: &LineSlice<'_>,
    user_bounds: Option<ValueBounds>,
) -> ChartSpec {
    let config = &chart.config;
    let (y_min, y_max) = line_value_range(chart, user_bounds);

    let series = slice
        .series
        .iter()
        .enumerate()
        .map(|(index, (name, values))| SeriesSpec {
            name: (*name).to_owned(),
            kind: SeriesKind::Line,
            data: SeriesData::Values(values.to_vec()),
            smooth: Some(true),
            symbol: Some("none"),
            color: Some(line_color(index)),
            line_style: Some(LineStyleSpec { width: 2.0 }),
            label: None,
        })
        .collect();

    ChartSpec {
        title: TitleSpec {
            text: config.title.clone(),
            subtext: format!(
                "{} ({} series, {} points)",
                config.description,
                slice.series.len(),
                slice.point_count()
            ),
            left: "center",
        },
        tooltip: TooltipSpec {
            trigger: TooltipTrigger::Axis,
            position: None,
            axis_pointer: Some(AxisPointerSpec { kind: "cross" }),
        },
        legend: Some(LegendSpec {
            top: "12%",
            kind: "scroll",
        }),
        grid: GridSpec {
            top: "25%",
            left: "8%",
            right: "8%",
            bottom: Some("15%"),
            height: None,
            contain_label: Some(true),
        },
        x_axis: AxisSpec {
            kind: AxisKind::Category,
            data: Some(slice.labels.to_vec()),
            name: "Time".to_owned(),
            name_location: "middle",
            name_gap: 30,
            boundary_gap: Some(false),
            split_area: None,
            min: None,
            max: None,
        },
        y_axis: AxisSpec {
            kind: AxisKind::Value,
            data: None,
            name: format!("Value ({})", config.units),
            name_location: "middle",
            name_gap: 50,
            boundary_gap: None,
            split_area: None,
            min: y_min,
            max: y_max,
        },
        visual_map: None,
        series,
        toolbox: ToolboxSpec {
            show: true,
            feature: ToolboxFeatures {
                save_as_image: SaveAsImageSpec {
                    title: "Save as Image",
                    name: format!("{}_line", config.title),
                },
                data_zoom: Some(DataZoomToolSpec {
                    title: DataZoomToolTitles {
                        zoom: "Zoom",
                        back: "Reset Zoom",
                    },
                }),
            },
        },
        data_zoom: vec![
            DataZoomSpec {
                kind: Some("inside"),
                start: 0.0,
                end: 100.0,
                height: None,
            },
            DataZoomSpec {
                kind: None,
                start: 0.0,
                end: 100.0,
                height: Some(30),
            },
        ],
    }
}

/// Tooltip text for a rendered heatmap cell.
///
/// `point.time_index` is window-relative; the label lookup adds `window.start()` back.
/// Indices past the labels or columns fall back to `Time {idx}` / `Col {idx}`.
#[must_use]
pub fn heatmap_tooltip(
    time_labels: &[String],
    columns: &[String],
    window: TimeWindow,
    point: HeatmapPoint,
) -> String {
    let time = match window.start().checked_add(point.time_index) {
        Some(index) => time_labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Time {index}")),
        None => format!("Time {}+{}", window.start(), point.time_index),
    };
    let column = columns
        .get(point.column_index)
        .cloned()
        .unwrap_or_else(|| format!("Col {}", point.column_index));
    format!(
        "Time: {time}<br/>Variable: {column}<br/>Value: {:.3}",
        point.value
    )
}
