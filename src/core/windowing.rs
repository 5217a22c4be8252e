use crate::core::dataset::{ChartData, ChartDefinition, HeatmapPoint};
use crate::core::types::TimeWindow;

/// Returns the inclusive `[start, end]` sub-slice of an index-aligned sequence.
///
/// An `end` past the sequence is truncated; a `start` past it yields an empty slice.
#[must_use]
pub fn window_slice<T>(values: &[T], window: TimeWindow) -> &[T] {
    if window.start() >= values.len() {
        return &[];
    }
    let end = window.end().min(values.len() - 1);
    &values[window.start()..=end]
}

/// Keeps heatmap cells inside the window and re-indexes time to start at zero.
#[must_use]
pub fn heatmap_points_in_window(points: &[HeatmapPoint], window: TimeWindow) -> Vec<HeatmapPoint> {
    points
        .iter()
        .filter(|point| window.contains(point.time_index))
        .map(|point| {
            HeatmapPoint::new(
                point.time_index - window.start(),
                point.column_index,
                point.value,
            )
        })
        .collect()
}

/// Windowed view of a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSlice<'a> {
    pub labels: &'a [String],
    pub series: Vec<(&'a str, &'a [f64])>,
}

impl LineSlice<'_> {
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.labels.len()
    }
}

/// Windowed view of a heatmap chart, time indices relative to the window start.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSlice<'a> {
    pub labels: &'a [String],
    pub columns: &'a [String],
    pub points: Vec<HeatmapPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowedSlice<'a> {
    Line(LineSlice<'a>),
    Heatmap(HeatmapSlice<'a>),
}

/// Slices one chart's data (and the shared labels) to `window`.
#[must_use]
pub fn filter_chart<'a>(
    chart: &'a ChartDefinition,
    time_labels: &'a [String],
    window: TimeWindow,
) -> WindowedSlice<'a> {
    let labels = window_slice(time_labels, window);
    match &chart.data {
        ChartData::Line { series } => WindowedSlice::Line(LineSlice {
            labels,
            series: series
                .iter()
                .map(|(name, values)| (name.as_str(), window_slice(values.as_slice(), window)))
                .collect(),
        }),
        ChartData::Heatmap { columns, points } => WindowedSlice::Heatmap(HeatmapSlice {
            labels,
            columns,
            points: heatmap_points_in_window(points, window),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{heatmap_points_in_window, window_slice};
    use crate::core::{HeatmapPoint, TimeWindow};

    #[test]
    fn window_slice_truncates_past_end() {
        let values = [0, 1, 2, 3];
        let window = TimeWindow::new(2, 10).expect("window");
        assert_eq!(window_slice(&values, window), &[2, 3]);
    }

    #[test]
    fn window_slice_is_empty_past_start() {
        let values = [0, 1, 2, 3];
        let window = TimeWindow::new(4, 6).expect("window");
        assert!(window_slice(&values, window).is_empty());
    }

    #[test]
    fn heatmap_filter_drops_outside_and_rebases() {
        let points = vec![
            HeatmapPoint::new(0, 0, 1.0),
            HeatmapPoint::new(5, 1, 2.0),
            HeatmapPoint::new(7, 0, 3.0),
            HeatmapPoint::new(8, 2, 4.0),
        ];
        let window = TimeWindow::new(5, 7).expect("window");
        let filtered = heatmap_points_in_window(&points, window);
        assert_eq!(
            filtered,
            vec![HeatmapPoint::new(0, 1, 2.0), HeatmapPoint::new(2, 0, 3.0)]
        );
    }
}
