use indexmap::IndexMap;
use particle_dash::core::{
    ChartConfig, ChartDefinition, HeatmapPoint, TimeWindow, WindowedSlice, filter_chart,
};

fn labels(total: usize) -> Vec<String> {
    (0..total).map(|i| format!("t{i:03}")).collect()
}

#[test]
fn line_filter_slices_labels_and_every_series_inclusively() {
    let labels = labels(10);
    let mut series = IndexMap::new();
    series.insert("a".to_owned(), (0..10).map(f64::from).collect::<Vec<_>>());
    series.insert("b".to_owned(), (0..10).map(|i| f64::from(i) * 10.0).collect());
    let chart = ChartDefinition::line(ChartConfig::new("line"), series);

    let window = TimeWindow::new(3, 6).expect("window");
    let WindowedSlice::Line(slice) = filter_chart(&chart, &labels, window) else {
        panic!("expected line slice");
    };

    assert_eq!(slice.labels, &labels[3..=6]);
    assert_eq!(slice.point_count(), 4);
    assert_eq!(slice.series.len(), 2);
    assert_eq!(slice.series[0], ("a", &[3.0, 4.0, 5.0, 6.0][..]));
    assert_eq!(slice.series[1].1, &[30.0, 40.0, 50.0, 60.0]);
}

#[test]
fn heatmap_filter_rebases_time_and_keeps_columns() {
    let labels = labels(6);
    let columns = vec!["bin_1".to_owned(), "bin_2".to_owned()];
    let points: Vec<HeatmapPoint> = (0..6)
        .flat_map(|t| (0..2).map(move |c| HeatmapPoint::new(t, c, (t * 10 + c) as f64)))
        .collect();
    let chart = ChartDefinition::heatmap(ChartConfig::new("heat"), columns.clone(), points);

    let window = TimeWindow::new(4, 5).expect("window");
    let WindowedSlice::Heatmap(slice) = filter_chart(&chart, &labels, window) else {
        panic!("expected heatmap slice");
    };

    assert_eq!(slice.columns, columns.as_slice());
    assert_eq!(slice.labels, &labels[4..=5]);
    assert_eq!(
        slice.points,
        vec![
            HeatmapPoint::new(0, 0, 40.0),
            HeatmapPoint::new(0, 1, 41.0),
            HeatmapPoint::new(1, 0, 50.0),
            HeatmapPoint::new(1, 1, 51.0),
        ]
    );
}

#[test]
fn window_outside_data_produces_empty_slice() {
    let labels = labels(3);
    let mut series = IndexMap::new();
    series.insert("a".to_owned(), vec![1.0, 2.0, 3.0]);
    let chart = ChartDefinition::line(ChartConfig::new("line"), series);

    let window = TimeWindow::new(7, 9).expect("window");
    let WindowedSlice::Line(slice) = filter_chart(&chart, &labels, window) else {
        panic!("expected line slice");
    };
    assert!(slice.labels.is_empty());
    assert!(slice.series[0].1.is_empty());
}
