use approx::assert_relative_eq;
use indexmap::IndexMap;
use particle_dash::core::{
    ChartConfig, ChartDefinition, ColorScale, HeatmapPoint, TimeWindow, ValueBounds, ValueStats,
    filter_chart,
};
use particle_dash::render::{
    LINE_PALETTE, SeriesKind, build_chart_spec, heatmap_tooltip, heatmap_value_range, line_color,
};

fn labels(total: usize) -> Vec<String> {
    (0..total).map(|i| format!("T{i}")).collect()
}

fn heatmap(config: ChartConfig) -> ChartDefinition {
    let points = (0..4)
        .flat_map(|t| (0..2).map(move |c| HeatmapPoint::new(t, c, (t * 2 + c) as f64)))
        .collect();
    ChartDefinition::heatmap(config, vec!["a".to_owned(), "b".to_owned()], points)
}

#[test]
fn heatmap_range_prefers_override_then_config_then_stats() {
    let chart = heatmap(ChartConfig::new("h").with_default_bounds(Some(1.0), None));

    let from_config = heatmap_value_range(&chart, None);
    assert_relative_eq!(from_config.min, 1.0);
    assert_relative_eq!(from_config.max, 7.0);

    let user = ValueBounds::new(-2.0, 3.0).expect("bounds");
    let from_user = heatmap_value_range(&chart, Some(user));
    assert_relative_eq!(from_user.min, -2.0);
    assert_relative_eq!(from_user.max, 3.0);

    let stats = ValueStats::from_values([10.0, 20.0]);
    let plain = heatmap(ChartConfig::new("h")).with_stats(stats);
    let from_stats = heatmap_value_range(&plain, None);
    assert_relative_eq!(from_stats.min, 10.0);
    assert_relative_eq!(from_stats.max, 20.0);
}

#[test]
fn heatmap_spec_uses_colour_scale_and_window_labels() {
    let chart = heatmap(ChartConfig::new("Bins").with_colour_scale(ColorScale::Diverging));
    let labels = labels(4);
    let window = TimeWindow::new(1, 2).expect("window");
    let spec = build_chart_spec(&chart, &filter_chart(&chart, &labels, window), None);

    assert_eq!(spec.x_categories(), &labels[1..=2]);
    let visual_map = spec.visual_map.as_ref().expect("visual map");
    assert_eq!(visual_map.in_range.color, ColorScale::Diverging.stops().to_vec());
    assert_eq!(spec.series.len(), 1);
    assert_eq!(spec.series[0].kind, SeriesKind::Heatmap);

    let json = spec.to_json_value().expect("json");
    assert_eq!(json["series"][0]["type"], "heatmap");
    assert_eq!(json["series"][0]["data"][0], serde_json::json!([0, 0, 2.0]));
    assert_eq!(json["xAxis"]["type"], "category");
    assert_eq!(json["visualMap"]["inRange"]["color"][0], ColorScale::Diverging.stops()[0]);
    assert!(json.get("legend").is_none());
}

#[test]
fn line_series_cycle_through_palette() {
    let total = 5;
    let mut series = IndexMap::new();
    for i in 0..LINE_PALETTE.len() + 1 {
        series.insert(format!("s{i}"), vec![i as f64; total]);
    }
    let chart = ChartDefinition::line(ChartConfig::new("many"), series);
    let labels = labels(total);
    let window = TimeWindow::full(total).expect("window");
    let spec = build_chart_spec(&chart, &filter_chart(&chart, &labels, window), None);

    assert_eq!(spec.series.len(), LINE_PALETTE.len() + 1);
    assert_eq!(spec.series[0].color, Some(LINE_PALETTE[0]));
    assert_eq!(spec.series[LINE_PALETTE.len()].color, Some(line_color(0)));
    assert_eq!(spec.y_axis.min, None);

    let json = spec.to_json_value().expect("json");
    assert_eq!(json["yAxis"]["type"], "value");
    assert_eq!(json["tooltip"]["trigger"], "axis");
    assert_eq!(json["dataZoom"][0]["type"], "inside");
    assert_eq!(json["toolbox"]["feature"]["saveAsImage"]["name"], "many_line");
}

#[test]
fn heatmap_tooltip_falls_back_for_unknown_cells() {
    let labels = labels(4);
    let columns = vec!["a".to_owned(), "b".to_owned()];
    let window = TimeWindow::new(2, 3).expect("window");

    assert_eq!(
        heatmap_tooltip(&labels, &columns, window, HeatmapPoint::new(1, 0, 0.5)),
        "Time: T3<br/>Variable: a<br/>Value: 0.500"
    );
    assert_eq!(
        heatmap_tooltip(&labels, &columns, window, HeatmapPoint::new(5, 9, 1.0)),
        "Time: Time 7<br/>Variable: Col 9<br/>Value: 1.000"
    );

    let overflowing =
        heatmap_tooltip(&labels, &columns, window, HeatmapPoint::new(usize::MAX, 1, 2.0));
    assert!(overflowing.starts_with("Time: Time 2+"));
    assert!(overflowing.ends_with("<br/>Variable: b<br/>Value: 2.000"));
}
