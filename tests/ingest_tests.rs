use approx::assert_relative_eq;
use particle_dash::api::{DashboardConfig, DashboardSession, RangeDecision};
use particle_dash::core::{ChartData, ChartKind, TimeWindow};
use particle_dash::ingest::{
    ChartCatalog, build_dataset, chart_id_for, parse_ebas_file, parse_ebas_str,
};
use particle_dash::render::{RecordingHost, RecordingSurface};

const NAS: &str = "\
38 1001
Operator, Station
Example station nephelometer and sizer
starttime endtime bin_1 bin_2 flag_bin_1 RH_inlet P_sys
0.000000 0.041667 1.0 4.0 0.000 30.0 1013.0
0.041667 0.083333 2.0 x 0.000 31.0 1012.5
0.083334 0.125000 3.0 6.0 0.100 32.0 1012.0
0.125000 0.166667 4.0 7.0 0.000 33.0 1011.5
0.166667 0.208333 5.0 8.0 0.000 34.0 1011.0
0.208334 0.250000 6.0 9.0 0.000 35.0 1010.5
";

fn builtin() -> ChartCatalog {
    ChartCatalog::builtin().expect("builtin catalog")
}

#[test]
fn builtin_catalog_builds_matching_charts_only() {
    let table = parse_ebas_str(NAS).expect("parse");
    let dataset = build_dataset(&table, &builtin(), "run-7");

    let ids: Vec<&str> = dataset.charts().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec![
            "chart_bins_run_7",
            "chart_flag_bins_run_7",
            "chart_rh_run_7",
            "chart_met_run_7",
        ]
    );
    assert_eq!(dataset.total_points(), 6);
    assert_eq!(dataset.time_labels()[0], "2024-01-01 00:00");
    assert_eq!(dataset.time_labels()[1], "2024-01-01 01:00");
    assert!(dataset.invalid_charts().is_empty());

    let bins = dataset.chart("chart_bins_run_7").expect("bins chart");
    assert_eq!(bins.kind(), ChartKind::Heatmap);
    assert_eq!(bins.config.default_max, Some(5.0));
    let ChartData::Heatmap { columns, points } = &bins.data else {
        panic!("expected heatmap data");
    };
    assert_eq!(columns, &vec!["bin_1".to_owned(), "bin_2".to_owned()]);
    assert_eq!(points.len(), 12);
    // Unparsable cell is drawn as zero but ignored by the statistics.
    assert_relative_eq!(points[3].value, 0.0);
    assert_relative_eq!(bins.stats.min, 1.0);
    assert_relative_eq!(bins.stats.max, 9.0);

    let met = dataset.chart("chart_met_run_7").expect("met chart");
    assert_eq!(met.kind(), ChartKind::Line);
    assert_eq!(met.config.default_min, None);
}

#[test]
fn chart_ids_are_identifier_safe() {
    assert_eq!(chart_id_for("chart_rh", "2024-05-a"), "chart_rh_2024_05_a");
}

#[test]
fn parsed_file_drives_a_session() {
    let table = parse_ebas_str(NAS).expect("parse");
    let labels = table.time_labels();
    let dataset = build_dataset(&table, &builtin(), "cli");

    let mut host = RecordingHost::new();
    let mut session: DashboardSession<RecordingSurface> =
        DashboardSession::init(dataset, DashboardConfig::default(), &mut host, None)
            .expect("session");
    assert_eq!(session.current_window(), TimeWindow::full(6));

    assert_eq!(
        session.request_window(2, 4),
        RangeDecision::Render(TimeWindow::new(2, 4).expect("window"))
    );
    let spec = session
        .surface("chart_rh_cli")
        .and_then(|surface| surface.last_spec.as_ref())
        .expect("rh spec");
    assert_eq!(spec.x_categories(), &labels[2..=4]);
    assert_eq!(spec.series[0].name, "RH_inlet");
    assert_eq!(spec.y_axis.max, Some(60.0));
}

#[test]
fn missing_header_is_a_parse_error() {
    let err = parse_ebas_str("just\nsome\ntext\n").expect_err("no header");
    assert!(err.to_string().contains("data header"));
}

#[test]
fn reads_from_disk() {
    let path = std::env::temp_dir().join(format!("particle-dash-{}.nas", std::process::id()));
    std::fs::write(&path, NAS).expect("write fixture");
    let table = parse_ebas_file(&path).expect("parse file");
    std::fs::remove_file(&path).expect("remove fixture");

    assert_eq!(table.row_count(), 6);
    assert_eq!(table.time_period(), "2024-01-01 00:00 to 2024-01-01 05:00");
}
