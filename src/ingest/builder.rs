use indexmap::IndexMap;
use tracing::{debug, info};

use crate::core::{ChartDefinition, ChartKind, Dataset, HeatmapPoint, ValueStats};

use super::catalog::ChartCatalog;
use super::ebas::EbasTable;

/// Chart id unique to one analysis; hyphens become underscores so the id is
/// usable as a DOM id and script identifier.
#[must_use]
pub fn chart_id_for(template_id: &str, analysis_id: &str) -> String {
    format!("{template_id}_{}", analysis_id.replace('-', "_"))
}

/// Builds one chart per catalog template that matches at least one column.
///
/// NaN cells are plotted as `0.0`; statistics only see finite values.
#[must_use]
pub fn build_dataset(table: &EbasTable, catalog: &ChartCatalog, analysis_id: &str) -> Dataset {
    let mut charts = IndexMap::new();

    for template in catalog.templates() {
        let columns = template.find_columns(table.numeric_column_names());
        if columns.is_empty() {
            debug!(template = %template.id, "no matching columns, skipping chart");
            continue;
        }

        let data: Vec<&[f64]> = columns
            .iter()
            .filter_map(|column| table.column(column))
            .collect();
        let stats = ValueStats::from_values(data.iter().flat_map(|values| values.iter().copied()));

        let chart = match template.kind {
            ChartKind::Heatmap => {
                let points = (0..table.row_count())
                    .flat_map(|row| {
                        data.iter().enumerate().map(move |(column_index, values)| {
                            HeatmapPoint::new(row, column_index, fill_missing(values[row]))
                        })
                    })
                    .collect();
                ChartDefinition::heatmap(template.config.clone(), columns, points)
            }
            ChartKind::Line => {
                let series = columns
                    .iter()
                    .zip(&data)
                    .map(|(column, values)| {
                        (
                            column.clone(),
                            values.iter().copied().map(fill_missing).collect(),
                        )
                    })
                    .collect();
                ChartDefinition::line(template.config.clone(), series)
            }
        }
        .with_stats(stats);

        charts.insert(chart_id_for(&template.id, analysis_id), chart);
    }

    info!(
        charts = charts.len(),
        rows = table.row_count(),
        "built dashboard dataset"
    );
    Dataset::new(table.time_labels(), charts)
}

fn fill_missing(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::{build_dataset, chart_id_for};
    use crate::core::{ChartData, ChartKind};
    use crate::ingest::{ChartCatalog, parse_ebas_str};

    const SAMPLE: &str = "\
starttime endtime bin_1 bin_2 RH flag_bin_1
0.0 0.04 1.0 2.0 30.0 0.0
0.04 0.08 nan 4.0 31.0 0.0
";

    #[test]
    fn chart_ids_are_identifier_safe() {
        assert_eq!(chart_id_for("chart_rh", "ab-cd-01"), "chart_rh_ab_cd_01");
    }

    #[test]
    fn builds_only_matching_charts_with_zero_fill() {
        let table = parse_ebas_str(SAMPLE).expect("table");
        let catalog = ChartCatalog::builtin().expect("catalog");
        let dataset = build_dataset(&table, &catalog, "run-1");

        let ids: Vec<&str> = dataset.charts().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["chart_bins_run_1", "chart_flag_bins_run_1", "chart_rh_run_1"]);
        assert!(dataset.invalid_charts().is_empty());

        let bins = dataset.chart("chart_bins_run_1").expect("bins");
        assert_eq!(bins.kind(), ChartKind::Heatmap);
        let ChartData::Heatmap { columns, points } = &bins.data else {
            panic!("expected heatmap data");
        };
        assert_eq!(columns, &vec!["bin_1".to_owned(), "bin_2".to_owned()]);
        assert_eq!(points.len(), 4);
        assert_eq!(points[2].value, 0.0);
        assert_eq!(bins.stats.min, 1.0);
        assert_eq!(bins.stats.max, 4.0);

        let rh = dataset.chart("chart_rh_run_1").expect("rh");
        let ChartData::Line { series } = &rh.data else {
            panic!("expected line data");
        };
        assert_eq!(series.get("RH"), Some(&vec![30.0, 31.0]));
    }
}
