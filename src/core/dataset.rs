use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::stats::ValueStats;
use crate::core::types::{ChartKind, ColorScale};
use crate::error::{DashError, DashResult};

/// One heatmap cell: `(time_index, column_index, value)`.
///
/// Serialized as a three-element array, the shape charting engines consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(usize, usize, f64)", into = "(usize, usize, f64)")]
pub struct HeatmapPoint {
    pub time_index: usize,
    pub column_index: usize,
    pub value: f64,
}

impl HeatmapPoint {
    #[must_use]
    pub const fn new(time_index: usize, column_index: usize, value: f64) -> Self {
        Self {
            time_index,
            column_index,
            value,
        }
    }
}

impl From<(usize, usize, f64)> for HeatmapPoint {
    fn from((time_index, column_index, value): (usize, usize, f64)) -> Self {
        Self::new(time_index, column_index, value)
    }
}

impl From<HeatmapPoint> for (usize, usize, f64) {
    fn from(point: HeatmapPoint) -> Self {
        (point.time_index, point.column_index, point.value)
    }
}

/// Presentation settings shared by both chart kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub colour_scale: ColorScale,
    #[serde(default = "default_show_controls")]
    pub show_controls: bool,
    #[serde(default)]
    pub default_min: Option<f64>,
    #[serde(default)]
    pub default_max: Option<f64>,
}

fn default_show_controls() -> bool {
    true
}

impl ChartConfig {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            units: String::new(),
            colour_scale: ColorScale::default(),
            show_controls: true,
            default_min: None,
            default_max: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    #[must_use]
    pub fn with_colour_scale(mut self, colour_scale: ColorScale) -> Self {
        self.colour_scale = colour_scale;
        self
    }

    #[must_use]
    pub fn with_default_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.default_min = min;
        self.default_max = max;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    /// Named series, each index-aligned with the dataset time labels.
    Line { series: IndexMap<String, Vec<f64>> },
    Heatmap {
        columns: Vec<String>,
        points: Vec<HeatmapPoint>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDefinition {
    pub config: ChartConfig,
    pub data: ChartData,
    #[serde(default)]
    pub stats: ValueStats,
}

impl ChartDefinition {
    #[must_use]
    pub fn line(config: ChartConfig, series: IndexMap<String, Vec<f64>>) -> Self {
        let stats = ValueStats::from_values(series.values().flatten().copied());
        Self {
            config,
            data: ChartData::Line { series },
            stats,
        }
    }

    #[must_use]
    pub fn heatmap(config: ChartConfig, columns: Vec<String>, points: Vec<HeatmapPoint>) -> Self {
        let stats = ValueStats::from_values(points.iter().map(|point| point.value));
        Self {
            config,
            data: ChartData::Heatmap { columns, points },
            stats,
        }
    }

    #[must_use]
    pub fn with_stats(mut self, stats: ValueStats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Line { .. } => ChartKind::Line,
            ChartData::Heatmap { .. } => ChartKind::Heatmap,
        }
    }

    /// Checks index alignment against a dataset of `total_points` samples.
    pub fn validate(&self, total_points: usize) -> DashResult<()> {
        match &self.data {
            ChartData::Line { series } => {
                for (name, values) in series {
                    if values.len() != total_points {
                        return Err(DashError::InvalidData(format!(
                            "series `{name}` has {} values, expected {total_points}",
                            values.len()
                        )));
                    }
                }
            }
            ChartData::Heatmap { columns, points } => {
                if let Some(point) = points
                    .iter()
                    .find(|p| p.time_index >= total_points || p.column_index >= columns.len())
                {
                    return Err(DashError::InvalidData(format!(
                        "heatmap point ({}, {}) lies outside {total_points} x {} grid",
                        point.time_index,
                        point.column_index,
                        columns.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Loaded dataset: shared time labels plus every chart keyed by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    time_labels: Vec<String>,
    charts: IndexMap<String, ChartDefinition>,
}

impl Dataset {
    #[must_use]
    pub fn new(time_labels: Vec<String>, charts: IndexMap<String, ChartDefinition>) -> Self {
        Self {
            time_labels,
            charts,
        }
    }

    pub fn from_json_str(input: &str) -> DashResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DashError::InvalidData(format!("failed to parse dataset json: {e}")))
    }

    pub fn to_json_pretty(&self) -> DashResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashError::InvalidData(format!("failed to serialize dataset: {e}")))
    }

    #[must_use]
    pub fn time_labels(&self) -> &[String] {
        &self.time_labels
    }

    #[must_use]
    pub fn total_points(&self) -> usize {
        self.time_labels.len()
    }

    #[must_use]
    pub fn chart(&self, chart_id: &str) -> Option<&ChartDefinition> {
        self.charts.get(chart_id)
    }

    pub fn charts(&self) -> impl Iterator<Item = (&str, &ChartDefinition)> {
        self.charts.iter().map(|(id, chart)| (id.as_str(), chart))
    }

    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    pub fn insert_chart(&mut self, chart_id: impl Into<String>, chart: ChartDefinition) {
        self.charts.insert(chart_id.into(), chart);
    }

    /// Returns every chart whose data is not index-aligned with the time labels.
    #[must_use]
    pub fn invalid_charts(&self) -> Vec<(String, DashError)> {
        let total = self.total_points();
        self.charts
            .iter()
            .filter_map(|(id, chart)| chart.validate(total).err().map(|err| (id.clone(), err)))
            .collect()
    }
}
