//! Declarative chart option model handed to the external charting engine.
//!
//! Field names serialize in the engine's camelCase option vocabulary so a host
//! can forward `serde_json::to_value(&spec)` straight into `setOption`.

use serde::Serialize;

use crate::core::HeatmapPoint;
use crate::error::{DashError, DashResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: TitleSpec,
    pub tooltip: TooltipSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendSpec>,
    pub grid: GridSpec,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_map: Option<VisualMapSpec>,
    pub series: Vec<SeriesSpec>,
    pub toolbox: ToolboxSpec,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_zoom: Vec<DataZoomSpec>,
}

impl ChartSpec {
    pub fn to_json_value(&self) -> DashResult<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| DashError::InvalidData(format!("failed to serialize chart spec: {e}")))
    }

    /// Category labels on the time axis.
    #[must_use]
    pub fn x_categories(&self) -> &[String] {
        self.x_axis.data.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleSpec {
    pub text: String,
    pub subtext: String,
    pub left: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    Item,
    Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipSpec {
    pub trigger: TooltipTrigger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_pointer: Option<AxisPointerSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisPointerSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSpec {
    pub top: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub top: &'static str,
    pub left: &'static str,
    pub right: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contain_label: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Category,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    #[serde(rename = "type")]
    pub kind: AxisKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    pub name: String,
    pub name_location: &'static str,
    pub name_gap: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_gap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_area: Option<ShowFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShowFlag {
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMapSpec {
    pub min: f64,
    pub max: f64,
    pub calculable: bool,
    pub orient: &'static str,
    pub left: &'static str,
    pub bottom: &'static str,
    pub in_range: InRangeSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InRangeSpec {
    pub color: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Heatmap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<f64>),
    Cells(Vec<HeatmapPoint>),
}

impl SeriesData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::Cells(cells) => cells.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: SeriesData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smooth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyleSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<ShowFlag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyleSpec {
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolboxSpec {
    pub show: bool,
    pub feature: ToolboxFeatures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolboxFeatures {
    pub save_as_image: SaveAsImageSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_zoom: Option<DataZoomToolSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveAsImageSpec {
    pub title: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataZoomToolSpec {
    pub title: DataZoomToolTitles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataZoomToolTitles {
    pub zoom: &'static str,
    pub back: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataZoomSpec {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}
