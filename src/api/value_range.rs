use serde::{Deserialize, Serialize};

use crate::core::{ChartDefinition, ChartKind, ValueBounds};
use crate::error::{DashError, DashResult};

use super::range_display::truncate_chars;

/// Parses user-typed min/max inputs; both must be finite numbers.
pub fn parse_value_bounds(min_text: &str, max_text: &str) -> DashResult<ValueBounds> {
    let min = parse_finite("min", min_text)?;
    let max = parse_finite("max", max_text)?;
    ValueBounds::new(min, max)
}

fn parse_finite(field: &str, text: &str) -> DashResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DashError::InvalidValueRange(format!(
            "{field} `{trimmed}` is not a finite number"
        ))),
    }
}

/// Formats a bound the way the value-range inputs display it.
#[must_use]
pub fn format_bound(value: f64) -> String {
    format!("{value:.2}")
}

/// Per-chart min/max control shown next to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRangeControl {
    pub chart_id: String,
    pub short_title: String,
    pub type_indicator: char,
    pub min_text: String,
    pub max_text: String,
    /// Bounds applied by the "auto" action.
    pub auto_bounds: ValueBounds,
}

impl ValueRangeControl {
    /// Returns `None` for charts that hide their controls.
    #[must_use]
    pub fn for_chart(chart_id: &str, chart: &ChartDefinition, title_chars: usize) -> Option<Self> {
        if !chart.config.show_controls {
            return None;
        }

        let title = &chart.config.title;
        let short_title = if title.chars().count() > title_chars {
            format!("{}...", truncate_chars(title, title_chars))
        } else {
            title.clone()
        };
        let initial_min = chart.config.default_min.unwrap_or(chart.stats.p5);
        let initial_max = chart.config.default_max.unwrap_or(chart.stats.p95);

        Some(Self {
            chart_id: chart_id.to_owned(),
            short_title,
            type_indicator: match chart.kind() {
                ChartKind::Heatmap => '■',
                ChartKind::Line => '―',
            },
            min_text: format_bound(initial_min),
            max_text: format_bound(initial_max),
            auto_bounds: ValueBounds {
                min: chart.stats.min,
                max: chart.stats.max,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ValueRangeControl, parse_value_bounds};
    use crate::core::{ChartConfig, ChartDefinition, HeatmapPoint};

    #[test]
    fn parse_rejects_non_numeric_and_non_finite() {
        assert!(parse_value_bounds("abc", "1").is_err());
        assert!(parse_value_bounds("0", "inf").is_err());
        assert!(parse_value_bounds("", "1").is_err());
        let bounds = parse_value_bounds(" 0.5 ", "12").expect("bounds");
        assert_eq!((bounds.min, bounds.max), (0.5, 12.0));
    }

    #[test]
    fn control_truncates_title_and_prefers_config_defaults() {
        let config = ChartConfig::new("Particle Distribution - Bins")
            .with_default_bounds(Some(0.0), None);
        let chart = ChartDefinition::heatmap(
            config,
            vec!["bin_1".to_owned()],
            (0..21).map(|t| HeatmapPoint::new(t, 0, t as f64)).collect(),
        );

        let control = ValueRangeControl::for_chart("bins", &chart, 25).expect("control");
        assert_eq!(control.short_title, "Particle Distribution - B...");
        assert_eq!(control.type_indicator, '■');
        assert_eq!(control.min_text, "0.00");
        assert_eq!(control.max_text, "19.00");
        assert_eq!(control.auto_bounds.max, 20.0);
    }

    #[test]
    fn hidden_controls_produce_none() {
        let mut config = ChartConfig::new("Hidden");
        config.show_controls = false;
        let chart = ChartDefinition::heatmap(config, Vec::new(), Vec::new());
        assert!(ValueRangeControl::for_chart("hidden", &chart, 25).is_none());
    }
}
