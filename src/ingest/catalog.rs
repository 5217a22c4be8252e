use regex::{Regex, RegexBuilder};

use crate::core::{ChartConfig, ChartKind, ColorScale};
use crate::error::DashResult;

/// Recipe for one dashboard chart: which columns it plots and how.
#[derive(Debug, Clone)]
pub struct ChartTemplate {
    pub id: String,
    pub kind: ChartKind,
    pub config: ChartConfig,
    columns: Regex,
    exclude: Option<Regex>,
}

impl ChartTemplate {
    /// Compiles both patterns case-insensitively.
    pub fn new(
        id: impl Into<String>,
        kind: ChartKind,
        config: ChartConfig,
        columns_pattern: &str,
        exclude_pattern: Option<&str>,
    ) -> DashResult<Self> {
        let compile = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
        Ok(Self {
            id: id.into(),
            kind,
            config,
            columns: compile(columns_pattern)?,
            exclude: exclude_pattern.map(compile).transpose()?,
        })
    }

    #[must_use]
    pub fn matches(&self, column: &str) -> bool {
        self.columns.is_match(column)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(column))
    }

    /// Matching column names, sorted lexicographically.
    #[must_use]
    pub fn find_columns<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found: Vec<String> = names
            .into_iter()
            .filter(|name| self.matches(name))
            .map(str::to_owned)
            .collect();
        found.sort();
        found
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartCatalog {
    templates: Vec<ChartTemplate>,
}

struct BuiltinTemplate {
    id: &'static str,
    kind: ChartKind,
    title: &'static str,
    columns: &'static str,
    exclude: Option<&'static str>,
    description: &'static str,
    units: &'static str,
    scale: ColorScale,
    bounds: (Option<f64>, Option<f64>),
}

const BUILTIN: [BuiltinTemplate; 9] = [
    BuiltinTemplate {
        id: "chart_bins",
        kind: ChartKind::Heatmap,
        title: "Particle Distribution - Bins",
        columns: r"^bin_\d+$",
        exclude: Some("flag_"),
        description: "Particle concentration by bin size",
        units: "particles/cm³",
        scale: ColorScale::Scientific,
        bounds: (Some(0.0), Some(5.0)),
    },
    BuiltinTemplate {
        id: "chart_flag_bins",
        kind: ChartKind::Heatmap,
        title: "Quality Flags - Bins",
        columns: r"^flag_bin_\d+$",
        exclude: None,
        description: "Quality codes for bin measurements",
        units: "flag code",
        scale: ColorScale::Diverging,
        bounds: (Some(0.0), Some(1.0)),
    },
    BuiltinTemplate {
        id: "chart_bnloer",
        kind: ChartKind::Heatmap,
        title: "Lower Percentiles (15.87%)",
        columns: r"^bnloer\d+$",
        exclude: Some("flag_"),
        description: "15.87th percentile of distribution by bin",
        units: "particles/cm³",
        scale: ColorScale::Scientific,
        bounds: (Some(0.0), Some(5.0)),
    },
    BuiltinTemplate {
        id: "chart_flag_bnloer",
        kind: ChartKind::Heatmap,
        title: "Flags - Lower Percentiles",
        columns: r"^flag_bnloer\d+$",
        exclude: None,
        description: "Quality codes for lower percentiles",
        units: "flag code",
        scale: ColorScale::Diverging,
        bounds: (Some(0.0), Some(1.0)),
    },
    BuiltinTemplate {
        id: "chart_bnhier",
        kind: ChartKind::Heatmap,
        title: "Upper Percentiles (84.13%)",
        columns: r"^bnhier\d+$",
        exclude: Some("flag_"),
        description: "84.13th percentile of distribution by bin",
        units: "particles/cm³",
        scale: ColorScale::Scientific,
        bounds: (Some(0.0), Some(5.0)),
    },
    BuiltinTemplate {
        id: "chart_flag_bnhier",
        kind: ChartKind::Heatmap,
        title: "Flags - Upper Percentiles",
        columns: r"^flag_bnhier\d+$",
        exclude: None,
        description: "Quality codes for upper percentiles",
        units: "flag code",
        scale: ColorScale::Diverging,
        bounds: (Some(0.0), Some(1.0)),
    },
    BuiltinTemplate {
        id: "chart_rh",
        kind: ChartKind::Line,
        title: "Relative Humidity",
        columns: r".*RH.*",
        exclude: Some("flag_"),
        description: "Relative humidity of inlet air",
        units: "%",
        scale: ColorScale::Diverging,
        bounds: (Some(0.0), Some(60.0)),
    },
    BuiltinTemplate {
        id: "chart_met",
        kind: ChartKind::Line,
        title: "Meteorological Variables",
        columns: r"^(P_sys|T_sys|temperature|pressure)$",
        exclude: Some("flag_"),
        description: "System pressure and temperature",
        units: "Pa, K",
        scale: ColorScale::Diverging,
        bounds: (None, None),
    },
    BuiltinTemplate {
        id: "chart_flags_met",
        kind: ChartKind::Heatmap,
        title: "Flags - Meteorological Variables",
        columns: r"^flag_(P_sys|T_sys|RH|temperature|pressure)",
        exclude: None,
        description: "Quality codes for meteorological variables",
        units: "flag code",
        scale: ColorScale::Diverging,
        bounds: (Some(0.0), Some(1.0)),
    },
];

impl ChartCatalog {
    #[must_use]
    pub fn new(templates: Vec<ChartTemplate>) -> Self {
        Self { templates }
    }

    /// The particle-analysis chart set: size-bin heatmaps, percentile bins,
    /// their quality flags, humidity and meteorological lines.
    pub fn builtin() -> DashResult<Self> {
        let templates = BUILTIN
            .iter()
            .map(|entry| {
                let config = ChartConfig::new(entry.title)
                    .with_description(entry.description)
                    .with_units(entry.units)
                    .with_colour_scale(entry.scale)
                    .with_default_bounds(entry.bounds.0, entry.bounds.1);
                ChartTemplate::new(entry.id, entry.kind, config, entry.columns, entry.exclude)
            })
            .collect::<DashResult<Vec<_>>>()?;
        Ok(Self { templates })
    }

    pub fn push(&mut self, template: ChartTemplate) {
        self.templates.push(template);
    }

    #[must_use]
    pub fn templates(&self) -> &[ChartTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
