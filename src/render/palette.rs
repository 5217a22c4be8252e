use crate::core::ColorScale;

const SCIENTIFIC: [&str; 14] = [
    "#0d0887", "#2d1e8f", "#4a0da6", "#6a00a8", "#8b0aa5", "#a9179c", "#c42e88", "#dc4869",
    "#f0624a", "#fc8023", "#fd9a44", "#feb078", "#fdc7a4", "#fcfdbf",
];

const DIVERGING: [&str; 11] = [
    "#313695", "#4575b4", "#74add1", "#abd9e9", "#e0f3f8", "#ffffcc", "#fee090", "#fdae61",
    "#f46d43", "#d73027", "#a50026",
];

/// Series colors assigned by column order.
pub const LINE_PALETTE: [&str; 9] = [
    "#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de", "#3ba272", "#fc8452", "#9a60b4",
    "#ea7ccc",
];

impl ColorScale {
    /// Low-to-high color stops for the heatmap visual map.
    #[must_use]
    pub fn stops(self) -> &'static [&'static str] {
        match self {
            Self::Scientific => &SCIENTIFIC,
            Self::Diverging => &DIVERGING,
        }
    }
}

/// Deterministic color for the `index`-th line series.
#[must_use]
pub fn line_color(index: usize) -> &'static str {
    LINE_PALETTE[index % LINE_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::{LINE_PALETTE, line_color};
    use crate::core::ColorScale;

    #[test]
    fn line_colors_cycle_through_palette() {
        assert_eq!(line_color(0), LINE_PALETTE[0]);
        assert_eq!(line_color(LINE_PALETTE.len() + 2), LINE_PALETTE[2]);
    }

    #[test]
    fn scales_have_distinct_ends() {
        assert_eq!(ColorScale::Scientific.stops().first(), Some(&"#0d0887"));
        assert_eq!(ColorScale::Diverging.stops().last(), Some(&"#a50026"));
    }
}
