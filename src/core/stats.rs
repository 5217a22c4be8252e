use serde::{Deserialize, Serialize};

/// Summary statistics over every finite value a chart plots.
///
/// `min`/`max` are the fallback visual range; `p5`/`p95` seed the value-range
/// controls when a chart template carries no explicit default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    #[serde(default)]
    pub p5: f64,
    #[serde(default = "default_p95")]
    pub p95: f64,
}

fn default_p95() -> f64 {
    100.0
}

impl Default for ValueStats {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            mean: 50.0,
            std: 25.0,
            p5: 0.0,
            p95: 100.0,
        }
    }
}

impl ValueStats {
    /// Computes statistics over the finite values of `values`.
    ///
    /// Falls back to `ValueStats::default()` when nothing finite remains.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Self::default();
        }
        finite.sort_by(f64::total_cmp);

        let count = finite.len() as f64;
        let mean = finite.iter().sum::<f64>() / count;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

        Self {
            min: finite[0],
            max: finite[finite.len() - 1],
            mean,
            std: variance.sqrt(),
            p5: percentile_sorted(&finite, 5.0),
            p95: percentile_sorted(&finite, 95.0),
        }
    }
}

/// Linear-interpolated percentile over an ascending, non-empty slice.
fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    let rank = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::ValueStats;
    use approx::assert_relative_eq;

    #[test]
    fn empty_input_uses_documented_defaults() {
        let stats = ValueStats::from_values([f64::NAN, f64::INFINITY]);
        assert_eq!(stats, ValueStats::default());
    }

    #[test]
    fn population_std_and_interpolated_percentiles() {
        let stats = ValueStats::from_values([4.0, 2.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, f64::NAN]);
        assert_relative_eq!(stats.min, 2.0);
        assert_relative_eq!(stats.max, 9.0);
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.std, 2.0);
        // rank = 0.05 * 7 = 0.35 -> 2.0 + 0.35 * (4.0 - 2.0)
        assert_relative_eq!(stats.p5, 2.7, epsilon = 1e-12);
        // rank = 0.95 * 7 = 6.65 -> 7.0 + 0.65 * (9.0 - 7.0)
        assert_relative_eq!(stats.p95, 8.3, epsilon = 1e-12);
    }
}
