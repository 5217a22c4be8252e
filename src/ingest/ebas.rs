use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::{DashError, DashResult};

const START_COLUMN: &str = "starttime";
const END_COLUMN: &str = "endtime";
const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Parsed EBAS NASA-Ames data block.
///
/// `starttime`/`endtime` stay out of `numeric`; every other column is parsed
/// as `f64` with unparsable cells stored as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct EbasTable {
    columns: Vec<String>,
    timestamps: Vec<Option<NaiveDateTime>>,
    numeric: IndexMap<String, Vec<f64>>,
}

impl EbasTable {
    /// Header columns in file order, including the time columns.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn timestamps(&self) -> &[Option<NaiveDateTime>] {
        &self.timestamps
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.numeric.get(name).map(Vec::as_slice)
    }

    pub fn numeric_column_names(&self) -> impl Iterator<Item = &str> {
        self.numeric.keys().map(String::as_str)
    }

    /// One label per row: the row timestamp, or `Sample {row}` without one.
    #[must_use]
    pub fn time_labels(&self) -> Vec<String> {
        self.timestamps
            .iter()
            .enumerate()
            .map(|(row, timestamp)| match timestamp {
                Some(at) => at.format(LABEL_FORMAT).to_string(),
                None => format!("Sample {row}"),
            })
            .collect()
    }

    /// Human-readable span of the data.
    #[must_use]
    pub fn time_period(&self) -> String {
        let valid = self.timestamps.iter().flatten();
        match (valid.clone().min(), valid.max()) {
            (Some(first), Some(last)) => format!(
                "{} to {}",
                first.format(LABEL_FORMAT),
                last.format(LABEL_FORMAT)
            ),
            _ => format!("{} time points", self.row_count()),
        }
    }
}

fn base_time() -> DashResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DashError::InvalidData("invalid EBAS base date".to_owned()))
}

/// Converts a fractional day offset into a timestamp.
fn offset_timestamp(base: NaiveDateTime, days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let millis = (days * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    base.checked_add_signed(delta)
}

pub fn parse_ebas_file(path: impl AsRef<Path>) -> DashResult<EbasTable> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        DashError::InvalidData(format!("failed to read `{}`: {e}", path.display()))
    })?;
    parse_ebas_str(&String::from_utf8_lossy(&bytes))
}

pub fn parse_ebas_str(text: &str) -> DashResult<EbasTable> {
    let lines: Vec<&str> = text.lines().collect();
    let header_at = lines
        .iter()
        .position(|line| {
            let trimmed = line.trim();
            trimmed.starts_with(START_COLUMN) && trimmed.contains(END_COLUMN)
        })
        .ok_or(DashError::Parse {
            line: 0,
            message: "could not find data header".to_owned(),
        })?;

    let columns: Vec<String> = lines[header_at]
        .split_whitespace()
        .map(str::to_owned)
        .collect();
    let start_index = columns
        .iter()
        .position(|column| column == START_COLUMN)
        .ok_or(DashError::Parse {
            line: header_at + 1,
            message: format!("header has no `{START_COLUMN}` column"),
        })?;

    let mut numeric: IndexMap<String, Vec<f64>> = IndexMap::new();
    for column in &columns {
        if column == START_COLUMN || column == END_COLUMN {
            continue;
        }
        if numeric.insert(column.clone(), Vec::new()).is_some() {
            return Err(DashError::Parse {
                line: header_at + 1,
                message: format!("duplicate column `{column}`"),
            });
        }
    }

    let base = base_time()?;
    let mut timestamps = Vec::new();
    for (offset, line) in lines.iter().enumerate().skip(header_at + 1) {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != columns.len() {
            return Err(DashError::Parse {
                line: offset + 1,
                message: format!("expected {} fields, found {}", columns.len(), fields.len()),
            });
        }

        let start_days = fields[start_index].parse::<f64>().unwrap_or(f64::NAN);
        timestamps.push(offset_timestamp(base, start_days));

        for (column, field) in columns.iter().zip(&fields) {
            if let Some(values) = numeric.get_mut(column) {
                values.push(field.parse::<f64>().unwrap_or(f64::NAN));
            }
        }
    }

    if timestamps.is_empty() {
        return Err(DashError::Parse {
            line: header_at + 1,
            message: "no data rows after header".to_owned(),
        });
    }

    debug!(
        rows = timestamps.len(),
        columns = columns.len(),
        "parsed EBAS data block"
    );
    Ok(EbasTable {
        columns,
        timestamps,
        numeric,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_ebas_str;
    use crate::error::DashError;

    const SAMPLE: &str = "\
1 1001
Some NASA-Ames preamble
starttime endtime bin_1 bin_2 RH flag_bin_1
0.000000 0.041667 1.5 2.5 30.0 0.000
# comment row
0.041667 0.083333 x 3.5 31.0 0.000

bad     0.125000 4.5 5.5 32.0 0.100
";

    #[test]
    fn parses_header_rows_and_timestamps() {
        let table = parse_ebas_str(SAMPLE).expect("table");
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.columns().len(), 6);
        assert_eq!(
            table.numeric_column_names().collect::<Vec<_>>(),
            vec!["bin_1", "bin_2", "RH", "flag_bin_1"]
        );
        let bin_1 = table.column("bin_1").expect("bin_1");
        assert_eq!(bin_1[0], 1.5);
        assert!(bin_1[1].is_nan());
        assert_eq!(
            table.time_labels(),
            vec![
                "2024-01-01 00:00".to_owned(),
                "2024-01-01 01:00".to_owned(),
                "Sample 2".to_owned(),
            ]
        );
        assert_eq!(table.time_period(), "2024-01-01 00:00 to 2024-01-01 01:00");
    }

    #[test]
    fn missing_header_is_an_error() {
        let err = parse_ebas_str("just\nsome\ntext\n").expect_err("no header");
        assert!(matches!(err, DashError::Parse { line: 0, .. }));
    }

    #[test]
    fn ragged_row_reports_line_number() {
        let err = parse_ebas_str("starttime endtime a\n0.0 0.1 1.0\n0.1 0.2\n")
            .expect_err("ragged row");
        assert!(matches!(err, DashError::Parse { line: 3, .. }));
    }

    #[test]
    fn header_without_rows_is_an_error() {
        assert!(parse_ebas_str("starttime endtime a\n\n# nothing\n").is_err());
    }
}
