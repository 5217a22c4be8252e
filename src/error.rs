use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid time window: start={start}, end={end}")]
    InvalidWindow { start: i64, end: i64 },

    #[error("invalid value range: {0}")]
    InvalidValueRange(String),

    #[error("unknown chart: {0}")]
    UnknownChart(String),

    #[error("missing mount point: {0}")]
    MissingElement(String),

    #[error("missing dependency: {0}")]
    MissingDependency(String),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid column pattern: {0}")]
    Pattern(#[from] regex::Error),
}
