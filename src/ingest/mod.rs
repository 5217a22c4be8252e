//! Turns raw EBAS measurement files into dashboard datasets.

mod builder;
mod catalog;
mod ebas;

pub use builder::{build_dataset, chart_id_for};
pub use catalog::{ChartCatalog, ChartTemplate};
pub use ebas::{EbasTable, parse_ebas_file, parse_ebas_str};
