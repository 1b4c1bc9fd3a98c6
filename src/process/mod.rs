// src/process/mod.rs

pub mod naming;
pub mod rates;
pub mod table;
pub mod utils;

pub use naming::normalize;
pub use rates::{build_metric_table, compute_rate_table, output_path, write_csv, RateTable};
pub use table::SourceTable;
pub use utils::{clean_str, parse_numeric_or_default};
