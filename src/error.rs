// src/error.rs

use arrow::error::ArrowError;
use std::{io, path::PathBuf};

/// Errors raised while loading the source table or producing rate tables.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// The source CSV does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A column the computation depends on is absent from the table
    #[error("input table must contain a '{column}' column ({context})")]
    MissingColumn { column: String, context: String },

    /// A metric from the fixed list is absent; the driver skips it
    #[error("metric '{0}' not found in input table")]
    MissingMetric(String),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RateError {
    pub fn missing_column(column: &str, context: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
            context: context.into(),
        }
    }

    /// True for conditions the driver logs and steps over rather than aborting on.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::MissingMetric(_))
    }
}

pub type Result<T> = std::result::Result<T, RateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_item() {
        let e = RateError::missing_column("adultPopulation", "population basis adult-population");
        assert_eq!(
            e.to_string(),
            "input table must contain a 'adultPopulation' column (population basis adult-population)"
        );

        let e = RateError::InputNotFound(PathBuf::from("data/veteran-data-2023.csv"));
        assert!(e.to_string().contains("data/veteran-data-2023.csv"));
    }

    #[test]
    fn only_missing_metric_is_skippable() {
        assert!(RateError::MissingMetric("gulfWar".into()).is_skippable());
        assert!(!RateError::missing_column("population", "x").is_skippable());
        assert!(!RateError::InputNotFound(PathBuf::from("x")).is_skippable());
    }
}
