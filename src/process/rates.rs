// src/process/rates.rs

use crate::config::REGION_COLUMN;
use crate::error::{RateError, Result};
use crate::process::{naming::normalize, table::SourceTable, utils::parse_numeric_or_default};
use arrow::{
    array::{Array, ArrayRef, Float64Array, Int64Array},
    compute::{lexsort_to_indices, take, SortColumn, SortOptions},
    csv::WriterBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::debug;

/// Derived columns for one metric under one population basis.
#[derive(Debug)]
pub struct RateTable {
    pub per100k_column: String,
    pub pct_column: String,
    /// `state`, per-100k, percent, integer count; sorted by per-100k descending.
    pub batch: RecordBatch,
}

/// Largest magnitude a metric cell may have and still be stored as an `i64` count.
const MAX_COUNT: f64 = i64::MAX as f64;

/// Metric cell as a count; unparsable, non-finite or out-of-range cells are zero.
fn metric_value(cell: Option<&str>) -> f64 {
    parse_numeric_or_default(cell, Some(0.0))
        .filter(|v| v.abs() < MAX_COUNT)
        .unwrap_or(0.0)
}

/// `metric / population * scale`, undefined when the population is undefined
/// or zero.
fn rate(metric: f64, population: Option<f64>, scale: f64) -> Option<f64> {
    population
        .filter(|p| *p != 0.0)
        .map(|p| metric / p * scale)
}

/// Compute the rate table for `metric` against `population_column`.
///
/// Population cells that do not parse stay undefined and yield undefined rates.
/// Metric cells that do not parse count as zero.
pub fn compute_rate_table(
    table: &SourceTable,
    metric: &str,
    population_column: &str,
    label_suffix: &str,
) -> Result<RateTable> {
    if !table.has_column(population_column) {
        return Err(RateError::missing_column(
            population_column,
            format!("population column for metric '{metric}'"),
        ));
    }
    let states = table.text_column(REGION_COLUMN)?;
    let raw_pop = table.text_column(population_column)?;
    let raw_metric = table.text_column(metric)?;

    let pop: Vec<Option<f64>> = raw_pop
        .iter()
        .map(|cell| parse_numeric_or_default(cell, None))
        .collect();
    let metric_vals: Vec<f64> = raw_metric.iter().map(metric_value).collect();

    let per100k: Float64Array = metric_vals
        .iter()
        .zip(&pop)
        .map(|(m, p)| rate(*m, *p, 100_000.0))
        .collect();
    let pct: Float64Array = metric_vals
        .iter()
        .zip(&pop)
        .map(|(m, p)| rate(*m, *p, 100.0))
        .collect();
    // truncates toward zero; metric_value keeps this inside i64 range
    let base: Int64Array = metric_vals
        .iter()
        .map(|m| m.trunc() as i64)
        .collect::<Vec<_>>()
        .into();

    let per100k_column = format!("{metric}Per100k{label_suffix}");
    let pct_column = format!("{metric}Pct{label_suffix}");

    let schema = Arc::new(Schema::new(vec![
        Field::new(REGION_COLUMN, DataType::Utf8, true),
        Field::new(&per100k_column, DataType::Float64, true),
        Field::new(&pct_column, DataType::Float64, true),
        Field::new(metric, DataType::Int64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(states.clone()),
        Arc::new(per100k),
        Arc::new(pct),
        Arc::new(base),
    ];
    let unsorted = RecordBatch::try_new(schema, columns)?;
    let batch = sort_by_rate(&unsorted)?;

    debug!(
        rows = batch.num_rows(),
        undefined = batch.column(1).null_count(),
        column = %per100k_column,
        "computed rate table"
    );

    Ok(RateTable {
        per100k_column,
        pct_column,
        batch,
    })
}

/// Order rows by the per-100k column (index 1) descending with undefined rates
/// last, breaking ties on the region ascending.
fn sort_by_rate(batch: &RecordBatch) -> Result<RecordBatch> {
    let keys = [
        SortColumn {
            values: batch.column(1).clone(),
            options: Some(SortOptions {
                descending: true,
                nulls_first: false,
            }),
        },
        SortColumn {
            values: batch.column(0).clone(),
            options: Some(SortOptions {
                descending: false,
                nulls_first: false,
            }),
        },
    ];
    let indices = lexsort_to_indices(&keys, None)?;
    let columns = batch
        .columns()
        .iter()
        .map(|c| take(c.as_ref(), &indices, None))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(RecordBatch::try_new(batch.schema(), columns)?)
}

/// Output path for a metric: `<out_dir>/<kebab-metric><file_suffix>.csv`.
pub fn output_path(out_dir: &Path, metric: &str, file_suffix: &str) -> PathBuf {
    out_dir.join(format!("{}{}.csv", normalize(metric), file_suffix))
}

/// Write `batch` as CSV with a header row, replacing any file at `path`.
///
/// The data lands in a hidden sibling first and is renamed into place.
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.csv".to_string());
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let file = File::create(&tmp_path)?;
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(batch)?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Build, sort and persist the rate table for one metric under one basis,
/// returning the written path.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(metric = %metric, population = %population_column)
)]
pub fn build_metric_table(
    table: &SourceTable,
    metric: &str,
    out_dir: &Path,
    population_column: &str,
    label_suffix: &str,
    file_suffix: &str,
) -> Result<PathBuf> {
    let rates = compute_rate_table(table, metric, population_column, label_suffix)?;

    fs::create_dir_all(out_dir)?;
    let path = output_path(out_dir, metric, file_suffix);
    write_csv(&rates.batch, &path)?;

    debug!(path = %path.display(), rows = rates.batch.num_rows(), "wrote rate table");
    Ok(path)
}
