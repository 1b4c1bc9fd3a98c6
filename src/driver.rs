// src/driver.rs

use crate::config::{PopulationBasis, RunConfig, REGION_COLUMN};
use crate::error::{RateError, Result};
use crate::process::{build_metric_table, SourceTable};
use rayon::prelude::*;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

/// Files written for one population basis, in metric order.
#[derive(Debug, Clone)]
pub struct BasisReport {
    pub basis: String,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One report per basis, in configuration order.
    pub written: Vec<BasisReport>,
    /// Metrics absent from the input, skipped under every basis.
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn files_written(&self) -> usize {
        self.written.iter().map(|r| r.files.len()).sum()
    }
}

fn check_metric(table: &SourceTable, metric: &str) -> Result<()> {
    if table.has_column(metric) {
        Ok(())
    } else {
        Err(RateError::MissingMetric(metric.to_string()))
    }
}

/// Load `config.input` and write every rate table it supports.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    info!(input = %config.input.display(), "loading source data");
    let table = SourceTable::load(&config.input)?;
    run_on_table(&table, config)
}

/// Write the rate tables for an already-loaded table.
///
/// Fails before writing anything if the region column or any basis'
/// population column is missing. Metrics missing from the table are
/// warned about once and skipped.
pub fn run_on_table(table: &SourceTable, config: &RunConfig) -> Result<RunSummary> {
    if !table.has_column(REGION_COLUMN) {
        return Err(RateError::missing_column(REGION_COLUMN, "region identifier"));
    }
    for basis in &config.bases {
        if !table.has_column(&basis.population_column) {
            return Err(RateError::missing_column(
                &basis.population_column,
                format!("population basis {}", basis.name),
            ));
        }
    }

    let mut present = Vec::with_capacity(config.metrics.len());
    let mut skipped = Vec::new();
    for metric in &config.metrics {
        match check_metric(table, metric) {
            Ok(()) => present.push(metric.as_str()),
            Err(e) if e.is_skippable() => {
                warn!("{e}; skipping");
                skipped.push(metric.clone());
            }
            Err(e) => return Err(e),
        }
    }

    let mut written = Vec::with_capacity(config.bases.len());
    for basis in &config.bases {
        let report = run_basis(table, basis, &present, config)?;
        info!(
            basis = %report.basis,
            count = report.files.len(),
            dir = %report.dir.display(),
            "completed {} outputs",
            report.basis
        );
        written.push(report);
    }

    Ok(RunSummary { written, skipped })
}

fn run_basis(
    table: &SourceTable,
    basis: &PopulationBasis,
    metrics: &[&str],
    config: &RunConfig,
) -> Result<BasisReport> {
    let dir = basis.output_dir(&config.output_root);
    fs::create_dir_all(&dir)?;

    // Each metric writes its own file; the table is only read.
    let files = metrics
        .par_iter()
        .map(|metric| {
            build_metric_table(
                table,
                metric,
                &dir,
                &basis.population_column,
                &basis.label_suffix,
                &basis.file_suffix,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    for path in &files {
        info!("wrote {}", path.display());
    }

    Ok(BasisReport {
        basis: basis.name.clone(),
        dir,
        files,
    })
}
