// src/config.rs

use std::path::{Path, PathBuf};

/// Veteran categories with a per-region count column in the source data.
pub const METRICS: [&str; 7] = [
    "allVeterans",
    "peacetimeVeterans",
    "wartimeVeterans",
    "ww2",
    "koreanWar",
    "vietnamWar",
    "gulfWar",
];

/// Row key carried into every output table.
pub const REGION_COLUMN: &str = "state";

/// Denominator used to normalise a metric, plus the naming it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationBasis {
    /// Human-readable name, used in log lines.
    pub name: String,
    /// Source column holding the denominator.
    pub population_column: String,
    /// Appended to the `Per100k` / `Pct` column labels.
    pub label_suffix: String,
    /// Appended to the kebab-case metric name before `.csv`.
    pub file_suffix: String,
    /// Directory under the output root that receives this basis' files.
    pub output_subdir: String,
}

impl PopulationBasis {
    pub fn new(
        name: &str,
        population_column: &str,
        label_suffix: &str,
        file_suffix: &str,
        output_subdir: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            population_column: population_column.to_string(),
            label_suffix: label_suffix.to_string(),
            file_suffix: file_suffix.to_string(),
            output_subdir: output_subdir.to_string(),
        }
    }

    /// Rates over total population: `<metric>Per100k`, `<kebab>-rate.csv`.
    pub fn all_population() -> Self {
        Self::new("all-population", "population", "", "-rate", "all-population")
    }

    /// Rates over adult population: `<metric>Per100kAdults`, `<kebab>-adult-rate.csv`.
    pub fn adult_population() -> Self {
        Self::new(
            "adult-population",
            "adultPopulation",
            "Adults",
            "-adult-rate",
            "adult-population",
        )
    }

    pub fn standard() -> Vec<Self> {
        vec![Self::all_population(), Self::adult_population()]
    }

    pub fn output_dir(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.output_subdir)
    }
}

/// Everything a run needs, handed to the driver explicitly.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_root: PathBuf,
    pub metrics: Vec<String>,
    pub bases: Vec<PopulationBasis>,
}

impl RunConfig {
    /// Standing layout relative to a repository root:
    /// `data/veteran-data-2023.csv` in, `output/<basis>/` out.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            input: root.join("data").join("veteran-data-2023.csv"),
            output_root: root.join("output"),
            metrics: METRICS.iter().map(|m| m.to_string()).collect(),
            bases: PopulationBasis::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_bases_match_naming_conventions() {
        let bases = PopulationBasis::standard();
        assert_eq!(bases.len(), 2);

        assert_eq!(bases[0].population_column, "population");
        assert_eq!(bases[0].label_suffix, "");
        assert_eq!(bases[0].file_suffix, "-rate");

        assert_eq!(bases[1].population_column, "adultPopulation");
        assert_eq!(bases[1].label_suffix, "Adults");
        assert_eq!(bases[1].file_suffix, "-adult-rate");
    }

    #[test]
    fn for_root_lays_out_paths() {
        let cfg = RunConfig::for_root("/repo");
        assert_eq!(cfg.input, PathBuf::from("/repo/data/veteran-data-2023.csv"));
        assert_eq!(
            cfg.bases[1].output_dir(&cfg.output_root),
            PathBuf::from("/repo/output/adult-population")
        );
        assert_eq!(cfg.metrics.len(), 7);
        assert_eq!(cfg.metrics[0], "allVeterans");
        assert_eq!(cfg.metrics[6], "gulfWar");
    }
}
