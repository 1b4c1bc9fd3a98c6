pub mod config;
pub mod driver;
pub mod error;
pub mod process;

pub use config::{PopulationBasis, RunConfig, METRICS, REGION_COLUMN};
pub use driver::{run, BasisReport, RunSummary};
pub use error::{RateError, Result};
