pub mod adapters;
pub mod calculators;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::{BatchConfig, OutputFormat};
pub use core::{batch::BatchRunner, engine::EstimateEngine};
pub use domain::model::{CalculatorKind, Estimate, EstimateRequest};
pub use utils::error::{EstimatorError, Result};
