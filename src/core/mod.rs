pub mod batch;
pub mod engine;
pub mod report;

pub use crate::domain::model::{CalculatorKind, Estimate, EstimateRequest, Metric};
pub use crate::domain::ports::{Calculator, Storage};
pub use crate::utils::error::Result;
