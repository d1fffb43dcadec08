#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, EstimateCommand};
pub use toml_config::{BatchConfig, JobErrorPolicy, OutputFormat};
