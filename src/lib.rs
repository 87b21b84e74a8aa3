pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, AnalysisConfig};
pub use core::{engine::AnalysisEngine, pipeline::RegressionPipeline};
pub use utils::error::{AnalysisError, Result};
