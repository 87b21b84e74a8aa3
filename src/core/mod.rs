pub mod compare;
pub mod engine;
pub mod log_file;
pub mod pipeline;
pub mod test_run;
pub mod timestamp;
pub mod variant;

pub use crate::domain::model::{
    AnalysisResults, LogFileAnalysis, TestRunAnalysis, VariantAnalysis, VariantComparison,
    VariantSummary,
};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
