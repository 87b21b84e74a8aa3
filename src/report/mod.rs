pub mod markdown;
pub mod summary;

pub use markdown::render_markdown;
pub use summary::render_summary;

use crate::domain::model::AnalysisResults;
use crate::domain::ports::Storage;
use crate::utils::error::{AnalysisError, Result};

/// 讀取 `analyze` 產生的結果檔
pub async fn load_results<S: Storage>(storage: &S, path: &str) -> Result<AnalysisResults> {
    let data = storage.read_file(path).await.map_err(|e| match e {
        AnalysisError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            AnalysisError::ResultsNotFound {
                path: path.to_string(),
            }
        }
        other => other,
    })?;

    let results: AnalysisResults = serde_json::from_slice(&data)?;
    tracing::debug!("Loaded results for {} variants from {}", results.len(), path);
    Ok(results)
}
