use crate::domain::model::{AnalysisResults, VariantAnalysis};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// 掃描並分析每個版本目錄
    async fn extract(&self) -> Result<Vec<(String, VariantAnalysis)>>;
    async fn transform(&self, variants: Vec<(String, VariantAnalysis)>) -> Result<AnalysisResults>;
    /// 寫出結果，回傳輸出路徑
    async fn load(&self, results: &AnalysisResults) -> Result<String>;
}
