use crate::config::AnalysisConfig;
use crate::core::log_file::LogScanner;
use crate::core::test_run::{FilePattern, TestRunAnalyzer};
use crate::core::variant::VariantAnalyzer;
use crate::core::{AnalysisResults, Pipeline, Storage, VariantAnalysis};
use crate::utils::error::Result;
use chrono::NaiveDate;

pub struct RegressionPipeline<S: Storage> {
    storage: S,
    config: AnalysisConfig,
    analyzer: VariantAnalyzer,
}

impl<S: Storage> RegressionPipeline<S> {
    /// `reference_date` dates log lines that only carry a time of day.
    pub fn new(storage: S, config: AnalysisConfig, reference_date: NaiveDate) -> Result<Self> {
        let runs = TestRunAnalyzer::new(
            LogScanner::new(&config, reference_date),
            FilePattern::new(&config.files.cli_pattern)?,
            FilePattern::new(&config.files.peer_pattern)?,
        );
        let analyzer = VariantAnalyzer::new(runs, config.analysis.run_prefix.clone());

        Ok(Self {
            storage,
            config,
            analyzer,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for RegressionPipeline<S> {
    async fn extract(&self) -> Result<Vec<(String, VariantAnalysis)>> {
        let mut variants = Vec::new();

        for name in self.config.variant_names() {
            let variant_dir = self.config.base_dir().join(name);
            if !variant_dir.is_dir() {
                tracing::warn!("Directory {} not found", name);
                continue;
            }

            tracing::info!("Analyzing {}...", name);
            let analysis = self.analyzer.analyze(&variant_dir)?;
            tracing::info!(
                variant = name,
                runs = analysis.summary.total_runs,
                successful = analysis.summary.successful_runs,
                "Variant analyzed"
            );
            variants.push((name.to_string(), analysis));
        }

        Ok(variants)
    }

    async fn transform(&self, variants: Vec<(String, VariantAnalysis)>) -> Result<AnalysisResults> {
        let mut results = AnalysisResults::default();
        for (name, analysis) in variants {
            results.insert(name, analysis);
        }

        if results.is_empty() {
            tracing::warn!(
                "No variant directories found under {}",
                self.config.base_dir().display()
            );
        } else if results.get(self.config.baseline()).is_none() {
            tracing::warn!(
                "Baseline '{}' was not analyzed; comparisons will be skipped",
                self.config.baseline()
            );
        }

        Ok(results)
    }

    async fn load(&self, results: &AnalysisResults) -> Result<String> {
        let json = serde_json::to_string_pretty(results)?;
        let output_file = self.config.output_file();

        self.storage.write_file(output_file, json.as_bytes()).await?;
        tracing::debug!("Wrote {} bytes to {}", json.len(), output_file);

        Ok(output_file.to_string())
    }
}
