use crate::core::{AnalysisResults, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub results: AnalysisResults,
    pub output_path: String,
}

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<AnalysisOutcome> {
        tracing::info!("Starting log analysis...");
        self.monitor.log_stats("Start");

        // Extract
        let variants = self.pipeline.extract().await?;
        tracing::info!("Analyzed {} variant directories", variants.len());
        self.monitor.log_stats("Extract");

        // Transform
        let results = self.pipeline.transform(variants).await?;
        self.monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(&results).await?;
        tracing::info!("Results saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();

        Ok(AnalysisOutcome {
            results,
            output_path,
        })
    }
}
