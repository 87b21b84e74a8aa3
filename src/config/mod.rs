pub mod cli;
pub mod toml_config;

pub use toml_config::AnalysisConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "runlog")]
#[command(about = "Analyze test-run logs and compare build variants against a baseline")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Analyze every variant directory and write the results JSON
    Analyze {
        /// Directory containing one sub-directory per variant
        #[arg(long)]
        base_dir: Option<String>,

        /// Where to write the results JSON
        #[arg(short, long)]
        output: Option<String>,

        /// Log process CPU/memory between stages
        #[arg(long)]
        monitor: bool,
    },
    /// Render a detailed Markdown report from a results JSON
    Report {
        /// Results JSON produced by `analyze`
        #[arg(long)]
        results: Option<String>,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔 (未指定時使用預設值) 並套用命令列覆蓋
    pub fn load_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        match &self.command {
            Command::Analyze {
                base_dir,
                output,
                monitor,
            } => {
                if let Some(base_dir) = base_dir {
                    config.analysis.base_dir = base_dir.clone();
                }
                if let Some(output) = output {
                    config.analysis.output_file = output.clone();
                }
                if *monitor {
                    config.monitoring = Some(toml_config::MonitoringConfig { enabled: true });
                }
            }
            Command::Report { results, .. } => {
                if let Some(results) = results {
                    config.analysis.output_file = results.clone();
                }
            }
        }

        Ok(config)
    }
}
