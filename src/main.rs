use chrono::Local;
use clap::Parser;
use runlog::config::Command;
use runlog::domain::ports::Storage;
use runlog::report::{self, render_markdown, render_summary};
use runlog::utils::error::ErrorSeverity;
use runlog::utils::{logger, validation::Validate};
use runlog::{AnalysisConfig, AnalysisEngine, AnalysisError, CliConfig, LocalStorage, RegressionPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting runlog");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match &cli.command {
        Command::Analyze { .. } => run_analyze(config).await,
        Command::Report { output, .. } => run_report(&config, output.as_deref()).await,
    };

    if let Err(e) = outcome {
        exit_with(e);
    }

    Ok(())
}

async fn run_analyze(config: AnalysisConfig) -> runlog::Result<()> {
    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let summary_config = config.clone();
    let storage = LocalStorage::new(".");
    let pipeline = RegressionPipeline::new(storage, config, Local::now().date_naive())?;
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    let outcome = engine.run().await?;

    println!();
    print!("{}", render_summary(&outcome.results, &summary_config));
    println!();
    println!("📁 Results saved to: {}", outcome.output_path);

    Ok(())
}

async fn run_report(config: &AnalysisConfig, output: Option<&str>) -> runlog::Result<()> {
    let storage = LocalStorage::new(".");
    let results = report::load_results(&storage, config.output_file()).await?;
    let markdown = render_markdown(&results, config);

    match output {
        Some(path) => {
            storage.write_file(path, markdown.as_bytes()).await?;
            tracing::info!("📝 Report written to: {}", path);
        }
        None => print!("{}", markdown),
    }

    Ok(())
}

fn exit_with(e: AnalysisError) -> ! {
    tracing::error!(
        "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
