use crate::core::test_run::TestRunAnalyzer;
use crate::domain::model::{TestRunAnalysis, VariantAnalysis, VariantSummary};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub struct VariantAnalyzer {
    runs: TestRunAnalyzer,
    run_prefix: String,
}

impl VariantAnalyzer {
    pub fn new(runs: TestRunAnalyzer, run_prefix: impl Into<String>) -> Self {
        Self {
            runs,
            run_prefix: run_prefix.into(),
        }
    }

    /// 版本目錄下所有以 run_prefix 開頭的子目錄，依名稱排序
    pub fn discover_runs(&self, variant_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut runs = Vec::new();
        for entry in std::fs::read_dir(variant_dir)? {
            let entry = entry?;
            // 跟隨符號連結
            if !entry.path().is_dir() {
                continue;
            }
            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&self.run_prefix))
            {
                runs.push(entry.path());
            }
        }
        runs.sort();
        Ok(runs)
    }

    pub fn analyze(&self, variant_dir: &Path) -> Result<VariantAnalysis> {
        let run_dirs = self.discover_runs(variant_dir)?;
        tracing::debug!(
            "Found {} test runs in {}",
            run_dirs.len(),
            variant_dir.display()
        );

        let test_runs = run_dirs
            .iter()
            .map(|dir| self.runs.analyze(dir))
            .collect::<Result<Vec<_>>>()?;

        Ok(VariantAnalysis {
            version_dir: variant_dir.display().to_string(),
            summary: summarize(&test_runs),
            test_runs,
        })
    }
}

/// Aggregate run analyses. Durations and success come from the client log
/// only; errors and warnings are summed over client and peer logs.
pub fn summarize(test_runs: &[TestRunAnalysis]) -> VariantSummary {
    let mut summary = VariantSummary {
        total_runs: test_runs.len() as u64,
        ..Default::default()
    };
    let mut durations = Vec::new();

    for run in test_runs {
        if let Some(cli) = &run.cli_analysis {
            if cli.success {
                summary.successful_runs += 1;
            }
            if let Some(duration) = cli.duration_seconds {
                durations.push(duration);
            }
            summary.total_errors += cli.error_count;
            summary.total_warnings += cli.warn_count;
        }

        if let Some(peer) = &run.peer_analysis {
            summary.total_errors += peer.error_count;
            summary.total_warnings += peer.warn_count;
        }
    }

    if !durations.is_empty() {
        durations.sort_by(f64::total_cmp);
        summary.avg_duration = Some(durations.iter().sum::<f64>() / durations.len() as f64);
        // upper median for even counts
        summary.median_duration = Some(durations[durations.len() / 2]);
        summary.min_duration = durations.first().copied();
        summary.max_duration = durations.last().copied();
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LogFileAnalysis;

    fn run(duration: Option<f64>, success: bool, errors: u64, peer_errors: Option<u64>) -> TestRunAnalysis {
        let mut cli = LogFileAnalysis::new("cli.log");
        cli.duration_seconds = duration;
        cli.success = success;
        cli.error_count = errors;
        cli.warn_count = 1;

        TestRunAnalysis {
            run_dir: "test-run".to_string(),
            cli_analysis: Some(cli),
            peer_analysis: peer_errors.map(|count| LogFileAnalysis {
                error_count: count,
                warn_count: 2,
                ..LogFileAnalysis::new("peer.log")
            }),
        }
    }

    #[test]
    fn test_summary_statistics() {
        let runs = vec![
            run(Some(4.0), true, 0, Some(3)),
            run(Some(1.0), true, 2, None),
            run(Some(3.0), false, 0, Some(1)),
            run(Some(2.0), true, 0, None),
        ];

        let summary = summarize(&runs);

        assert_eq!(summary.total_runs, 4);
        assert_eq!(summary.successful_runs, 3);
        assert_eq!(summary.avg_duration, Some(2.5));
        assert_eq!(summary.median_duration, Some(3.0));
        assert_eq!(summary.min_duration, Some(1.0));
        assert_eq!(summary.max_duration, Some(4.0));
        assert_eq!(summary.total_errors, 6);
        assert_eq!(summary.total_warnings, 8);
    }

    #[test]
    fn test_runs_without_client_log() {
        let runs = vec![TestRunAnalysis {
            run_dir: "test-run-1".to_string(),
            cli_analysis: None,
            peer_analysis: Some(LogFileAnalysis {
                error_count: 5,
                ..LogFileAnalysis::new("peer.log")
            }),
        }];

        let summary = summarize(&runs);

        assert_eq!(summary.total_runs, 1);
        assert_eq!(summary.successful_runs, 0);
        assert_eq!(summary.total_errors, 5);
        assert!(summary.avg_duration.is_none());
        assert!(summary.median_duration.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_runs_and_logs_are_followed() {
        use crate::config::AnalysisConfig;
        use crate::core::log_file::LogScanner;
        use crate::core::test_run::FilePattern;
        use chrono::NaiveDate;
        use std::os::unix::fs::symlink;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let joined = "{\"joined\": \"fed1\"}\n";

        let shared = temp_dir.path().join("shared");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::write(shared.join("real-cli.log"), joined).unwrap();

        let elsewhere = temp_dir.path().join("elsewhere");
        std::fs::create_dir_all(&elsewhere).unwrap();
        std::fs::write(elsewhere.join("run-fedimint-cli.log"), joined).unwrap();

        let variant_dir = temp_dir.path().join("baseline");
        let first_run = variant_dir.join("test-run-1");
        std::fs::create_dir_all(&first_run).unwrap();
        symlink(shared.join("real-cli.log"), first_run.join("run-fedimint-cli.log")).unwrap();
        symlink(&elsewhere, variant_dir.join("test-run-2")).unwrap();

        let config = AnalysisConfig::default();
        let analyzer = VariantAnalyzer::new(
            TestRunAnalyzer::new(
                LogScanner::new(&config, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
                FilePattern::new(&config.files.cli_pattern).unwrap(),
                FilePattern::new(&config.files.peer_pattern).unwrap(),
            ),
            "test-run",
        );

        let analysis = analyzer.analyze(&variant_dir).unwrap();

        assert_eq!(analysis.summary.total_runs, 2);
        assert_eq!(analysis.summary.successful_runs, 2);
        assert!(analysis.test_runs[0].cli_analysis.is_some());
    }
}
