use crate::config::toml_config::{AnalysisConfig, IssuePattern, MarkersConfig};
use crate::core::timestamp::parse_timestamp;
use crate::domain::model::LogFileAnalysis;
use chrono::NaiveDate;
use std::path::Path;

/// Line-oriented scanner that turns a log file into a [`LogFileAnalysis`].
#[derive(Debug, Clone)]
pub struct LogScanner {
    markers: MarkersConfig,
    /// Issue signatures with their patterns already lower-cased.
    issues: Vec<IssuePattern>,
    reference_date: NaiveDate,
}

impl LogScanner {
    pub fn new(config: &AnalysisConfig, reference_date: NaiveDate) -> Self {
        let issues = config
            .issues
            .iter()
            .map(|issue| IssuePattern {
                pattern: issue.pattern.to_lowercase(),
                label: issue.label.clone(),
            })
            .collect();

        Self {
            markers: config.markers.clone(),
            issues,
            reference_date,
        }
    }

    /// 讀取並分析單一日誌檔；讀取失敗時記錄在 notable_issues 而非回傳錯誤
    pub fn analyze_file(&self, path: &Path) -> LogFileAnalysis {
        let label = path.display().to_string();

        match std::fs::read(path) {
            Ok(bytes) => self.analyze_content(label, &String::from_utf8_lossy(&bytes)),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", label, e);
                let mut analysis = LogFileAnalysis::new(label);
                analysis
                    .notable_issues
                    .push(format!("Failed to read file: {}", e));
                analysis
            }
        }
    }

    pub fn analyze_content(&self, file: impl Into<String>, content: &str) -> LogFileAnalysis {
        let mut analysis = LogFileAnalysis::new(file);

        for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if line.contains(&self.markers.error) {
                analysis.error_count += 1;
            }
            if line.contains(&self.markers.warn) {
                analysis.warn_count += 1;
            }

            if let Some(ts) = parse_timestamp(line, self.reference_date) {
                if analysis.first_timestamp.is_none() {
                    analysis.first_timestamp = Some(ts);
                }
                analysis.last_timestamp = Some(ts);
            }

            if line.contains(&self.markers.success) {
                analysis.success = true;
            }

            let lowered = line.to_lowercase();
            for issue in &self.issues {
                if lowered.contains(&issue.pattern) {
                    analysis.notable_issues.push(issue.label.clone());
                }
            }
        }

        if let (Some(first), Some(last)) = (analysis.first_timestamp, analysis.last_timestamp) {
            analysis.duration_seconds = (last - first)
                .num_microseconds()
                .map(|micros| micros as f64 / 1_000_000.0);
        }

        tracing::debug!(
            file = %analysis.file,
            errors = analysis.error_count,
            warnings = analysis.warn_count,
            success = analysis.success,
            "Analyzed log file"
        );

        analysis
    }
}
