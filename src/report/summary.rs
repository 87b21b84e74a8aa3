use crate::config::AnalysisConfig;
use crate::core::compare::compare;
use crate::domain::model::AnalysisResults;

/// Plain-text summary printed after `analyze`.
pub fn render_summary(results: &AnalysisResults, config: &AnalysisConfig) -> String {
    let banner = "=".repeat(60);
    let rule = "-".repeat(40);

    let mut lines = vec![
        banner.clone(),
        format!("{} LOG ANALYSIS SUMMARY", config.analysis.name.to_uppercase()),
        banner,
    ];

    for name in config.variant_names() {
        let Some(variant) = results.get(name) else {
            continue;
        };
        let summary = &variant.summary;

        lines.push(String::new());
        lines.push(name.to_uppercase());
        lines.push(rule.clone());
        lines.push(format!("Total runs: {}", summary.total_runs));
        lines.push(format!("Successful runs: {}", summary.successful_runs));
        lines.push(format!(
            "Success rate: {}/{} ({:.1}%)",
            summary.successful_runs,
            summary.total_runs,
            summary.success_rate()
        ));

        match summary.avg_duration.filter(|avg| *avg != 0.0) {
            Some(avg) => {
                lines.push("Join duration statistics:".to_string());
                lines.push(format!("  Average: {:.2}s", avg));
                lines.push(format!("  Median: {}", seconds(summary.median_duration)));
                lines.push(format!("  Min: {}", seconds(summary.min_duration)));
                lines.push(format!("  Max: {}", seconds(summary.max_duration)));
            }
            None => lines.push("Join duration: N/A".to_string()),
        }

        lines.push(format!("Total errors: {}", summary.total_errors));
        lines.push(format!("Total warnings: {}", summary.total_warnings));
    }

    if let Some(baseline) = results.get(config.baseline()) {
        lines.push(String::new());
        lines.push(format!("COMPARATIVE ANALYSIS (vs {})", config.baseline()));
        lines.push(rule);

        for name in config.variant_names().filter(|name| *name != config.baseline()) {
            let Some(variant) = results.get(name) else {
                continue;
            };
            let cmp = compare(name, &baseline.summary, &variant.summary);

            lines.push(String::new());
            lines.push(format!("{}:", name));

            // 任一方平均為 0 或缺少時視同無資料
            let has_avg = variant.summary.avg_duration.is_some_and(|avg| avg != 0.0);
            if let (true, Some(secs), Some(pct)) =
                (has_avg, cmp.avg_change_seconds, cmp.avg_change_percent)
            {
                lines.push(format!("  Duration change: {:+.2}s ({:+.1}%)", secs, pct));
            }
            lines.push(format!("  Error change: {:+}", cmp.error_change));
            lines.push(format!("  Warning change: {:+}", cmp.warning_change));
            lines.push(format!("  Success rate change: {:+.1}%", cmp.success_rate_change));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn seconds(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}s", v))
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{VariantAnalysis, VariantSummary};

    fn variant(avg: Option<f64>, successful: u64, total: u64, errors: u64) -> VariantAnalysis {
        VariantAnalysis {
            version_dir: String::new(),
            test_runs: Vec::new(),
            summary: VariantSummary {
                total_runs: total,
                successful_runs: successful,
                avg_duration: avg,
                median_duration: avg,
                min_duration: avg,
                max_duration: avg,
                total_errors: errors,
                total_warnings: 0,
            },
        }
    }

    #[test]
    fn test_summary_with_comparison() {
        let config = AnalysisConfig::default();
        let mut results = AnalysisResults::default();
        results.insert("baseline", variant(Some(2.0), 5, 5, 1));
        results.insert("v0.8.0-beta.2", variant(Some(5.0), 4, 5, 4));

        let text = render_summary(&results, &config);

        assert!(text.starts_with(&"=".repeat(60)));
        assert!(text.contains("FEDIMINT LOG ANALYSIS SUMMARY"));
        assert!(text.contains("BASELINE\n"));
        assert!(text.contains("Success rate: 5/5 (100.0%)"));
        assert!(text.contains("  Average: 2.00s"));
        assert!(text.contains("COMPARATIVE ANALYSIS (vs baseline)"));
        assert!(text.contains("  Duration change: +3.00s (+150.0%)"));
        assert!(text.contains("  Error change: +3"));
        assert!(text.contains("  Warning change: +0"));
        assert!(text.contains("  Success rate change: -20.0%"));
        assert!(!text.contains("V0.8.0-BETA.2-WITH-N0-INFRA"));
    }

    #[test]
    fn test_summary_without_durations_or_baseline() {
        let config = AnalysisConfig::default();
        let mut results = AnalysisResults::default();
        results.insert("v0.8.0-beta.2", variant(None, 0, 0, 0));

        let text = render_summary(&results, &config);

        assert!(text.contains("Success rate: 0/0 (0.0%)"));
        assert!(text.contains("Join duration: N/A"));
        assert!(!text.contains("COMPARATIVE ANALYSIS"));
    }

    #[test]
    fn test_zero_average_has_no_duration_change() {
        let config = AnalysisConfig::default();
        let mut results = AnalysisResults::default();
        results.insert("baseline", variant(Some(2.0), 2, 2, 0));
        results.insert("v0.8.0-beta.2", variant(Some(0.0), 2, 2, 0));

        let text = render_summary(&results, &config);

        assert!(text.contains("Join duration: N/A"));
        assert!(text.contains("v0.8.0-beta.2:\n  Error change: +0"));
        assert!(!text.contains("Duration change"));
    }
}
