//! Detailed Markdown report rendered from saved analysis results.

use crate::config::AnalysisConfig;
use crate::core::compare::compare;
use crate::domain::model::{AnalysisResults, TestRunAnalysis, VariantAnalysis};

pub fn render_markdown(results: &AnalysisResults, config: &AnalysisConfig) -> String {
    let mut lines = vec![format!("# {}", config.report.title), String::new()];

    let variants: Vec<(&str, &VariantAnalysis)> = config
        .variant_names()
        .filter_map(|name| results.get(name).map(|analysis| (name, analysis)))
        .collect();

    write_statistics(&mut lines, &variants, config);

    match results.get(config.baseline()) {
        Some(baseline) => {
            write_comparison(&mut lines, baseline, &variants, config);
            write_errors(&mut lines, Some(baseline), &variants, config);
        }
        None => {
            lines.push(format!(
                "_Baseline `{}` not present in results; comparison sections skipped._",
                config.baseline()
            ));
            lines.push(String::new());
            write_errors(&mut lines, None, &variants, config);
        }
    }

    write_run_details(&mut lines, &variants, config);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn write_statistics(lines: &mut Vec<String>, variants: &[(&str, &VariantAnalysis)], config: &AnalysisConfig) {
    lines.push("## Performance Statistics Summary".to_string());
    lines.push(String::new());
    lines.push("| Version | Avg (s) | Median (s) | Min (s) | Max (s) | Range (s) | Success Rate |".to_string());
    lines.push("|---------|---------|------------|---------|---------|-----------|--------------|".to_string());

    for (name, analysis) in variants {
        let summary = &analysis.summary;
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} | {}/{} ({:.0}%) |",
            config.display_name(name),
            fixed(summary.avg_duration),
            fixed(summary.median_duration),
            fixed(summary.min_duration),
            fixed(summary.max_duration),
            fixed(summary.duration_range()),
            summary.successful_runs,
            summary.total_runs,
            summary.success_rate()
        ));
    }
    lines.push(String::new());
}

fn write_comparison(
    lines: &mut Vec<String>,
    baseline: &VariantAnalysis,
    variants: &[(&str, &VariantAnalysis)],
    config: &AnalysisConfig,
) {
    lines.push("## Performance Comparison (vs Baseline)".to_string());
    lines.push(String::new());
    lines.push("| Version | Avg Change | Median Change | Min Change | Max Change |".to_string());
    lines.push("|---------|------------|---------------|------------|------------|".to_string());

    for (name, analysis) in variants.iter().filter(|(name, _)| *name != config.baseline()) {
        let cmp = compare(name, &baseline.summary, &analysis.summary);
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            config.display_name(name),
            percent(cmp.avg_change_percent),
            percent(cmp.median_change_percent),
            percent(cmp.min_change_percent),
            percent(cmp.max_change_percent)
        ));
    }
    lines.push(String::new());
}

fn write_errors(
    lines: &mut Vec<String>,
    baseline: Option<&VariantAnalysis>,
    variants: &[(&str, &VariantAnalysis)],
    config: &AnalysisConfig,
) {
    lines.push("## Error and Warning Analysis".to_string());
    lines.push(String::new());
    lines.push(
        "| Version | Total Errors | Total Warnings | Errors vs Baseline | Warnings vs Baseline |".to_string(),
    );
    lines.push(
        "|---------|--------------|----------------|--------------------|----------------------|".to_string(),
    );

    for (name, analysis) in variants {
        let summary = &analysis.summary;
        let (error_diff, warning_diff) = match baseline {
            Some(baseline) if *name != config.baseline() => {
                let cmp = compare(name, &baseline.summary, summary);
                (
                    format!("{:+}", cmp.error_change),
                    format!("{:+}", cmp.warning_change),
                )
            }
            _ => ("-".to_string(), "-".to_string()),
        };

        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            config.display_name(name),
            summary.total_errors,
            summary.total_warnings,
            error_diff,
            warning_diff
        ));
    }
    lines.push(String::new());
}

fn write_run_details(lines: &mut Vec<String>, variants: &[(&str, &VariantAnalysis)], config: &AnalysisConfig) {
    lines.push("## Individual Test Run Details".to_string());
    lines.push(String::new());

    for (name, analysis) in variants {
        lines.push(format!("### {}", config.display_name(name)));
        lines.push(String::new());
        lines.push("| Run | Duration (s) | Success | CLI Errors | CLI Warnings | Notable Issues |".to_string());
        lines.push("|-----|--------------|---------|------------|--------------|----------------|".to_string());

        for (index, run) in analysis.test_runs.iter().enumerate() {
            lines.push(run_row(index + 1, run));
        }
        lines.push(String::new());
    }
}

fn run_row(number: usize, run: &TestRunAnalysis) -> String {
    let Some(cli) = &run.cli_analysis else {
        return format!("| {} | N/A | ❌ | N/A | N/A | No client log |", number);
    };

    let issues = cli
        .issue_counts()
        .iter()
        .map(|(label, count)| format!("{} ({})", label, count))
        .collect::<Vec<_>>();

    format!(
        "| {} | {} | {} | {} | {} | {} |",
        number,
        fixed(cli.duration_seconds),
        if cli.success { "✅" } else { "❌" },
        cli.error_count,
        cli.warn_count,
        if issues.is_empty() {
            "None".to_string()
        } else {
            issues.join(", ")
        }
    )
}

fn fixed(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:+.1}%", v))
        .unwrap_or_else(|| "N/A".to_string())
}
