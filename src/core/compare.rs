use crate::domain::model::{VariantComparison, VariantSummary};

fn percent_change(baseline: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (baseline, value) {
        (Some(base), Some(value)) if base != 0.0 => Some((value - base) / base * 100.0),
        _ => None,
    }
}

/// Compare one variant's summary against the baseline summary.
pub fn compare(variant: &str, baseline: &VariantSummary, summary: &VariantSummary) -> VariantComparison {
    let avg_change_seconds = match (baseline.avg_duration, summary.avg_duration) {
        (Some(base), Some(avg)) => Some(avg - base),
        _ => None,
    };

    VariantComparison {
        variant: variant.to_string(),
        avg_change_seconds,
        avg_change_percent: percent_change(baseline.avg_duration, summary.avg_duration),
        median_change_percent: percent_change(baseline.median_duration, summary.median_duration),
        min_change_percent: percent_change(baseline.min_duration, summary.min_duration),
        max_change_percent: percent_change(baseline.max_duration, summary.max_duration),
        error_change: summary.total_errors as i64 - baseline.total_errors as i64,
        warning_change: summary.total_warnings as i64 - baseline.total_warnings as i64,
        success_rate_change: summary.success_rate() - baseline.success_rate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(avg: Option<f64>, errors: u64, successful: u64, total: u64) -> VariantSummary {
        VariantSummary {
            total_runs: total,
            successful_runs: successful,
            avg_duration: avg,
            median_duration: avg,
            min_duration: avg,
            max_duration: avg,
            total_errors: errors,
            total_warnings: errors * 2,
        }
    }

    #[test]
    fn test_slower_variant() {
        let baseline = summary(Some(4.0), 2, 5, 5);
        let candidate = summary(Some(10.0), 7, 4, 5);

        let cmp = compare("v0.8.0-beta.2", &baseline, &candidate);

        assert_eq!(cmp.avg_change_seconds, Some(6.0));
        assert_eq!(cmp.avg_change_percent, Some(150.0));
        assert_eq!(cmp.median_change_percent, Some(150.0));
        assert_eq!(cmp.error_change, 5);
        assert_eq!(cmp.warning_change, 10);
        assert!((cmp.success_rate_change - -20.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_or_zero_baseline_durations() {
        let baseline = summary(Some(0.0), 3, 0, 0);
        let candidate = summary(None, 1, 1, 2);

        let cmp = compare("candidate", &baseline, &candidate);

        assert_eq!(cmp.avg_change_seconds, None);
        assert_eq!(cmp.avg_change_percent, None);
        assert_eq!(cmp.error_change, -2);
        assert_eq!(cmp.success_rate_change, 50.0);

        let zero = compare("candidate", &baseline, &summary(Some(1.0), 3, 0, 0));
        assert_eq!(zero.avg_change_seconds, Some(1.0));
        assert_eq!(zero.avg_change_percent, None);
    }
}
