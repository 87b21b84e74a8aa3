use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 單一日誌檔的分析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogFileAnalysis {
    pub file: String,
    pub error_count: u64,
    pub warn_count: u64,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
    pub duration_seconds: Option<f64>,
    pub success: bool,
    pub notable_issues: Vec<String>,
}

impl LogFileAnalysis {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Issue labels with their occurrence count, in first-seen order.
    pub fn issue_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for issue in &self.notable_issues {
            match counts.iter_mut().find(|(label, _)| *label == issue.as_str()) {
                Some((_, count)) => *count += 1,
                None => counts.push((issue.as_str(), 1)),
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRunAnalysis {
    pub run_dir: String,
    pub cli_analysis: Option<LogFileAnalysis>,
    pub peer_analysis: Option<LogFileAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub total_runs: u64,
    pub successful_runs: u64,
    pub avg_duration: Option<f64>,
    pub median_duration: Option<f64>,
    pub min_duration: Option<f64>,
    pub max_duration: Option<f64>,
    pub total_errors: u64,
    pub total_warnings: u64,
}

impl VariantSummary {
    /// Success rate in percent; a variant without runs has a rate of 0.
    pub fn success_rate(&self) -> f64 {
        if self.total_runs == 0 {
            0.0
        } else {
            self.successful_runs as f64 / self.total_runs as f64 * 100.0
        }
    }

    pub fn duration_range(&self) -> Option<f64> {
        match (self.min_duration, self.max_duration) {
            (Some(min), Some(max)) => Some(max - min),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantAnalysis {
    pub version_dir: String,
    pub test_runs: Vec<TestRunAnalysis>,
    pub summary: VariantSummary,
}

/// 所有版本的分析結果，序列化為 `{ "<variant>": { ... } }`，保留分析順序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResults {
    variants: Vec<(String, VariantAnalysis)>,
}

impl AnalysisResults {
    pub fn get(&self, variant: &str) -> Option<&VariantAnalysis> {
        self.variants
            .iter()
            .find(|(name, _)| name == variant)
            .map(|(_, analysis)| analysis)
    }

    /// Replaces an existing entry in place, otherwise appends.
    pub fn insert(&mut self, variant: impl Into<String>, analysis: VariantAnalysis) {
        let variant = variant.into();
        match self.variants.iter_mut().find(|(name, _)| *name == variant) {
            Some((_, existing)) => *existing = analysis,
            None => self.variants.push((variant, analysis)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }
}

impl Serialize for AnalysisResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.variants.iter().map(|(name, analysis)| (name, analysis)))
    }
}

impl<'de> Deserialize<'de> for AnalysisResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultsVisitor;

        impl<'de> Visitor<'de> for ResultsVisitor {
            type Value = AnalysisResults;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of variant name to analysis")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut results = AnalysisResults::default();
                while let Some((name, analysis)) = map.next_entry::<String, VariantAnalysis>()? {
                    results.insert(name, analysis);
                }
                Ok(results)
            }
        }

        deserializer.deserialize_map(ResultsVisitor)
    }
}

/// Deltas of one variant against the baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantComparison {
    pub variant: String,
    pub avg_change_seconds: Option<f64>,
    pub avg_change_percent: Option<f64>,
    pub median_change_percent: Option<f64>,
    pub min_change_percent: Option<f64>,
    pub max_change_percent: Option<f64>,
    pub error_change: i64,
    pub warning_change: i64,
    pub success_rate_change: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_counts_keep_first_seen_order() {
        let mut analysis = LogFileAnalysis::new("cli.log");
        analysis.notable_issues = vec![
            "DNS resolution failure".to_string(),
            "Disco box error".to_string(),
            "DNS resolution failure".to_string(),
        ];

        assert_eq!(
            analysis.issue_counts(),
            vec![("DNS resolution failure", 2), ("Disco box error", 1)]
        );
    }

    #[test]
    fn test_success_rate_without_runs() {
        let summary = VariantSummary::default();
        assert_eq!(summary.success_rate(), 0.0);
        assert_eq!(summary.duration_range(), None);
    }

    #[test]
    fn test_results_serialize_as_plain_object() {
        let mut results = AnalysisResults::default();
        results.insert("baseline", VariantAnalysis::default());

        let json = serde_json::to_value(&results).unwrap();
        assert!(json.get("baseline").is_some());
        assert_eq!(json["baseline"]["summary"]["total_runs"], 0);
        assert!(json["baseline"]["summary"]["avg_duration"].is_null());
    }

    #[test]
    fn test_results_keep_insertion_order() {
        let mut results = AnalysisResults::default();
        results.insert("v0.8.0-beta.2-with-n0-infra", VariantAnalysis::default());
        results.insert("v0.8.0-beta.2-n0-only-infra", VariantAnalysis::default());
        results.insert("baseline", VariantAnalysis::default());
        results.insert("v0.8.0-beta.2-with-n0-infra", VariantAnalysis::default());

        let json = serde_json::to_string(&results).unwrap();
        let with_pos = json.find("with-n0-infra").unwrap();
        let only_pos = json.find("n0-only-infra").unwrap();
        let baseline_pos = json.find("baseline").unwrap();
        assert!(with_pos < only_pos && only_pos < baseline_pos);

        let parsed: AnalysisResults = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.names().collect::<Vec<_>>(),
            vec!["v0.8.0-beta.2-with-n0-infra", "v0.8.0-beta.2-n0-only-infra", "baseline"]
        );
    }
}
