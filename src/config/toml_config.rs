use crate::utils::error::{AnalysisError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub analysis: AnalysisSection,
    pub variants: Vec<VariantConfig>,
    pub files: FilesConfig,
    pub markers: MarkersConfig,
    pub issues: Vec<IssuePattern>,
    pub report: ReportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub name: String,
    pub base_dir: String,
    pub output_file: String,
    pub run_prefix: String,
    pub baseline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub cli_pattern: String,
    pub peer_pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkersConfig {
    pub error: String,
    pub warn: String,
    pub success: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuePattern {
    pub pattern: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            name: "fedimint".to_string(),
            base_dir: ".".to_string(),
            output_file: "log_analysis_results.json".to_string(),
            run_prefix: "test-run".to_string(),
            baseline: "baseline".to_string(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            cli_pattern: "*fedimint-cli*.log".to_string(),
            peer_pattern: "*fedimintd-peer0*.log".to_string(),
        }
    }
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            error: "ERROR".to_string(),
            warn: "WARN".to_string(),
            success: "\"joined\"".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "FEDIMINT v0.8.0-beta.2 REGRESSION ANALYSIS - DETAILED REPORT".to_string(),
        }
    }
}

impl VariantConfig {
    pub fn new(name: impl Into<String>, display_name: Option<&str>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.map(str::to_string),
        }
    }
}

impl IssuePattern {
    pub fn new(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisSection::default(),
            variants: vec![
                VariantConfig::new("baseline", Some("v0.7.2 (baseline)")),
                VariantConfig::new("v0.8.0-beta.2", Some("v0.8.0-beta.2 (self-hosted)")),
                VariantConfig::new("v0.8.0-beta.2-with-n0-infra", Some("v0.8.0-beta.2 (mixed)")),
                VariantConfig::new("v0.8.0-beta.2-n0-only-infra", Some("v0.8.0-beta.2 (n0-only)")),
            ],
            files: FilesConfig::default(),
            markers: MarkersConfig::default(),
            issues: vec![
                IssuePattern::new("disco box", "Disco box error"),
                IssuePattern::new("dns.iroh.link", "DNS resolution failure"),
                IssuePattern::new("pkarr publish error", "PKarr protocol error"),
                IssuePattern::new("failed to open disco box", "Failed to open disco box"),
            ],
            report: ReportConfig::default(),
            monitoring: None,
        }
    }
}

impl AnalysisConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalysisError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnalysisError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LOG_ROOT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("analysis.name", &self.analysis.name)?;
        validation::validate_path("analysis.base_dir", &self.analysis.base_dir)?;
        validation::validate_path("analysis.output_file", &self.analysis.output_file)?;
        validation::validate_non_empty_string("analysis.run_prefix", &self.analysis.run_prefix)?;

        validation::validate_unique_names(
            "variants",
            self.variants.iter().map(|v| v.name.as_str()),
        )?;

        if !self.variants.iter().any(|v| v.name == self.analysis.baseline) {
            return Err(AnalysisError::InvalidConfigValueError {
                field: "analysis.baseline".to_string(),
                value: self.analysis.baseline.clone(),
                reason: "Baseline must be one of the configured variants".to_string(),
            });
        }

        validation::validate_file_pattern("files.cli_pattern", &self.files.cli_pattern)?;
        validation::validate_file_pattern("files.peer_pattern", &self.files.peer_pattern)?;

        validation::validate_non_empty_string("markers.error", &self.markers.error)?;
        validation::validate_non_empty_string("markers.warn", &self.markers.warn)?;
        validation::validate_non_empty_string("markers.success", &self.markers.success)?;

        for (index, issue) in self.issues.iter().enumerate() {
            validation::validate_non_empty_string(&format!("issues[{}].pattern", index), &issue.pattern)?;
            validation::validate_non_empty_string(&format!("issues[{}].label", index), &issue.label)?;
        }

        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        Path::new(&self.analysis.base_dir)
    }

    pub fn output_file(&self) -> &str {
        &self.analysis.output_file
    }

    pub fn baseline(&self) -> &str {
        &self.analysis.baseline
    }

    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }

    /// 報表顯示名稱，未設定時使用版本名稱
    pub fn display_name<'a>(&'a self, variant: &'a str) -> &'a str {
        self.variants
            .iter()
            .find(|v| v.name == variant)
            .and_then(|v| v.display_name.as_deref())
            .unwrap_or(variant)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
