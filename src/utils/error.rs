use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid file pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Results file not found: {path}")]
    ResultsNotFound { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalysisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalysisError::IoError(_) | AnalysisError::ResultsNotFound { .. } => ErrorCategory::Io,
            AnalysisError::SerializationError(_) => ErrorCategory::Data,
            AnalysisError::PatternError(_)
            | AnalysisError::ConfigValidationError { .. }
            | AnalysisError::InvalidConfigValueError { .. }
            | AnalysisError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 設定錯誤需要使用者修正後重跑
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Io => match self {
                AnalysisError::ResultsNotFound { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalysisError::IoError(e) => format!("Could not access a file or directory: {}", e),
            AnalysisError::SerializationError(e) => {
                format!("The results data could not be read or written as JSON: {}", e)
            }
            AnalysisError::PatternError(e) => format!("A log file pattern is not valid: {}", e),
            AnalysisError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            AnalysisError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' has an invalid value '{}': {}", field, value, reason),
            AnalysisError::MissingConfigError { field } => {
                format!("The setting '{}' is required", field)
            }
            AnalysisError::ResultsNotFound { path } => {
                format!("No analysis results found at '{}'", path)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnalysisError::IoError(_) => {
                "Check that the base directory exists and that the output location is writable"
            }
            AnalysisError::SerializationError(_) => {
                "Regenerate the results file with `runlog analyze`"
            }
            AnalysisError::PatternError(_) => {
                "Use plain file name globs such as '*fedimint-cli*.log' in [files]"
            }
            AnalysisError::ConfigValidationError { .. }
            | AnalysisError::InvalidConfigValueError { .. }
            | AnalysisError::MissingConfigError { .. } => {
                "Fix the configuration file and run the command again"
            }
            AnalysisError::ResultsNotFound { .. } => {
                "Run `runlog analyze` first or pass --results with the right path"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = AnalysisError::MissingConfigError {
            field: "analysis.baseline".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("analysis.baseline"));
    }

    #[test]
    fn test_missing_results_is_recoverable() {
        let err = AnalysisError::ResultsNotFound {
            path: "log_analysis_results.json".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("runlog analyze"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: AnalysisError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
