use crate::utils::error::{AnalysisError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AnalysisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AnalysisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnalysisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 檔名樣式只允許單層檔名，不可包含路徑分隔符
pub fn validate_file_pattern(field_name: &str, pattern: &str) -> Result<()> {
    validate_non_empty_string(field_name, pattern)?;

    if pattern.contains('/') || pattern.contains('\\') {
        return Err(AnalysisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: "Pattern must match a file name, not a path".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        validate_non_empty_string(field_name, name)?;
        if !seen.insert(name) {
            return Err(AnalysisError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Duplicate name".to_string(),
            });
        }
    }

    if seen.is_empty() {
        return Err(AnalysisError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("analysis.output_file", "results.json").is_ok());
        assert!(validate_path("analysis.output_file", "").is_err());
        assert!(validate_path("analysis.output_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_pattern() {
        assert!(validate_file_pattern("files.cli_pattern", "*fedimint-cli*.log").is_ok());
        assert!(validate_file_pattern("files.cli_pattern", "   ").is_err());
        assert!(validate_file_pattern("files.cli_pattern", "logs/*.log").is_err());
    }

    #[test]
    fn test_validate_unique_names() {
        assert!(validate_unique_names("variants", ["baseline", "candidate"]).is_ok());
        assert!(validate_unique_names("variants", ["baseline", "baseline"]).is_err());
        assert!(validate_unique_names("variants", ["baseline", ""]).is_err());

        let empty: [&str; 0] = [];
        assert!(matches!(
            validate_unique_names("variants", empty),
            Err(AnalysisError::MissingConfigError { .. })
        ));
    }
}
