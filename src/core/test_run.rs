use crate::core::log_file::LogScanner;
use crate::domain::model::TestRunAnalysis;
use crate::utils::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

/// File name glob supporting `*` and `?`.
#[derive(Debug, Clone)]
pub struct FilePattern {
    glob: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(glob: &str) -> Result<Self> {
        let mut expr = String::from("^");
        let mut literal = String::new();

        for ch in glob.chars() {
            match ch {
                '*' | '?' => {
                    expr.push_str(&regex::escape(&literal));
                    literal.clear();
                    expr.push_str(if ch == '*' { ".*" } else { "." });
                }
                _ => literal.push(ch),
            }
        }
        expr.push_str(&regex::escape(&literal));
        expr.push('$');

        Ok(Self {
            glob: glob.to_string(),
            regex: Regex::new(&expr)?,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// 目錄中第一個符合的檔案 (依檔名排序)
    pub fn first_match(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let mut matches = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if self.matches(name) {
                    matches.push(entry.path());
                }
            }
        }
        matches.sort();
        Ok(matches.into_iter().next())
    }
}

pub struct TestRunAnalyzer {
    scanner: LogScanner,
    cli_pattern: FilePattern,
    peer_pattern: FilePattern,
}

impl TestRunAnalyzer {
    pub fn new(scanner: LogScanner, cli_pattern: FilePattern, peer_pattern: FilePattern) -> Self {
        Self {
            scanner,
            cli_pattern,
            peer_pattern,
        }
    }

    pub fn analyze(&self, run_dir: &Path) -> Result<TestRunAnalysis> {
        let cli_file = self.cli_pattern.first_match(run_dir)?;
        let peer_file = self.peer_pattern.first_match(run_dir)?;

        if cli_file.is_none() {
            tracing::warn!(
                "No client log matching '{}' in {}",
                self.cli_pattern.as_str(),
                run_dir.display()
            );
        }

        Ok(TestRunAnalysis {
            run_dir: run_dir.display().to_string(),
            cli_analysis: cli_file.map(|path| self.scanner.analyze_file(&path)),
            peer_analysis: peer_file.map(|path| self.scanner.analyze_file(&path)),
        })
    }
}
