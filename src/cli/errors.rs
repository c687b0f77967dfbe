//! CLI-specific error types
//!
//! All CLI errors are fatal: the run stops before or instead of validating.

use std::fmt;
use std::io;

use crate::dataset::LintError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or flag error
    ConfigError,
    /// Selected dataset directory missing or unreadable
    DatasetMissing,
    /// I/O error writing the report
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "DIVLINT_CLI_CONFIG_ERROR",
            Self::DatasetMissing => "DIVLINT_CLI_DATASET_MISSING",
            Self::IoError => "DIVLINT_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Dataset directory missing
    pub fn dataset_missing(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DatasetMissing, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<LintError> for CliError {
    fn from(e: LintError) -> Self {
        Self::dataset_missing(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("country must not be empty");
        assert_eq!(
            err.to_string(),
            "DIVLINT_CLI_CONFIG_ERROR: country must not be empty"
        );
    }

    #[test]
    fn test_from_lint_error() {
        let err: CliError = LintError::DatasetMissing(PathBuf::from("countries/atlantis")).into();
        assert_eq!(err.code(), &CliErrorCode::DatasetMissing);
        assert_eq!(err.message(), "Country directory not found: countries/atlantis");
    }
}
