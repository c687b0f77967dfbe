//! Lint configuration
//!
//! Precedence, lowest to highest: built-in defaults, `--config` JSON file,
//! `DIVLINT_LOG` environment variable, command-line flags.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::DEFAULT_EXTENSIONS;
use crate::observability::Severity;

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Name of the dataset directory next to the tool's install root
const COUNTRIES_DIR: &str = "countries";

/// `<install root>/countries`, where the install root is the parent of the
/// directory holding the executable (`<root>/bin/divlint`).
///
/// Falls back to `countries` under the working directory when the
/// executable path cannot be determined.
pub fn default_countries_root() -> PathBuf {
    env::current_exe()
        .and_then(fs::canonicalize)
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .map(|root| root.join(COUNTRIES_DIR))
        .unwrap_or_else(|| PathBuf::from(COUNTRIES_DIR))
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Directory holding one sub-directory per country
    pub countries_root: PathBuf,
    /// Country sub-directory to validate
    pub country: String,
    /// File extensions scanned, without the dot
    pub extensions: Vec<String>,
    /// Minimum log severity
    pub log_level: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            countries_root: default_countries_root(),
            country: "norway".to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            log_level: "off".to_string(),
        }
    }
}

impl LintConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Builds the effective configuration from parsed arguments.
    pub fn resolve(cli: &Cli) -> CliResult<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(root) = &cli.countries_root {
            config.countries_root = root.clone();
        }
        if let Some(country) = &cli.country {
            config.country = country.clone();
        }
        if !cli.extensions.is_empty() {
            config.extensions = cli.extensions.clone();
        }
        if let Some(level) = &cli.log_level {
            config.log_level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.country.trim().is_empty() {
            return Err(CliError::config_error("country must not be empty"));
        }

        if self.extensions.is_empty() {
            return Err(CliError::config_error("at least one file extension is required"));
        }

        if let Some(bad) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(CliError::config_error(format!(
                "Invalid extension '{}': give it without the leading dot",
                bad
            )));
        }

        self.severity()?;
        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(e))
    }

    /// `<countries_root>/<country>`
    pub fn dataset_path(&self) -> PathBuf {
        self.countries_root.join(&self.country)
    }
}
