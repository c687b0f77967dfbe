//! Lint command implementation
//!
//! Resolve config, check the dataset directory, load, validate, report.
//! A missing dataset directory is the only data-related abort.

use std::io::{self, Write};

use crate::dataset::{DatasetLoader, LintError};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::validation::lint_dataset;

use super::args::{Cli, OutputFormat};
use super::config::LintConfig;
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{write_error, write_json_report, write_text_report};

/// Process exit status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// No issues
    Clean,
    /// Validation ran and found issues
    IssuesFound,
    /// Run aborted before validation
    Fatal,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::IssuesFound => 1,
            ExitStatus::Fatal => 2,
        }
    }
}

/// Main CLI entry point
pub fn run() -> i32 {
    let cli = Cli::parse_args();
    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(&cli, &mut stdout.lock(), &mut stderr.lock()).code()
}

/// Runs a lint for parsed arguments, writing the report to the given streams.
pub fn execute<O: Write, E: Write>(cli: &Cli, out: &mut O, err: &mut E) -> ExitStatus {
    match lint(cli, out, err) {
        Ok(status) => status,
        Err(e) => {
            Logger::error(Event::LintAborted.as_str(), &[("code", e.code_str())]);
            let line = match e.code() {
                CliErrorCode::DatasetMissing => e.message().to_string(),
                _ => e.to_string(),
            };
            let _ = write_error(err, &line);
            ExitStatus::Fatal
        }
    }
}

/// Resolve configuration and lint the selected dataset
pub fn lint<O: Write, E: Write>(cli: &Cli, out: &mut O, err: &mut E) -> CliResult<ExitStatus> {
    let config = LintConfig::resolve(cli)?;
    Logger::set_min_severity(config.severity()?);

    let dataset_path = config.dataset_path();
    let path_str = dataset_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("path", path_str.as_str()), ("extensions", config.extensions.join(",").as_str())],
    );
    log_event_with_fields(Event::LintStart, &[("path", path_str.as_str())]);

    let loader = DatasetLoader::new(dataset_path.clone()).with_extensions(config.extensions.iter().cloned());
    let report = match lint_dataset(&loader) {
        Ok(report) => report,
        Err(e @ LintError::DatasetMissing(_)) => {
            log_event_with_fields(Event::DatasetMissing, &[("path", path_str.as_str())]);
            return Err(CliError::from(e));
        }
        Err(e) => return Err(CliError::from(e)),
    };

    match cli.format {
        OutputFormat::Text => write_text_report(&report, out, err)?,
        OutputFormat::Json => write_json_report(&report, out)?,
    }

    let divisions = report.division_count.to_string();
    let issues = report.issues.len().to_string();
    log_event_with_fields(
        Event::LintComplete,
        &[("divisions", divisions.as_str()), ("issues", issues.as_str())],
    );

    Ok(if report.is_clean() {
        ExitStatus::Clean
    } else {
        ExitStatus::IssuesFound
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cli_for(root: &std::path::Path, country: &str) -> Cli {
        Cli {
            countries_root: Some(root.to_path_buf()),
            country: Some(country.to_string()),
            ..Cli::default()
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Clean.code(), 0);
        assert_eq!(ExitStatus::IssuesFound.code(), 1);
        assert_eq!(ExitStatus::Fatal.code(), 2);
    }

    #[test]
    fn test_missing_country_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = execute(&cli_for(temp_dir.path(), "atlantis"), &mut out, &mut err);

        assert_eq!(status, ExitStatus::Fatal);
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert_eq!(err.lines().count(), 1);
        assert!(err.starts_with("Country directory not found: "));
    }

    #[test]
    fn test_empty_country_is_clean() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("norway")).unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = execute(&cli_for(temp_dir.path(), "norway"), &mut out, &mut err);

        assert_eq!(status, ExitStatus::Clean);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("OK: 0 divisions validated in "));
    }

    #[test]
    fn test_bad_log_level_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let mut cli = cli_for(temp_dir.path(), "norway");
        cli.log_level = Some("loud".to_string());
        let (mut out, mut err) = (Vec::new(), Vec::new());

        assert_eq!(execute(&cli, &mut out, &mut err), ExitStatus::Fatal);
        assert!(String::from_utf8(err).unwrap().starts_with("DIVLINT_CLI_CONFIG_ERROR"));
    }
}
