//! Report rendering for the CLI
//!
//! Text: success line on stdout, or a header plus one line per issue on
//! stderr. JSON: a single object on stdout in both cases.

use std::io::Write;

use serde_json::json;

use crate::validation::LintReport;

use super::errors::CliResult;

/// Header printed before the issue list
pub const ISSUES_HEADER: &str = "Schema lint found issues:";

/// Write the human-readable report
pub fn write_text_report<O: Write, E: Write>(report: &LintReport, out: &mut O, err: &mut E) -> CliResult<()> {
    if report.is_clean() {
        writeln!(
            out,
            "OK: {} divisions validated in {}",
            report.division_count,
            report.dataset_dir.display()
        )?;
        out.flush()?;
    } else {
        writeln!(err, "{}", ISSUES_HEADER)?;
        for issue in &report.issues {
            writeln!(err, " - {}", issue)?;
        }
        err.flush()?;
    }

    Ok(())
}

/// Write the report as one JSON object
pub fn write_json_report<O: Write>(report: &LintReport, out: &mut O) -> CliResult<()> {
    let issues: Vec<_> = report
        .issues
        .iter()
        .map(|issue| {
            json!({
                "code": issue.code().code(),
                "category": issue.category().as_str(),
                "message": issue.message(),
            })
        })
        .collect();

    let response = json!({
        "status": if report.is_clean() { "ok" } else { "issues" },
        "path": report.dataset_dir.display().to_string(),
        "divisions": report.division_count,
        "files": report.files_scanned,
        "issues": issues,
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write a fatal error line
pub fn write_error<E: Write>(err: &mut E, message: &str) -> CliResult<()> {
    writeln!(err, "{}", message)?;
    err.flush()?;
    Ok(())
}
