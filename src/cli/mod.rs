//! CLI module for divlint
//!
//! One command: lint the selected country directory and report.

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, OutputFormat};
pub use commands::{execute, lint, run, ExitStatus};
pub use config::{default_countries_root, LintConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_json_report, write_text_report, ISSUES_HEADER};
