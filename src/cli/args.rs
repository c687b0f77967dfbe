//! CLI argument definitions using clap
//!
//! divlint [--countries-root <dir>] [--country <name>] [--config <file>]
//!         [--ext <ext>]... [--log-level <level>] [--format text|json]
//!
//! Every flag is optional so that values from a config file can fill the
//! gaps; see `LintConfig::resolve`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// divlint - consistency checker for administrative-division datasets
#[derive(Parser, Debug, Default)]
#[command(name = "divlint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding one sub-directory per country [default: <install root>/countries]
    #[arg(long)]
    pub countries_root: Option<PathBuf>,

    /// Country sub-directory to validate [default: norway]
    #[arg(long)]
    pub country: Option<String>,

    /// Optional JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// File extension to scan (repeatable) [default: yaml]
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Minimum log severity written to stderr [default: off]
    #[arg(long, env = "DIVLINT_LOG")]
    pub log_level: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How the report is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Success line on stdout, issue list on stderr
    #[default]
    Text,
    /// One JSON object on stdout
    Json,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unset() {
        let cli = Cli::try_parse_from(["divlint"]).unwrap();
        assert!(cli.countries_root.is_none());
        assert!(cli.country.is_none());
        assert!(cli.extensions.is_empty());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "divlint",
            "--countries-root",
            "/data/countries",
            "--country",
            "sweden",
            "--ext",
            "yaml",
            "--ext",
            "yml",
            "--log-level",
            "info",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.countries_root, Some(PathBuf::from("/data/countries")));
        assert_eq!(cli.country.as_deref(), Some("sweden"));
        assert_eq!(cli.extensions, vec!["yaml", "yml"]);
        assert_eq!(cli.log_level.as_deref(), Some("info"));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["divlint", "--format", "xml"]).is_err());
    }
}
