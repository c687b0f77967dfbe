//! CLI Reporting Tests
//!
//! Exit status and report layout for the lint command:
//! - 0 and a single OK line on stdout when clean
//! - 1 and a header plus one line per issue on stderr when not
//! - 2 and a single error line when the country directory is missing

use std::fs;
use std::path::Path;

use divlint::cli::{execute, Cli, ExitStatus, OutputFormat, ISSUES_HEADER};
use tempfile::TempDir;

fn cli(root: &Path, country: &str) -> Cli {
    Cli {
        countries_root: Some(root.to_path_buf()),
        country: Some(country.to_string()),
        ..Cli::default()
    }
}

fn run(cli: &Cli) -> (ExitStatus, String, String) {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let status = execute(cli, &mut out, &mut err);
    (
        status,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn country(root: &Path, name: &str, files: &[(&str, &str)]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for (file, content) in files {
        fs::write(dir.join(file), content).unwrap();
    }
}

#[test]
fn test_clean_run() {
    let tmp = TempDir::new().unwrap();
    country(
        tmp.path(),
        "norway",
        &[("oslo.yaml", "divisions:\n  - id: NO\n    parent: NO\n  - id: NO-03\n    parent: NO\n")],
    );

    let (status, out, err) = run(&cli(tmp.path(), "norway"));

    assert_eq!(status, ExitStatus::Clean);
    assert_eq!(status.code(), 0);
    let expected = format!(
        "OK: 2 divisions validated in {}\n",
        tmp.path().join("norway").display()
    );
    assert_eq!(out, expected);
    assert!(err.is_empty());
}

#[test]
fn test_run_with_issues() {
    let tmp = TempDir::new().unwrap();
    country(
        tmp.path(),
        "norway",
        &[("a.yaml", "divisions:\n  - id: A\n    parent: GHOST\n  - id: B\n")],
    );

    let (status, out, err) = run(&cli(tmp.path(), "norway"));

    assert_eq!(status.code(), 1);
    assert!(out.is_empty());
    let lines: Vec<_> = err.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], ISSUES_HEADER);
    assert!(lines[1].starts_with(" - ") && lines[1].ends_with("(A): parent 'GHOST' not found in dataset"));
    assert!(lines[2].ends_with("(B): missing parent reference"));
}

#[test]
fn test_missing_country_directory() {
    let tmp = TempDir::new().unwrap();
    let (status, out, err) = run(&cli(tmp.path(), "atlantis"));

    assert_eq!(status.code(), 2);
    assert!(out.is_empty());
    assert_eq!(
        err,
        format!(
            "Country directory not found: {}\n",
            tmp.path().join("atlantis").display()
        )
    );
}

#[test]
fn test_only_selected_country_is_validated() {
    let tmp = TempDir::new().unwrap();
    country(tmp.path(), "norway", &[("a.yaml", "divisions:\n  - id: A\n    parent: NO\n")]);
    country(tmp.path(), "sweden", &[("a.yaml", "divisions:\n  - id: S\n")]);

    let (status, _, _) = run(&cli(tmp.path(), "norway"));
    assert_eq!(status, ExitStatus::Clean);

    let (status, _, _) = run(&cli(tmp.path(), "sweden"));
    assert_eq!(status, ExitStatus::IssuesFound);
}

#[test]
fn test_json_format() {
    let tmp = TempDir::new().unwrap();
    country(tmp.path(), "norway", &[("a.yaml", "divisions:\n  - id: A\n")]);

    let mut args = cli(tmp.path(), "norway");
    args.format = OutputFormat::Json;
    let (status, out, err) = run(&args);

    assert_eq!(status, ExitStatus::IssuesFound);
    assert!(err.is_empty());
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["status"], "issues");
    assert_eq!(parsed["divisions"], 1);
    assert_eq!(parsed["issues"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["issues"][0]["code"], "DIV_MISSING_PARENT");
}

#[test]
fn test_config_file_selects_dataset() {
    let tmp = TempDir::new().unwrap();
    country(tmp.path(), "denmark", &[("a.yml", "divisions:\n  - id: DK\n    parent: NO\n")]);
    let config_path = tmp.path().join("divlint.json");
    fs::write(
        &config_path,
        serde_json::json!({
            "countries_root": tmp.path(),
            "country": "denmark",
            "extensions": ["yml"],
        })
        .to_string(),
    )
    .unwrap();

    let args = Cli {
        config: Some(config_path),
        ..Cli::default()
    };
    let (status, out, _) = run(&args);

    assert_eq!(status, ExitStatus::Clean);
    assert!(out.starts_with("OK: 1 divisions validated in "));
}
