//! divlint CLI entry point
//!
//! Parses arguments, runs one lint, exits with its status:
//! 0 clean, 1 issues found, 2 fatal. All logic lives in the CLI module.

use divlint::cli;

fn main() {
    std::process::exit(cli::run());
}
