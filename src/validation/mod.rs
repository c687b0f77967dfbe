//! Validation engine
//!
//! Runs independent checks over a finished [`DivisionModel`]. Checks only
//! read the model and only append to the shared issue log; none of them
//! stops the others.

mod lineage;
mod parent;
mod timeline;

use std::path::{Path, PathBuf};

use crate::dataset::{DatasetLoader, DivisionModel, Issue, IssueLog, LintResult};
use crate::observability::{log_event_with_fields, Event, ObservationScope};

pub use lineage::LineageCheck;
pub use parent::ParentLinkCheck;
pub use timeline::TimelineCheck;

/// One consistency pass over the model
pub trait Check {
    /// Upper-case name used in log events
    fn name(&self) -> &'static str;

    /// Appends every violation found to `issues`
    fn run(&self, model: &DivisionModel, issues: &mut IssueLog);
}

/// An ordered list of checks
pub struct ValidationEngine {
    checks: Vec<Box<dyn Check>>,
}

impl ValidationEngine {
    /// Parent links, then timelines, then lineage.
    pub fn standard() -> Self {
        Self {
            checks: vec![
                Box::new(ParentLinkCheck),
                Box::new(TimelineCheck),
                Box::new(LineageCheck),
            ],
        }
    }

    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Runs every check in order against the model.
    pub fn run(&self, model: &DivisionModel, issues: &mut IssueLog) {
        for check in &self.checks {
            let scope = ObservationScope::with_fields("CHECK", &[("check", check.name())]);
            let before = issues.len();
            check.run(model, issues);
            let found = (issues.len() - before).to_string();
            scope.complete_with_fields(&[("issues", found.as_str())]);
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outcome of linting one dataset directory
#[derive(Debug)]
pub struct LintReport {
    pub dataset_dir: PathBuf,
    pub division_count: usize,
    pub files_scanned: usize,
    pub issues: Vec<Issue>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }
}

/// Loads a dataset and runs the standard checks over it.
///
/// Loader issues come first, then each check's issues in engine order.
pub fn lint_dataset(loader: &DatasetLoader) -> LintResult<LintReport> {
    lint_dataset_with(loader, &ValidationEngine::standard())
}

/// Same as [`lint_dataset`] with a caller-supplied engine.
pub fn lint_dataset_with(loader: &DatasetLoader, engine: &ValidationEngine) -> LintResult<LintReport> {
    let dir = loader.dataset_dir().display().to_string();
    let scan = ObservationScope::with_fields("SCAN", &[("path", dir.as_str())]);
    let outcome = match loader.load() {
        Ok(outcome) => outcome,
        Err(e) => {
            scan.fail_fatal(&e.to_string());
            return Err(e);
        }
    };
    let files = outcome.files_scanned.to_string();
    scan.complete_with_fields(&[("files", files.as_str())]);

    let model = outcome.model;
    let mut issues = outcome.issues;

    let divisions = model.len().to_string();
    let load_issues = issues.len().to_string();
    log_event_with_fields(
        Event::ModelBuilt,
        &[("divisions", divisions.as_str()), ("issues", load_issues.as_str())],
    );

    engine.run(&model, &mut issues);

    Ok(LintReport {
        dataset_dir: loader.dataset_dir().to_path_buf(),
        division_count: model.len(),
        files_scanned: outcome.files_scanned,
        issues: issues.into_vec(),
    })
}
