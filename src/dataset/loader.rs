//! Dataset loader: scans a dataset directory into a [`DivisionModel`]
//!
//! - Files are found recursively and visited in lexicographic path order
//! - A file that fails to read or parse contributes nothing
//! - A block without a string `id` is skipped
//! - The first definition of an id wins; later ones are reported
//! - Field problems degrade the field, never the record
//!
//! Only a missing or unreadable dataset root is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use super::errors::{Issue, IssueLog, LintError, LintResult};
use super::model::DivisionModel;
use super::normalize::{normalize_date, normalize_parent, normalize_relation, render_value, type_name};
use super::types::{division_context, Division, Relation};
use crate::observability::{log_event_with_fields, Event, Logger};

/// Extensions scanned when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["yaml"];

/// Key holding the division blocks in each document
const DIVISIONS_KEY: &str = "divisions";

/// Result of scanning one dataset
#[derive(Debug)]
pub struct LoadOutcome {
    pub model: DivisionModel,
    pub issues: IssueLog,
    pub files_scanned: usize,
}

/// Reads every dataset file under one directory.
pub struct DatasetLoader {
    dataset_dir: PathBuf,
    extensions: Vec<String>,
}

impl DatasetLoader {
    /// Creates a loader for `dataset_dir` scanning the default extensions.
    pub fn new(dataset_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset_dir: dataset_dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replaces the set of file extensions to scan.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    /// Builds the model and collects every structural and field issue.
    ///
    /// # Errors
    ///
    /// `LintError::DatasetMissing` if the directory does not exist, and
    /// `LintError::DatasetUnreadable` if its top level cannot be listed.
    pub fn load(&self) -> LintResult<LoadOutcome> {
        if !self.dataset_dir.is_dir() {
            return Err(LintError::DatasetMissing(self.dataset_dir.clone()));
        }

        let mut issues = IssueLog::new();
        let files = self.collect_files(&mut issues)?;

        let mut model = DivisionModel::new();
        for path in &files {
            self.load_file(path, &mut model, &mut issues);
        }

        Ok(LoadOutcome {
            model,
            issues,
            files_scanned: files.len(),
        })
    }

    /// Lists matching files under the dataset root, sorted by full path.
    fn collect_files(&self, issues: &mut IssueLog) -> LintResult<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dataset_dir).map_err(|source| LintError::DatasetUnreadable {
            path: self.dataset_dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        let mut pending: Vec<PathBuf> = Vec::new();
        self.visit_entries(entries, &mut files, &mut pending, issues);

        while let Some(dir) = pending.pop() {
            match fs::read_dir(&dir) {
                Ok(entries) => self.visit_entries(entries, &mut files, &mut pending, issues),
                Err(e) => issues.push(Issue::read_failed(&dir, e)),
            }
        }

        files.sort();
        Ok(files)
    }

    fn visit_entries(
        &self,
        entries: fs::ReadDir,
        files: &mut Vec<PathBuf>,
        pending: &mut Vec<PathBuf>,
        issues: &mut IssueLog,
    ) {
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    issues.push(Issue::read_failed(&self.dataset_dir, e));
                    continue;
                }
            };

            if path.is_dir() {
                pending.push(path);
            } else if self.matches_extension(&path) {
                files.push(path);
            }
        }
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Loads one file into the model. Never fails; problems become issues.
    fn load_file(&self, path: &Path, model: &mut DivisionModel, issues: &mut IssueLog) {
        let path_str = path.display().to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                Logger::warn(Event::FileRejected.as_str(), &[("path", path_str.as_str()), ("reason", "read")]);
                issues.push(Issue::read_failed(path, e));
                return;
            }
        };

        let document: Value = if content.trim().is_empty() {
            Value::Null
        } else {
            match serde_yaml::from_str(&content) {
                Ok(document) => document,
                Err(e) => {
                    Logger::warn(Event::FileRejected.as_str(), &[("path", path_str.as_str()), ("reason", "yaml")]);
                    issues.push(Issue::parse_failed(path, e));
                    return;
                }
            }
        };

        let blocks = match division_blocks(&document) {
            Ok(blocks) => blocks,
            Err(reason) => {
                Logger::warn(Event::FileRejected.as_str(), &[("path", path_str.as_str()), ("reason", "shape")]);
                issues.push(Issue::invalid_document(path, reason));
                return;
            }
        };

        let mut admitted = 0usize;
        for block in blocks {
            if self.load_block(path, block, model, issues) {
                admitted += 1;
            }
        }

        let admitted = admitted.to_string();
        log_event_with_fields(Event::FileParsed, &[("path", path_str.as_str()), ("divisions", admitted.as_str())]);
    }

    /// Normalizes one block and inserts it. Returns whether it was admitted.
    fn load_block(&self, path: &Path, block: &Value, model: &mut DivisionModel, issues: &mut IssueLog) -> bool {
        let empty = Mapping::new();
        let fields = block.as_mapping().unwrap_or(&empty);

        let id = match fields.get("id") {
            Some(Value::String(id)) => id.clone(),
            _ => {
                issues.push(Issue::missing_id(path, &render_value(block)));
                return false;
            }
        };

        if let Some(existing) = model.get(&id) {
            issues.push(Issue::duplicate_id(path, &id, &existing.source));
            return false;
        }

        let context = division_context(path, &id);
        let valid_from = normalize_date(fields.get("from"), "from", &context).absorb(issues);
        let valid_to = normalize_date(fields.get("to"), "to", &context).absorb(issues);
        let parent = normalize_parent(fields.get("parent"), &context).absorb(issues);
        let was = normalize_relation(fields.get(Relation::Was.field()), Relation::Was.field(), &context)
            .absorb(issues);
        let became = normalize_relation(
            fields.get(Relation::Became.field()),
            Relation::Became.field(),
            &context,
        )
        .absorb(issues);

        let division = Division {
            id,
            source: path.to_path_buf(),
            parent,
            valid_from,
            valid_to,
            was,
            became,
            raw: fields.clone(),
        };

        model.insert(division).is_ok()
    }
}

/// Extracts the division block sequence from a parsed document.
///
/// An empty document, or one without the key, has no blocks.
fn division_blocks(document: &Value) -> Result<&[Value], String> {
    let map = match document {
        Value::Null => return Ok(&[]),
        Value::Mapping(map) => map,
        other => {
            return Err(format!(
                "expected a mapping with a '{}' list, got {}",
                DIVISIONS_KEY,
                type_name(other)
            ))
        }
    };

    match map.get(DIVISIONS_KEY) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Sequence(blocks)) => Ok(blocks.as_slice()),
        Some(other) => Err(format!(
            "'{}' must be a list, got {}",
            DIVISIONS_KEY,
            type_name(other)
        )),
    }
}
