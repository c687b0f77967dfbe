//! Issue taxonomy for dataset linting
//!
//! Data-quality problems are values, never `Err`. Every anomaly found while
//! loading or checking a dataset becomes one [`Issue`] appended to an
//! [`IssueLog`]. Only conditions that prevent a run from starting at all are
//! expressed as [`LintError`].
//!
//! Codes:
//! - DIV_READ_FAILED, DIV_PARSE_FAILED, DIV_INVALID_DOCUMENT, DIV_MISSING_ID, DIV_DUPLICATE_ID (STRUCTURAL)
//! - DIV_INVALID_DATE, DIV_INVALID_PARENT, DIV_INVALID_RELATION (NORMALIZATION)
//! - DIV_MISSING_PARENT, DIV_DANGLING_PARENT, DIV_UNKNOWN_LINEAGE_TARGET (REFERENTIAL)
//! - DIV_INVERTED_RANGE, DIV_TIMELINE_OVERLAP, DIV_LINEAGE_MISMATCH (CONSISTENCY)

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Broad class of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    /// Offending file or block skipped entirely
    Structural,
    /// Field degraded to absent/empty, record kept
    Normalization,
    /// Reference does not resolve
    Referential,
    /// Records resolve but disagree with each other
    Consistency,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Structural => "STRUCTURAL",
            Category::Normalization => "NORMALIZATION",
            Category::Referential => "REFERENTIAL",
            Category::Consistency => "CONSISTENCY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable issue codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// File or directory could not be read
    ReadFailed,
    /// File is not valid YAML
    ParseFailed,
    /// Top-level document has the wrong shape
    InvalidDocument,
    /// Division block without a string `id`
    MissingId,
    /// Identifier already defined earlier in the scan
    DuplicateId,
    /// Date field neither a date nor null
    InvalidDate,
    /// Parent field neither a string, boolean token nor null
    InvalidParent,
    /// `was`/`became` field or item has the wrong shape
    InvalidRelation,
    /// Parent field absent
    MissingParent,
    /// Parent names an id that is not in the dataset
    DanglingParent,
    /// Lineage entry names an id that is not in the dataset
    UnknownLineageTarget,
    /// `from` after `to`
    InvertedRange,
    /// Two incarnations of one base id overlap in time
    TimelineOverlap,
    /// `was`/`became` not mirrored on the other side
    LineageMismatch,
}

impl IssueCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IssueCode::ReadFailed => "DIV_READ_FAILED",
            IssueCode::ParseFailed => "DIV_PARSE_FAILED",
            IssueCode::InvalidDocument => "DIV_INVALID_DOCUMENT",
            IssueCode::MissingId => "DIV_MISSING_ID",
            IssueCode::DuplicateId => "DIV_DUPLICATE_ID",
            IssueCode::InvalidDate => "DIV_INVALID_DATE",
            IssueCode::InvalidParent => "DIV_INVALID_PARENT",
            IssueCode::InvalidRelation => "DIV_INVALID_RELATION",
            IssueCode::MissingParent => "DIV_MISSING_PARENT",
            IssueCode::DanglingParent => "DIV_DANGLING_PARENT",
            IssueCode::UnknownLineageTarget => "DIV_UNKNOWN_LINEAGE_TARGET",
            IssueCode::InvertedRange => "DIV_INVERTED_RANGE",
            IssueCode::TimelineOverlap => "DIV_TIMELINE_OVERLAP",
            IssueCode::LineageMismatch => "DIV_LINEAGE_MISMATCH",
        }
    }

    /// Returns the category of this code
    pub fn category(&self) -> Category {
        match self {
            IssueCode::ReadFailed
            | IssueCode::ParseFailed
            | IssueCode::InvalidDocument
            | IssueCode::MissingId
            | IssueCode::DuplicateId => Category::Structural,
            IssueCode::InvalidDate | IssueCode::InvalidParent | IssueCode::InvalidRelation => {
                Category::Normalization
            }
            IssueCode::MissingParent
            | IssueCode::DanglingParent
            | IssueCode::UnknownLineageTarget => Category::Referential,
            IssueCode::InvertedRange
            | IssueCode::TimelineOverlap
            | IssueCode::LineageMismatch => Category::Consistency,
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One self-contained, human-readable finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    code: IssueCode,
    message: String,
}

impl Issue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// File or directory could not be read
    pub fn read_failed(path: &Path, reason: impl fmt::Display) -> Self {
        Self::new(
            IssueCode::ReadFailed,
            format!("{}: failed to read: {}", path.display(), reason),
        )
    }

    /// File content is not valid YAML
    pub fn parse_failed(file: &Path, reason: impl fmt::Display) -> Self {
        Self::new(
            IssueCode::ParseFailed,
            format!("{}: failed to parse YAML: {}", file.display(), reason),
        )
    }

    /// Document is not a mapping with a `divisions` sequence
    pub fn invalid_document(file: &Path, reason: impl fmt::Display) -> Self {
        Self::new(
            IssueCode::InvalidDocument,
            format!("{}: {}", file.display(), reason),
        )
    }

    /// Block has no string id; `block` is its rendered form
    pub fn missing_id(file: &Path, block: &str) -> Self {
        Self::new(
            IssueCode::MissingId,
            format!("{}: division missing string id: {}", file.display(), block),
        )
    }

    /// Later definition of an id already taken by `first`
    pub fn duplicate_id(file: &Path, id: &str, first: &Path) -> Self {
        Self::new(
            IssueCode::DuplicateId,
            format!(
                "{}: duplicate division id '{}' also defined in {}",
                file.display(),
                id,
                first.display()
            ),
        )
    }

    /// Field-level normalization failure at `context`
    pub fn normalization(code: IssueCode, context: &str, detail: impl fmt::Display) -> Self {
        Self::new(code, format!("{}: {}", context, detail))
    }

    pub fn missing_parent(context: &str) -> Self {
        Self::new(
            IssueCode::MissingParent,
            format!("{}: missing parent reference", context),
        )
    }

    pub fn dangling_parent(context: &str, parent: &str) -> Self {
        Self::new(
            IssueCode::DanglingParent,
            format!("{}: parent '{}' not found in dataset", context, parent),
        )
    }

    pub fn inverted_range(context: &str, from: impl fmt::Display, to: impl fmt::Display) -> Self {
        Self::new(
            IssueCode::InvertedRange,
            format!("{}: from date {} is after to date {}", context, from, to),
        )
    }

    pub fn timeline_overlap(
        base_id: &str,
        context: &str,
        start: impl fmt::Display,
        previous_end: impl fmt::Display,
    ) -> Self {
        Self::new(
            IssueCode::TimelineOverlap,
            format!(
                "Timeline overlap for {}: {} starts {} before previous ended {}",
                base_id, context, start, previous_end
            ),
        )
    }

    pub fn unknown_lineage_target(context: &str, field: &str, target: &str) -> Self {
        Self::new(
            IssueCode::UnknownLineageTarget,
            format!("{}: {} references unknown id '{}'", context, field, target),
        )
    }

    pub fn lineage_mismatch(
        context: &str,
        field: &str,
        target_context: &str,
        counterpart: &str,
    ) -> Self {
        Self::new(
            IssueCode::LineageMismatch,
            format!(
                "Lineage mismatch: {} {} -> {} without reciprocal {}",
                context, field, target_context, counterpart
            ),
        )
    }

    pub fn code(&self) -> IssueCode {
        self.code
    }

    pub fn category(&self) -> Category {
        self.code.category()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Append-only, order-preserving list of issues for one run
#[derive(Debug, Default, Clone)]
pub struct IssueLog {
    issues: Vec<Issue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Number of issues carrying `code`
    pub fn count_of(&self, code: IssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.issues
    }
}

impl<'a> IntoIterator for &'a IssueLog {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

/// Conditions that stop a run before any validation
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Country directory not found: {}", .0.display())]
    DatasetMissing(PathBuf),

    #[error("Failed to read dataset directory {}: {source}", .path.display())]
    DatasetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fatal lint operations
pub type LintResult<T> = Result<T, LintError>;
