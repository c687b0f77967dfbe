//! Dataset subsystem: scanning YAML files into a division model
//!
//! # Design Principles
//!
//! - Deterministic scan order (sorted paths)
//! - Accumulate and continue: one bad file or field never stops the scan
//! - Duplicate ids rejected, never merged
//! - Model is immutable once built

mod errors;
mod loader;
mod model;
mod normalize;
mod types;

pub use errors::{Category, Issue, IssueCode, IssueLog, LintError, LintResult};
pub use loader::{DatasetLoader, LoadOutcome, DEFAULT_EXTENSIONS};
pub use model::{DivisionModel, Lineage};
pub use normalize::{normalize_date, normalize_parent, normalize_relation, Normalized};
pub use types::{base_id, division_context, Division, ParentRef, Relation, NO_PARENT, VARIANT_SEPARATOR, YES_PARENT};
