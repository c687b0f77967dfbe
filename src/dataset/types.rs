//! Division record types
//!
//! A [`Division`] is one administrative unit during one span of its
//! existence. Successive incarnations of one entity share a base id and are
//! told apart by a `:<variant>` suffix (`NO-03`, `NO-03:2`).

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_yaml::Mapping;

/// Separates a base id from its variant suffix
pub const VARIANT_SEPARATOR: char = ':';

/// Parent token meaning "this division has no parent"
pub const NO_PARENT: &str = "NO";

/// Parent token produced by an affirmative boolean in the source
pub const YES_PARENT: &str = "YES";

/// Returns `id` with its trailing `:<variant>` removed, if any.
pub fn base_id(id: &str) -> &str {
    match id.rfind(VARIANT_SEPARATOR) {
        Some(pos) => &id[..pos],
        None => id,
    }
}

/// The `parent` field after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    /// Field missing, null, or not decodable
    Absent,
    /// Explicit "no parent" sentinel
    NoParent,
    /// Reference to another division's id (verbatim token)
    Id(String),
}

impl ParentRef {
    /// Decodes a string token. Only the exact sentinel means "no parent".
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token == NO_PARENT {
            ParentRef::NoParent
        } else {
            ParentRef::Id(token)
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ParentRef::Absent)
    }

    /// The id this parent points to, if it points anywhere
    pub fn target(&self) -> Option<&str> {
        match self {
            ParentRef::Id(id) => Some(id),
            _ => None,
        }
    }
}

/// Which side of a lineage link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Predecessors
    Was,
    /// Successors
    Became,
}

impl Relation {
    /// Field name in the source document
    pub fn field(&self) -> &'static str {
        match self {
            Relation::Was => "was",
            Relation::Became => "became",
        }
    }

    /// The relation that must mirror this one on the other division
    pub fn counterpart(&self) -> Relation {
        match self {
            Relation::Was => Relation::Became,
            Relation::Became => Relation::Was,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// A fully normalized division record
#[derive(Debug, Clone)]
pub struct Division {
    pub id: String,
    pub source: PathBuf,
    pub parent: ParentRef,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub was: Vec<String>,
    pub became: Vec<String>,
    /// The block as read, kept for diagnostics and downstream tooling
    pub raw: Mapping,
}

impl Division {
    /// Creates a division with no dates, no lineage and an absent parent.
    pub fn new(id: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            parent: ParentRef::Absent,
            valid_from: None,
            valid_to: None,
            was: Vec::new(),
            became: Vec::new(),
            raw: Mapping::new(),
        }
    }

    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_validity(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.valid_from = from;
        self.valid_to = to;
        self
    }

    pub fn with_relation(mut self, relation: Relation, ids: Vec<String>) -> Self {
        match relation {
            Relation::Was => self.was = ids,
            Relation::Became => self.became = ids,
        }
        self
    }

    pub fn base_id(&self) -> &str {
        base_id(&self.id)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn relation(&self, relation: Relation) -> &[String] {
        match relation {
            Relation::Was => &self.was,
            Relation::Became => &self.became,
        }
    }

    /// `<file> (<id>)`, the prefix of every per-division message
    pub fn context(&self) -> String {
        division_context(&self.source, &self.id)
    }

    /// Whether `from` is strictly after `to`; open sides never invert.
    pub fn has_inverted_range(&self) -> bool {
        matches!((self.valid_from, self.valid_to), (Some(from), Some(to)) if from > to)
    }
}

/// Formats the `<file> (<id>)` location used in messages
pub fn division_context(file: &Path, id: &str) -> String {
    format!("{} ({})", file.display(), id)
}
