//! Observable events for a lint run
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in divlint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Lint run begins
    LintStart,
    /// Lint run finished (clean or with issues)
    LintComplete,
    /// Lint run stopped before reporting
    LintAborted,

    // Configuration
    /// Configuration resolved from flags, env and file
    ConfigLoaded,
    /// Selected dataset directory does not exist (FATAL)
    DatasetMissing,

    // Scanning
    /// A dataset file parsed and its blocks were admitted
    FileParsed,
    /// A dataset file was rejected as a whole
    FileRejected,
    /// Division model construction complete
    ModelBuilt,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::LintStart => "LINT_START",
            Event::LintComplete => "LINT_COMPLETE",
            Event::LintAborted => "LINT_ABORTED",

            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetMissing => "DATASET_MISSING",

            Event::FileParsed => "FILE_PARSED",
            Event::FileRejected => "FILE_REJECTED",
            Event::ModelBuilt => "MODEL_BUILT",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::DatasetMissing)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::LintStart,
            Event::LintComplete,
            Event::LintAborted,
            Event::ConfigLoaded,
            Event::DatasetMissing,
            Event::FileParsed,
            Event::FileRejected,
            Event::ModelBuilt,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::DatasetMissing.is_fatal());
        assert!(!Event::FileRejected.is_fatal());
        assert!(!Event::LintComplete.is_fatal());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::ModelBuilt), "MODEL_BUILT");
    }
}
