//! Observability subsystem for divlint
//!
//! Provides:
//! - Structured logging (JSON, stderr)
//! - Lifecycle event tracing
//! - Timed scopes around each lint phase
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on the lint result
//! 3. No async or background threads
//! 4. Deterministic output

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
