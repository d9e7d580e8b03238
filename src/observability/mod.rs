//! Observability for the command layer
//!
//! The store itself never logs; it only returns errors. Whatever embeds it
//! (the CLI here) reports lifecycle events through this module.
//!
//! ```ignore
//! use commitlog::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::StoreAppend, &[("position", "0")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::CommandFailed, &[("code", "LOG_STORE_READ_FAILED")]);
    }
}
