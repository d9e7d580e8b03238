//! Lifecycle events logged by the command layer

use std::fmt;

/// Observable events around a store's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Store config loaded from disk
    ConfigLoaded,
    /// Store opened on a file
    StoreOpen,
    /// Record appended
    StoreAppend,
    /// Record read back
    StoreRead,
    /// Store flushed and closed
    StoreClose,
    /// A command failed
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpen => "STORE_OPEN",
            Event::StoreAppend => "STORE_APPEND",
            Event::StoreRead => "STORE_READ",
            Event::StoreClose => "STORE_CLOSE",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::CommandFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
