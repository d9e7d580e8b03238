//! Store configuration
//!
//! All fields are optional in the JSON form; missing fields take their
//! defaults.

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// Default write buffer capacity in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Configuration for a record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Capacity of the in-process write buffer
    pub buffer_capacity: usize,
    /// Whether `close` fsyncs the file after the final flush
    pub sync_on_close: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            sync_on_close: true,
        }
    }
}

impl StoreConfig {
    /// Config with a specific buffer capacity.
    pub fn with_buffer_capacity(buffer_capacity: usize) -> Self {
        Self {
            buffer_capacity,
            ..Self::default()
        }
    }

    /// Rejects values the store cannot run with.
    pub fn validate(&self) -> StoreResult<()> {
        if self.buffer_capacity == 0 {
            return Err(StoreError::invalid_config("buffer_capacity must be > 0"));
        }
        Ok(())
    }
}
