//! Store error types
//!
//! Error codes:
//! - LOG_STORE_OPEN_FAILED
//! - LOG_STORE_WRITE_FAILED
//! - LOG_STORE_FLUSH_FAILED
//! - LOG_STORE_SYNC_FAILED
//! - LOG_STORE_READ_FAILED
//! - LOG_STORE_OUT_OF_RANGE
//! - LOG_STORE_LOCK_POISONED
//!
//! The store never retries and never logs. Every failure is handed back to
//! the caller of the operation that triggered it.

use std::fmt;
use std::io;

/// Store-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// The file size could not be determined, or the store could not be built
    OpenFailed,
    /// A length prefix or payload could not be written to the buffer
    WriteFailed,
    /// Buffered bytes could not be pushed to the file
    FlushFailed,
    /// The medium rejected an fsync
    SyncFailed,
    /// A positional read failed
    ReadFailed,
    /// The requested bytes extend beyond the logical size
    OutOfRange,
    /// A thread panicked while holding the store lock
    LockPoisoned,
}

impl StoreErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::OpenFailed => "LOG_STORE_OPEN_FAILED",
            StoreErrorCode::WriteFailed => "LOG_STORE_WRITE_FAILED",
            StoreErrorCode::FlushFailed => "LOG_STORE_FLUSH_FAILED",
            StoreErrorCode::SyncFailed => "LOG_STORE_SYNC_FAILED",
            StoreErrorCode::ReadFailed => "LOG_STORE_READ_FAILED",
            StoreErrorCode::OutOfRange => "LOG_STORE_OUT_OF_RANGE",
            StoreErrorCode::LockPoisoned => "LOG_STORE_LOCK_POISONED",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with code, message, optional context and I/O source
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StoreError {
    fn new(code: StoreErrorCode, message: impl Into<String>, source: Option<io::Error>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source,
        }
    }

    /// Failed to initialize the store
    pub fn open_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::OpenFailed, message, Some(source))
    }

    /// Store could not be built for a reason other than I/O (e.g. bad config)
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::OpenFailed, message, None)
    }

    /// Prefix or payload write failed
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::WriteFailed, message, Some(source))
    }

    /// Appending would push the logical size past u64::MAX
    pub fn size_overflow(size: u64, payload_len: u64) -> Self {
        Self::new(
            StoreErrorCode::WriteFailed,
            format!("record of {} bytes would overflow store size", payload_len),
            None,
        )
        .with_details(format!("size: {}", size))
    }

    /// Buffer flush failed
    pub fn flush_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::FlushFailed, message, Some(source))
    }

    /// fsync failed
    pub fn sync_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::SyncFailed, message, Some(source))
    }

    /// Positional read failed at the given offset
    pub fn read_failed(offset: u64, message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StoreErrorCode::ReadFailed, message, Some(source))
            .with_details(format!("byte_offset: {}", offset))
    }

    /// `len` bytes at `offset` do not fit inside a store of `size` bytes
    pub fn out_of_range(offset: u64, len: u64, size: u64) -> Self {
        Self::new(
            StoreErrorCode::OutOfRange,
            format!("{} bytes at offset {} extend past end of store", len, offset),
            None,
        )
        .with_details(format!("byte_offset: {}, size: {}", offset, size))
    }

    /// Store lock was poisoned by a panicking thread
    pub fn lock_poisoned() -> Self {
        Self::new(StoreErrorCode::LockPoisoned, "Lock poisoned", None)
    }

    fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the kind of the underlying I/O error, if any
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        self.source.as_ref().map(|e| e.kind())
    }

    /// Whether the caller asked for bytes beyond the end of the store
    pub fn is_out_of_range(&self) -> bool {
        self.code == StoreErrorCode::OutOfRange
            || self.io_kind() == Some(io::ErrorKind::UnexpectedEof)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
