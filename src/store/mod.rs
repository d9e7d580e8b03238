//! Record store subsystem
//!
//! The store is the bottom layer of the commit log: a single append-only
//! file of length-prefixed records, addressed by byte offset. Segments,
//! indexes and replication sit on top and talk to it only through
//! `append`, `read` and the file lifecycle.
//!
//! # Guarantees
//!
//! - A returned position always points at a complete record
//! - Reads see every record appended before them, flushed or not
//! - Reopening a file continues appending after its existing end
//!
//! # Not handled here
//!
//! - Checksums or any integrity check beyond length framing
//! - Detecting a record start from an arbitrary offset
//! - Repairing a torn tail after a crash or failed write

mod config;
mod errors;
mod file;
mod record;
mod store;

pub use config::{StoreConfig, DEFAULT_BUFFER_CAPACITY};
pub use errors::{StoreError, StoreErrorCode, StoreResult};
pub use file::StoreFile;
pub use record::{decode_len, encode_len, record_size, LEN_WIDTH};
pub use store::Store;
