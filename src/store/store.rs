//! Append-only record store
//!
//! One store owns one file. All appends and reads go through a single
//! mutex, so:
//! - concurrent appends get distinct, contiguous positions
//! - a read never sees a record whose prefix is on disk but payload is not
//! - every read flushes the whole write buffer before touching the file
//!
//! Appends are buffered. A record is only durable once a flush has
//! happened, either through `flush`/`sync`/`close` or as a side effect of
//! a later read.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::file::StoreFile;
use super::record::{self, LEN_WIDTH};

/// State guarded by the store lock.
struct StoreState<F: StoreFile> {
    /// Write buffer bound to the file; the only writer that may exist for it
    buf: BufWriter<F>,
    /// Logical end of data, including bytes still in `buf`
    size: u64,
}

impl<F: StoreFile> StoreState<F> {
    fn flush(&mut self) -> StoreResult<()> {
        self.buf
            .flush()
            .map_err(|e| StoreError::flush_failed("Failed to flush write buffer", e))
    }

    /// Fails unless `len` bytes at `offset` lie inside the logical size.
    fn check_range(&self, offset: u64, len: u64) -> StoreResult<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.size => Ok(()),
            _ => Err(StoreError::out_of_range(offset, len, self.size)),
        }
    }

    fn read_exact_at(&self, buf: &mut [u8], offset: u64, what: &str) -> StoreResult<()> {
        self.buf
            .get_ref()
            .read_exact_at(buf, offset)
            .map_err(|e| StoreError::read_failed(offset, format!("Failed to read {}", what), e))
    }
}

/// An append-only file of length-prefixed records.
///
/// Each record is an 8-byte big-endian length followed by that many
/// payload bytes. `append` returns the record's position; `read` with that
/// position returns the payload.
pub struct Store<F: StoreFile = File> {
    state: Mutex<StoreState<F>>,
    sync_on_close: bool,
}

impl Store<File> {
    /// Opens or creates the file at `path` and builds a store on it.
    ///
    /// Parent directories are created if missing. An existing file is
    /// appended to, not truncated.
    pub fn open_path(path: &Path, config: &StoreConfig) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::open_failed(
                        format!("Failed to create directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                StoreError::open_failed(format!("Failed to open store file: {}", path.display()), e)
            })?;

        Self::with_config(file, config)
    }
}

impl<F: StoreFile> Store<F> {
    /// Builds a store on an already-open file with the default config.
    pub fn new(file: F) -> StoreResult<Self> {
        Self::with_config(file, &StoreConfig::default())
    }

    /// Builds a store on an already-open file.
    ///
    /// The logical size starts at the file's current size, so appends
    /// continue after whatever the file already holds. Existing contents
    /// are trusted to be well-formed records.
    ///
    /// # Errors
    ///
    /// Returns `LOG_STORE_OPEN_FAILED` if the config is invalid or the size
    /// query fails.
    pub fn with_config(mut file: F, config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let size = file
            .seek_end()
            .map_err(|e| StoreError::open_failed("Failed to query file size", e))?;

        Ok(Self {
            state: Mutex::new(StoreState {
                buf: BufWriter::with_capacity(config.buffer_capacity, file),
                size,
            }),
            sync_on_close: config.sync_on_close,
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreState<F>>> {
        self.state.lock().map_err(|_| StoreError::lock_poisoned())
    }

    /// Appends a record and returns `(bytes_written, position)`.
    ///
    /// `bytes_written` is the prefix plus the payload; `position` is the
    /// offset of the prefix. The bytes are buffered, not flushed.
    ///
    /// # Errors
    ///
    /// Returns `LOG_STORE_WRITE_FAILED` if the prefix or payload write fails.
    /// The logical size is left untouched, but part of the record may
    /// already be buffered, so the tail must be treated as suspect.
    pub fn append(&self, payload: &[u8]) -> StoreResult<(u64, u64)> {
        let mut state = self.lock()?;

        let position = state.size;
        let len = payload.len() as u64;
        let written = record::record_size(len)
            .filter(|n| position.checked_add(*n).is_some())
            .ok_or_else(|| StoreError::size_overflow(position, len))?;

        state.buf.write_all(&record::encode_len(len)).map_err(|e| {
            StoreError::write_failed(
                format!("Failed to write length prefix at offset {}", position),
                e,
            )
        })?;

        state.buf.write_all(payload).map_err(|e| {
            StoreError::write_failed(format!("Failed to write payload at offset {}", position), e)
        })?;

        state.size += written;

        Ok((written, position))
    }

    /// Reads the payload of the record starting at `position`.
    ///
    /// Flushes the whole write buffer first. `position` must be a record
    /// start; any other offset decodes whatever bytes happen to be there.
    ///
    /// # Errors
    ///
    /// - `LOG_STORE_FLUSH_FAILED` if the buffer cannot be flushed
    /// - `LOG_STORE_OUT_OF_RANGE` if the prefix or payload would extend past
    ///   the logical size
    /// - `LOG_STORE_READ_FAILED` if the positional read fails
    pub fn read(&self, position: u64) -> StoreResult<Vec<u8>> {
        let mut state = self.lock()?;
        state.flush()?;

        state.check_range(position, LEN_WIDTH)?;
        let mut prefix = [0u8; LEN_WIDTH as usize];
        state.read_exact_at(&mut prefix, position, "length prefix")?;

        let len = record::decode_len(prefix);
        let payload_offset = position + LEN_WIDTH;
        state.check_range(payload_offset, len)?;

        let payload_len = usize::try_from(len)
            .map_err(|_| StoreError::out_of_range(payload_offset, len, state.size))?;
        let mut payload = vec![0u8; payload_len];
        state.read_exact_at(&mut payload, payload_offset, "payload")?;

        Ok(payload)
    }

    /// Fills `buf` with raw store bytes starting at `offset`.
    ///
    /// Flushes first, like `read`. Returns the number of bytes read, which
    /// is always `buf.len()`.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> StoreResult<usize> {
        let mut state = self.lock()?;
        state.flush()?;

        state.check_range(offset, buf.len() as u64)?;
        state.read_exact_at(buf, offset, "raw bytes")?;

        Ok(buf.len())
    }

    /// Pushes buffered records to the file.
    pub fn flush(&self) -> StoreResult<()> {
        self.lock()?.flush()
    }

    /// Flushes, then asks the medium to persist the file.
    pub fn sync(&self) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.flush()?;
        state
            .buf
            .get_ref()
            .sync()
            .map_err(|e| StoreError::sync_failed("Failed to sync store file", e))
    }

    /// Logical size in bytes, including records not yet flushed.
    pub fn size(&self) -> StoreResult<u64> {
        Ok(self.lock()?.size)
    }

    /// Flushes the store and hands the file back to the caller.
    ///
    /// Fsyncs after the flush when `sync_on_close` is set. Dropping a store
    /// without calling `close` still flushes, but errors are lost.
    pub fn close(self) -> StoreResult<F> {
        let state = self
            .state
            .into_inner()
            .map_err(|_| StoreError::lock_poisoned())?;

        let file = state
            .buf
            .into_inner()
            .map_err(|e| StoreError::flush_failed("Failed to flush on close", e.into_error()))?;

        if self.sync_on_close {
            file.sync()
                .map_err(|e| StoreError::sync_failed("Failed to sync on close", e))?;
        }

        Ok(file)
    }
}
