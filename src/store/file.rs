//! File capability used by the store
//!
//! The store only needs a few things from its medium: a write cursor at
//! the end, sequential writes, and positional reads. Everything else
//! (name, stat, close) belongs to whoever owns the store.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

/// Narrow file interface the store is built on.
///
/// Writes go through `std::io::Write` from the current cursor. Reads are
/// absolute and must leave the write cursor where it was.
pub trait StoreFile: Write + Send {
    /// Moves the write cursor to the end of the medium and returns the
    /// medium's size in bytes.
    ///
    /// Called once when a store is built, so appends continue after the
    /// existing contents whatever mode the handle was opened in.
    fn seek_end(&mut self) -> io::Result<u64>;

    /// Fills `buf` with the bytes starting at `offset`.
    ///
    /// Must fail with `UnexpectedEof` if fewer than `buf.len()` bytes exist.
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()>;

    /// Asks the medium to persist everything written so far.
    fn sync(&self) -> io::Result<()>;
}

impl StoreFile for File {
    fn seek_end(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::End(0))
    }

    #[cfg(unix)]
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        std::os::unix::fs::FileExt::read_exact_at(self, buf, offset)
    }

    // seek_read moves the file cursor. The store always flushes before
    // reading, so the end of the file is where the next write belongs.
    #[cfg(windows)]
    fn read_exact_at(&self, mut buf: &mut [u8], mut offset: u64) -> io::Result<()> {
        use std::os::windows::fs::FileExt;

        let result = loop {
            if buf.is_empty() {
                break Ok(());
            }
            match self.seek_read(buf, offset) {
                Ok(0) => {
                    break Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "failed to fill whole buffer",
                    ))
                }
                Ok(n) => {
                    let rest = buf;
                    buf = &mut rest[n..];
                    offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => break Err(e),
            }
        };

        (&*self).seek(SeekFrom::End(0))?;
        result
    }

    #[cfg(not(any(unix, windows)))]
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        use std::io::Read;

        let mut file = self;
        file.seek(SeekFrom::Start(offset))?;
        let result = file.read_exact(buf);
        file.seek(SeekFrom::End(0))?;
        result
    }

    fn sync(&self) -> io::Result<()> {
        self.sync_all()
    }
}
