//! File sink implementation

use crate::core::{LoggerError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file.
///
/// Output is buffered; call [`crate::Logger::flush`] (or drop the logger) to
/// push it to disk. With locking enabled every record is written under an
/// exclusive advisory lock and flushed immediately, so several processes can
/// share one file without splicing lines.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    locking: bool,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            locking: false,
        })
    }

    /// Take an exclusive file lock around each record
    ///
    /// ```no_run
    /// use logops::sinks::FileSink;
    ///
    /// let sink = FileSink::new("/var/log/app.log").unwrap().with_locking(true);
    /// ```
    #[must_use]
    pub fn with_locking(mut self, locking: bool) -> Self {
        self.locking = locking;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_locked(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.get_ref().lock_exclusive()?;
        let written = self
            .writer
            .write_all(buf)
            .and_then(|()| self.writer.flush());
        let unlocked = FileExt::unlock(self.writer.get_ref());
        written.and(unlocked)
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.locking {
            self.write_locked(buf)
        } else {
            self.writer.write_all(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            eprintln!(
                "[LOGOPS ERROR] Failed to flush '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}
