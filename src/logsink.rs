//! Process-wide append-only log stream.
//!
//! Opened once at startup, torn down implicitly at process exit. Two paths
//! write here: the buffered tracing pipeline (everything in normal context)
//! and the raw descriptor (signal handlers, which must bypass buffering).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use crate::{AppError, Result};

/// The main shell log: a writable stream plus its raw descriptor.
#[derive(Debug, Clone)]
pub struct LogSink {
    file: Arc<File>,
}

impl LogSink {
    /// Open (create/truncate) the log target.
    ///
    /// The file is opened with `O_SYNC` so every short record hits the disk
    /// in order; writes are line-atomic at the OS level, which is why the
    /// descriptor can be shared with signal-handler contexts without locks.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Log` when the parent directory cannot be created
    /// or the file cannot be opened. Callers treat this as fatal-startup.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                AppError::Log(format!("cannot create log dir {}: {err}", parent.display()))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .mode(0o644)
            .open(path)
            .map_err(|err| AppError::Log(format!("cannot open {}: {err}", path.display())))?;

        Ok(Self {
            file: Arc::new(file),
        })
    }

    /// Append a newline-terminated record, flushed immediately.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Log` if the write fails.
    pub fn write_line(&self, msg: &str) -> Result<()> {
        let mut out = self.file.as_ref();
        out.write_all(msg.as_bytes())
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush())
            .map_err(|err| AppError::Log(format!("log write failed: {err}")))
    }

    /// The underlying raw descriptor.
    ///
    /// Stays usable independently of the buffered writer so that
    /// reentrancy-constrained callers (the fault handler) can bypass
    /// buffering entirely.
    #[must_use]
    pub fn raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }

    /// Writer handle for the tracing subscriber.
    #[must_use]
    pub fn writer(&self) -> LogWriter {
        LogWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// `MakeWriter` bridge letting `tracing-subscriber` write through the sink.
#[derive(Debug, Clone)]
pub struct LogWriter {
    file: Arc<File>,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.as_ref().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.as_ref().flush()
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
