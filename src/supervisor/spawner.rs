//! Helper process spawner.
//!
//! Each launch gets its own numbered log file and a detached
//! `/bin/sh -c <command>` child with stdout/stderr redirected there. The
//! supervisor keeps no process table — only the monotonic counter used for
//! log-file naming. Launch failures are logged and abandoned; they never
//! propagate to the caller.

use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{info, warn};

/// Fire-and-forget launcher for helper programs.
#[derive(Debug)]
pub struct Supervisor {
    log_dir: PathBuf,
    env: Vec<(String, String)>,
    next_index: AtomicU64,
}

impl Supervisor {
    /// A supervisor writing helper logs under `log_dir` and propagating
    /// `env` to every child.
    #[must_use]
    pub fn new(log_dir: impl Into<PathBuf>, env: Vec<(String, String)>) -> Self {
        Self {
            log_dir: log_dir.into(),
            env,
            next_index: AtomicU64::new(0),
        }
    }

    /// Launch `command` as a detached child.
    ///
    /// The child's stdin is closed and its stdout/stderr go to
    /// `<log_dir>/subprogram.<index>.log`; the index is monotonically
    /// increasing for the process lifetime and never reused. The parent
    /// does not wait — the reaper collects the exit status later.
    ///
    /// Failures (log-open, spawn) are logged and the request abandoned;
    /// no process is created and the supervisor is unaffected.
    ///
    /// Returns the child pid on success.
    pub fn launch(&self, command: &str) -> Option<u32> {
        let index = self.next_index.fetch_add(1, Ordering::SeqCst);
        let log_path = self.log_dir.join(format!("subprogram.{index}.log"));

        let log_file = match OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .mode(0o644)
            .open(&log_path)
        {
            Ok(file) => file,
            Err(err) => {
                warn!(
                    command,
                    log = %log_path.display(),
                    %err,
                    "launch abandoned: cannot open helper log"
                );
                return None;
            }
        };

        let stderr_file = match log_file.try_clone() {
            Ok(file) => file,
            Err(err) => {
                warn!(command, %err, "launch abandoned: cannot clone helper log handle");
                return None;
            }
        };

        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(stderr_file));
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        match cmd.spawn() {
            Ok(child) => {
                let pid = child.id();
                info!(command, pid, log = %log_path.display(), "helper launched");
                // Dropping the handle detaches the child; the SIGCHLD
                // reaper collects its status.
                drop(child);
                Some(pid)
            }
            Err(err) => {
                warn!(command, %err, "launch abandoned: spawn failed");
                None
            }
        }
    }

    /// Directory helper log files are written to.
    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}
