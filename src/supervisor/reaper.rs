//! Asynchronous child reaping.
//!
//! Child terminations arrive as SIGCHLD. The tokio signal driver turns the
//! actual handler into a self-pipe wakeup, so all real work — the
//! non-blocking `waitpid` drain and its logging — runs on the session loop
//! in normal context. One notification can coalesce several terminations,
//! so every wakeup drains until nothing further is immediately reapable.

use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{AppError, Result};

/// Transient record of one collected child exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReapedExit {
    /// Pid of the terminated child.
    pub pid: i32,
    /// Exit code, or the terminating signal number negated.
    pub code: i32,
}

/// Drain every currently terminated child without blocking.
///
/// Each collected `{pid, exit code}` pair is logged; signal terminations
/// are logged with the signal. Returns the collected records. Never blocks
/// waiting for a specific child and never restarts anything — child failure
/// is purely informational.
pub fn reap_exited() -> Vec<ReapedExit> {
    let mut reaped = Vec::new();
    loop {
        match waitpid(None, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(pid, code)) => {
                info!(pid = pid.as_raw(), code, "helper exited");
                reaped.push(ReapedExit {
                    pid: pid.as_raw(),
                    code,
                });
            }
            Ok(WaitStatus::Signaled(pid, sig, _)) => {
                info!(pid = pid.as_raw(), signal = %sig, "helper killed by signal");
                reaped.push(ReapedExit {
                    pid: pid.as_raw(),
                    code: -(sig as i32),
                });
            }
            // Children exist but none are terminated right now.
            Ok(WaitStatus::StillAlive) => break,
            Ok(_) => {}
            // ECHILD: no children at all.
            Err(nix::errno::Errno::ECHILD) => break,
            Err(err) => {
                warn!(%err, "waitpid failed while reaping");
                break;
            }
        }
    }
    reaped
}

/// Spawn the reaper task: drain terminated children on every SIGCHLD until
/// the token is cancelled.
///
/// # Errors
///
/// Returns `AppError::Backend` if the SIGCHLD stream cannot be installed.
pub fn spawn_reaper(cancel: CancellationToken) -> Result<tokio::task::JoinHandle<()>> {
    let mut sigchld = signal(SignalKind::child())
        .map_err(|err| AppError::Backend(format!("cannot install SIGCHLD stream: {err}")))?;

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                received = sigchld.recv() => {
                    if received.is_none() {
                        error!("SIGCHLD stream closed unexpectedly");
                        break;
                    }
                    let _ = reap_exited();
                }
            }
        }
    }))
}
