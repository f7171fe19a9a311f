//! One-shot privilege de-escalation.
//!
//! The shell may start with elevated credentials to acquire the DRM
//! backend. Immediately afterwards — and before any externally supplied
//! command string runs — it drops to the fixed unprivileged identity.
//! Ordering is load-bearing: supplementary groups, then gid, then uid.
//! Dropping the uid first would remove the permission needed to change
//! the gid afterwards. The transition is irreversible; any failure is
//! fatal.

use std::ffi::CString;

use nix::unistd::{self, Gid, Uid};
use tracing::info;

use crate::config::TargetUser;
use crate::{AppError, Result};

/// Identity syscalls behind a seam so tests can record call order.
pub trait IdentityOps {
    /// Current real user id.
    fn uid(&self) -> u32;
    /// Current real group id.
    fn gid(&self) -> u32;
    /// Supplementary groups for `user` with primary group `gid`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Privilege` if the user's group list cannot be
    /// resolved.
    fn group_list(&mut self, user: &str, gid: u32) -> Result<Vec<u32>>;
    /// Replace the supplementary group list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Privilege` on failure.
    fn set_groups(&mut self, groups: &[u32]) -> Result<()>;
    /// Set the real group id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Privilege` on failure.
    fn set_gid(&mut self, gid: u32) -> Result<()>;
    /// Set the real user id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Privilege` on failure.
    fn set_uid(&mut self, uid: u32) -> Result<()>;
}

/// Real identity operations backed by nix.
#[derive(Debug, Default)]
pub struct SystemIdentity;

impl IdentityOps for SystemIdentity {
    fn uid(&self) -> u32 {
        unistd::getuid().as_raw()
    }

    fn gid(&self) -> u32 {
        unistd::getgid().as_raw()
    }

    fn group_list(&mut self, user: &str, gid: u32) -> Result<Vec<u32>> {
        let name = CString::new(user)
            .map_err(|_| AppError::Privilege("user name contains a NUL byte".into()))?;
        let groups = unistd::getgrouplist(&name, Gid::from_raw(gid))
            .map_err(|err| AppError::Privilege(format!("getgrouplist for {user}: {err}")))?;
        Ok(groups.iter().map(|g| g.as_raw()).collect())
    }

    fn set_groups(&mut self, groups: &[u32]) -> Result<()> {
        let gids: Vec<Gid> = groups.iter().map(|&g| Gid::from_raw(g)).collect();
        unistd::setgroups(&gids)
            .map_err(|err| AppError::Privilege(format!("setgroups: {err}")))
    }

    fn set_gid(&mut self, gid: u32) -> Result<()> {
        unistd::setgid(Gid::from_raw(gid))
            .map_err(|err| AppError::Privilege(format!("setgid({gid}): {err}")))
    }

    fn set_uid(&mut self, uid: u32) -> Result<()> {
        unistd::setuid(Uid::from_raw(uid))
            .map_err(|err| AppError::Privilege(format!("setuid({uid}): {err}")))
    }
}

/// De-escalate to the target identity.
///
/// No-op (zero identity calls) when the current uid already equals the
/// target. Otherwise applies supplementary groups, then gid, then uid, in
/// that exact order.
///
/// # Errors
///
/// Returns `AppError::Privilege` on any step failure; callers must treat
/// this as fatal and terminate rather than continue with partial
/// privileges.
pub fn drop_privileges(ops: &mut dyn IdentityOps, target: &TargetUser) -> Result<()> {
    info!(uid = ops.uid(), gid = ops.gid(), "current identity");
    if ops.uid() == target.uid {
        return Ok(());
    }

    info!(
        user = target.name,
        uid = target.uid,
        gid = target.gid,
        "dropping privileges"
    );
    let groups = ops.group_list(&target.name, target.gid)?;
    ops.set_groups(&groups)?;
    ops.set_gid(target.gid)?;
    ops.set_uid(target.uid)?;

    info!(uid = ops.uid(), gid = ops.gid(), "now running unprivileged");
    Ok(())
}
