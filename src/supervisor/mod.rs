//! Helper process supervision.
//!
//! Covers fire-and-forget launching of helper programs with per-launch log
//! capture, and asynchronous reaping of terminated children. Children are
//! detached by design: nothing waits on or kills them at session shutdown.

pub mod reaper;
pub mod spawner;

pub use reaper::{reap_exited, spawn_reaper, ReapedExit};
pub use spawner::Supervisor;
