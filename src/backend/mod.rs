//! Windowing backend implementations.
//!
//! The real session runs atop an external compositor library; this module
//! defines the thin trait the bootstrap needs beyond [`WindowCommands`]
//! and ships the headless development backend.

pub mod headless;

use crate::compositor::WindowCommands;

pub use headless::Headless;

/// A windowing backend: command sink plus the display socket it serves.
pub trait Backend: WindowCommands {
    /// Name of the display socket clients connect to, exported to helpers
    /// as `WAYLAND_DISPLAY`.
    fn socket_name(&self) -> &str;
}
