//! `wayshell` — minimal Wayland session shell.
//!
//! Supervises a fixed set of helper processes, tracks and focuses
//! application windows ("views"), and routes keyboard input either to the
//! shell itself (compositor commands) or onward to the focused client.
//! Rendering and protocol handling are delegated to the windowing backend;
//! this crate only consumes its lifecycle events and issues commands back.

pub mod backend;
pub mod compositor;
pub mod config;
pub mod errors;
pub mod fault;
pub mod input;
pub mod logsink;
pub mod privileges;
pub mod session;
pub mod supervisor;
pub mod views;

pub use config::ShellConfig;
pub use errors::{AppError, Result};
