//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
///
/// Every fallible operation yields one of these locally; fatal-startup
/// variants escalate to a non-zero exit in `main`, everything else is
/// consumed (and logged) at the call site.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Main log stream could not be opened or written.
    Log(String),
    /// Windowing backend acquisition or event-loop failure.
    Backend(String),
    /// Privilege de-escalation failure; never continued past.
    Privilege(String),
    /// Helper process launch failure (log-open or spawn).
    Spawn(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Log(msg) => write!(f, "log: {msg}"),
            Self::Backend(msg) => write!(f, "backend: {msg}"),
            Self::Privilege(msg) => write!(f, "privilege: {msg}"),
            Self::Spawn(msg) => write!(f, "spawn: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
