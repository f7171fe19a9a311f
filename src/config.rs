//! Shell configuration parsing and fixed session policy.
//!
//! Everything here has a working default so the shell runs without a config
//! file. Keybindings are deliberately *not* configurable; the table in
//! [`crate::input`] is fixed for the process lifetime.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{AppError, Result};

/// Target unprivileged identity for the one-shot privilege drop.
///
/// The shell may be started with elevated credentials in order to acquire
/// the DRM backend; once acquired it drops to this identity and never
/// re-escalates.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TargetUser {
    /// Login name, used to resolve the supplementary group list.
    #[serde(default = "default_user_name")]
    pub name: String,
    /// Numeric user id to drop to.
    #[serde(default = "default_user_id")]
    pub uid: u32,
    /// Numeric primary group id to drop to.
    #[serde(default = "default_user_id")]
    pub gid: u32,
}

impl Default for TargetUser {
    fn default() -> Self {
        Self {
            name: default_user_name(),
            uid: default_user_id(),
            gid: default_user_id(),
        }
    }
}

fn default_user_name() -> String {
    "user".into()
}

fn default_user_id() -> u32 {
    1000
}

/// Commands for the fixed set of helper programs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct HelperCommands {
    /// Helper launched unconditionally once the session is up.
    #[serde(default = "default_startup_command")]
    pub startup: String,
    /// Terminal emulator bound to ALT+t.
    #[serde(default = "default_terminal_command")]
    pub terminal: String,
    /// Secondary display helper bound to ALT+v.
    #[serde(default = "default_video_command")]
    pub video: String,
}

impl Default for HelperCommands {
    fn default() -> Self {
        Self {
            startup: default_startup_command(),
            terminal: default_terminal_command(),
            video: default_video_command(),
        }
    }
}

fn default_startup_command() -> String {
    "x128".into()
}

fn default_terminal_command() -> String {
    "cool-retro-term".into()
}

fn default_video_command() -> String {
    "SDL_VIDEODRIVER=wayland x128".into()
}

/// Global configuration parsed from `wayshell.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ShellConfig {
    /// Directory holding the main log and per-launch helper logs.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Seat name announced to the windowing backend.
    #[serde(default = "default_seat_name")]
    pub seat_name: String,
    /// Identity to de-escalate to after backend acquisition.
    #[serde(default)]
    pub target_user: TargetUser,
    /// Fixed helper program commands.
    #[serde(default)]
    pub helpers: HelperCommands,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            seat_name: default_seat_name(),
            target_user: TargetUser::default(),
            helpers: HelperCommands::default(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("/var/log/v128")
}

fn default_seat_name() -> String {
    "seat0".into()
}

impl ShellConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the main shell log inside `log_dir`.
    #[must_use]
    pub fn shell_log_path(&self) -> PathBuf {
        self.log_dir.join("shell.log")
    }

    /// Environment propagated to every spawned helper.
    ///
    /// External helper programs depend on these being present; `DISPLAY` is
    /// explicitly cleared so nothing falls back to a stale X11 display.
    #[must_use]
    pub fn helper_env(&self, socket_name: &str) -> Vec<(String, String)> {
        vec![
            ("SDL_VIDEODRIVER".into(), "wayland".into()),
            ("XDG_SESSION_TYPE".into(), "wayland".into()),
            ("QT_QPA_PLATFORM".into(), "wayland".into()),
            ("HOME".into(), format!("/home/{}", self.target_user.name)),
            ("USER".into(), self.target_user.name.clone()),
            (
                "XDG_RUNTIME_DIR".into(),
                format!("/run/user/{}", self.target_user.uid),
            ),
            ("WAYLAND_DISPLAY".into(), socket_name.into()),
            ("_WAYLAND_DISPLAY".into(), socket_name.into()),
            ("DISPLAY".into(), String::new()),
        ]
    }

    fn validate(&self) -> Result<()> {
        if self.target_user.name.is_empty() {
            return Err(AppError::Config("target_user.name must not be empty".into()));
        }
        if self.seat_name.is_empty() {
            return Err(AppError::Config("seat_name must not be empty".into()));
        }
        if self.log_dir.as_os_str().is_empty() {
            return Err(AppError::Config("log_dir must not be empty".into()));
        }
        Ok(())
    }
}
