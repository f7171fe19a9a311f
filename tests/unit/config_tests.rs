//! Configuration defaults, parsing, and helper environment tests.

use std::path::Path;

use wayshell::config::{ShellConfig, TargetUser};
use wayshell::AppError;

#[test]
fn defaults_are_valid_fixed_policy() {
    let config = ShellConfig::default();

    assert_eq!(config.log_dir, Path::new("/var/log/v128"));
    assert_eq!(config.seat_name, "seat0");
    assert_eq!(
        config.target_user,
        TargetUser {
            name: "user".into(),
            uid: 1000,
            gid: 1000,
        }
    );
    assert_eq!(config.helpers.startup, "x128");
    assert_eq!(config.helpers.terminal, "cool-retro-term");
}

#[test]
fn empty_toml_yields_defaults() {
    let config = ShellConfig::from_toml_str("").expect("parse empty");
    assert_eq!(config, ShellConfig::default());
}

#[test]
fn toml_overrides_selected_fields() {
    let config = ShellConfig::from_toml_str(
        r#"
            log_dir = "/tmp/shell-logs"

            [target_user]
            name = "session"
            uid = 1200
            gid = 1201

            [helpers]
            terminal = "foot"
        "#,
    )
    .expect("parse overrides");

    assert_eq!(config.log_dir, Path::new("/tmp/shell-logs"));
    assert_eq!(config.target_user.name, "session");
    assert_eq!(config.target_user.uid, 1200);
    assert_eq!(config.target_user.gid, 1201);
    assert_eq!(config.helpers.terminal, "foot");
    // Untouched fields keep their defaults.
    assert_eq!(config.helpers.startup, "x128");
    assert_eq!(config.seat_name, "seat0");
}

#[test]
fn invalid_toml_is_a_config_error() {
    let err = ShellConfig::from_toml_str("log_dir = [").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn empty_target_user_name_is_rejected() {
    let err = ShellConfig::from_toml_str("[target_user]\nname = \"\"").expect_err("must fail");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn shell_log_path_is_inside_log_dir() {
    let config = ShellConfig::default();
    assert_eq!(config.shell_log_path(), Path::new("/var/log/v128/shell.log"));
}

#[test]
fn helper_env_carries_the_fixed_variable_set() {
    let config = ShellConfig::default();
    let env = config.helper_env("wayland-1");

    let get = |key: &str| {
        env.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("SDL_VIDEODRIVER"), Some("wayland"));
    assert_eq!(get("XDG_SESSION_TYPE"), Some("wayland"));
    assert_eq!(get("QT_QPA_PLATFORM"), Some("wayland"));
    assert_eq!(get("HOME"), Some("/home/user"));
    assert_eq!(get("USER"), Some("user"));
    assert_eq!(get("XDG_RUNTIME_DIR"), Some("/run/user/1000"));
    assert_eq!(get("WAYLAND_DISPLAY"), Some("wayland-1"));
    // The legacy X11 display is explicitly cleared, not omitted.
    assert_eq!(get("DISPLAY"), Some(""));
}
