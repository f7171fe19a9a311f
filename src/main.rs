//! `wayshell` — session shell binary.
//!
//! Bootstraps the log sink, fault capture, configuration, and the
//! windowing backend, drops privileges, launches the startup helper, and
//! runs the session event loop.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use wayshell::backend::{Backend, Headless};
use wayshell::logsink::LogSink;
use wayshell::privileges::{self, SystemIdentity};
use wayshell::session::Session;
use wayshell::supervisor::{self, Supervisor};
use wayshell::{fault, AppError, Result, ShellConfig};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "wayshell", about = "Minimal Wayland session shell", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file; built-in defaults when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Override the log directory from the config.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Display socket name announced to helper programs.
    #[arg(long, default_value = "wayland-0")]
    socket: String,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => ShellConfig::load_from_path(path)?,
        None => ShellConfig::default(),
    };
    if let Some(dir) = &args.log_dir {
        config.log_dir.clone_from(dir);
    }

    // The log sink comes up before every other component; failure here is
    // fatal and reported on stderr by the Err return.
    let sink = LogSink::init(config.shell_log_path())?;
    init_tracing(&sink, args.log_format)?;
    fault::install(sink.raw_fd())?;

    info!("wayshell starting");

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args, Arc::new(config)))
}

async fn run(args: Cli, config: Arc<ShellConfig>) -> Result<()> {
    let cancel = CancellationToken::new();

    // Reap terminated helpers for the whole session lifetime.
    let reaper = supervisor::spawn_reaper(cancel.clone())?;

    // Backend acquisition. The headless backend always comes up; a DRM
    // backend would fail here and abort startup.
    let (mut backend, _event_tx, mut events) = Headless::create(args.socket);
    info!(socket = backend.socket_name(), "backend acquired");

    // Elevated credentials were only needed for backend acquisition; drop
    // them before any externally supplied command string runs.
    privileges::drop_privileges(&mut SystemIdentity, &config.target_user)?;

    let supervisor = Arc::new(Supervisor::new(
        config.log_dir.clone(),
        config.helper_env(backend.socket_name()),
    ));
    supervisor.launch(&config.helpers.startup);

    let mut session = Session::new(Arc::clone(&config), Arc::clone(&supervisor), cancel.clone());

    // External termination (ctrl-c, SIGTERM) funnels into the same token
    // the Quit keybinding uses.
    tokio::spawn(shutdown_signal(cancel.clone()));

    session.run(&mut backend, &mut events).await;

    // Helpers stay detached past shutdown by design; only the reaper task
    // is joined.
    cancel.cancel();
    let _ = reaper.await;

    info!("wayshell shut down");
    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = tokio::signal::ctrl_c();

    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = ctrl_c => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(err) => {
            error!(%err, "failed to register SIGTERM handler, using ctrl-c only");
            let _ = ctrl_c.await;
        }
    }

    cancel.cancel();
}

fn init_tracing(sink: &LogSink, log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(sink.writer())
        .with_ansi(false);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
