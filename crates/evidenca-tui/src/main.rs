//! `evidenca-tui`: terminal front end for bay reservations and the project
//! board.
//!
//! Logs go to a file under the data dir so they never land on the screen
//! being drawn. Connection settings come from the same profiles as the
//! `evidenca` CLI, and so does the stored session.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use evidenca_config::SessionStore;
use evidenca_core::{ClientConfig, TlsVerification};

use crate::app::App;

const LOG_FILE: &str = "evidenca-tui.log";

/// Book bays and track projects from the terminal.
#[derive(Parser, Debug)]
#[command(name = "evidenca-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short, long, env = "EVIDENCA_PROFILE")]
    profile: Option<String>,

    /// Back-end URL, overriding the profile
    #[arg(long, env = "EVIDENCA_API_URL")]
    api_url: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long, env = "EVIDENCA_INSECURE")]
    insecure: bool,

    /// Log file (defaults to evidenca-tui.log in the data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. Keep the guard alive until exit so buffered lines
/// are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "evidenca_tui={level},evidenca_core={level},evidenca_api={level}"
        ))
    });

    let path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| evidenca_config::log_dir().join(LOG_FILE));
    let dir = path
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let file = path
        .file_name()
        .map_or_else(|| LOG_FILE.into(), std::ffi::OsStr::to_os_string);
    let _ = std::fs::create_dir_all(&dir);

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();
    guard
}

/// Profile settings with the command-line overrides applied. The token is
/// added later, once there is a session.
fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let cfg = evidenca_config::load_config()?;
    let (name, profile) = cfg.resolve_profile(cli.profile.as_deref())?;
    let mut client_cfg = evidenca_config::profile_to_client_config(&profile, &cfg.defaults, None)
        .wrap_err_with(|| format!("profile '{name}' is not usable"))?;

    if let Some(ref raw) = cli.api_url {
        client_cfg.url = raw
            .parse()
            .wrap_err_with(|| format!("invalid --api-url '{raw}'"))?;
    }
    if cli.insecure {
        client_cfg.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(client_cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_tracing(&cli);
    tui::install_hooks()?;

    let client_cfg = client_config(&cli)?;
    let store = SessionStore::new();
    let session = store.load().unwrap_or_else(|e| {
        warn!(error = %e, "stored session unreadable, signing in again");
        None
    });
    info!(url = %client_cfg.url, signed_in = session.is_some(), "starting evidenca-tui");

    let mut app = App::new(client_cfg, store, session)?;
    app.run().await
}
