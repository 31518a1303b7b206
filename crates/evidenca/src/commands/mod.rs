//! Command dispatch: CLI args -> view models -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod events;
pub mod projects;
pub mod users;
pub mod util;
pub mod vehicles;

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;

/// Dispatch a back-end command. Everything except `login` needs a session.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => return auth::login(args, cfg, global).await,
        Command::Logout => return auth::logout(global),
        Command::Whoami => return auth::whoami(global),
        _ => {}
    }

    let session = config::require_session()?;
    let client_cfg = config::client_config(cfg, global, Some(session.token.clone()))?;
    let client = client_cfg.build_client()?;

    match cmd {
        Command::Events(args) => events::handle(args, client, session, &client_cfg, global).await,
        Command::Projects(args) => projects::handle(args, client, global).await,
        Command::Vehicles(args) => vehicles::handle(args, client, session, global).await,
        Command::Users(args) => users::handle(args, &client, global).await,
        Command::Login(_)
        | Command::Logout
        | Command::Whoami
        | Command::Config(_)
        | Command::Completions(_) => Ok(()),
    }
}
