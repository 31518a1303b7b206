//! login / logout / whoami.

use secrecy::SecretString;

use evidenca_config::SessionStore;
use evidenca_core::{LoginForm, User};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn login(args: LoginArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let password = match args.password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ").map_err(util::prompt_err)?,
    };
    let password = SecretString::from(password);

    let client = config::client_config(cfg, global, None)?.build_client()?;
    let mut form = LoginForm::new(client);

    let spinner = output::spinner("Signing in", global);
    let result = form.login(&args.email, &password).await;
    spinner.finish_and_clear();
    let session = result?;

    SessionStore::new().save(&session)?;
    output::notice(
        &format!(
            "Signed in as {} ({})",
            session.user.display_name(),
            session.user.role
        ),
        global,
    );
    Ok(())
}

pub fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    SessionStore::new().clear()?;
    output::notice("Signed out", global);
    Ok(())
}

pub fn whoami(global: &GlobalOpts) -> Result<(), CliError> {
    let session = config::require_session()?;
    let out = output::render_single(
        output::format(global),
        &session.user,
        detail,
        |u| u.id.to_string(),
    )?;
    output::print_output(&out, global);
    Ok(())
}

fn detail(user: &User) -> String {
    format!(
        "{}\n  ID:    {}\n  Email: {}\n  Role:  {}",
        user.display_name(),
        user.id,
        user.email.as_deref().unwrap_or("-"),
        user.role
    )
}
