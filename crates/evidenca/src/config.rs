//! CLI configuration: thin layer over `evidenca_config`.
//!
//! Resolves the active profile, applies `GlobalOpts` overrides (--api-url,
//! --insecure, --timeout) and loads the stored session.

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use evidenca_config::{SessionStore, profile_to_client_config};
use evidenca_core::{ClientConfig, Session, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use evidenca_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

/// Fill unset `--output` / `--color` from the config's `[defaults]`.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&cfg.defaults.color, true).ok();
    }
}

/// Build a `ClientConfig` for the active profile with flag overrides.
///
/// `token` is `None` only for `login`.
pub fn client_config(
    cfg: &Config,
    global: &GlobalOpts,
    token: Option<SecretString>,
) -> Result<ClientConfig, CliError> {
    let (name, profile) = cfg.resolve_profile(global.profile.as_deref())?;
    tracing::debug!(profile = %name, "resolved profile");

    let mut client = profile_to_client_config(&profile, &cfg.defaults, token)?;

    if let Some(ref raw) = global.api_url {
        client.url = raw.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Some(Duration::from_secs(secs));
    }
    Ok(client)
}

/// The stored session; signing in first is the caller's only way out.
pub fn require_session() -> Result<Session, CliError> {
    SessionStore::new().load()?.ok_or(CliError::NotSignedIn)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["evidenca"];
        argv.extend_from_slice(args);
        argv.push("whoami");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile() {
        let cfg = Config::default();
        let opts = global(&["--api-url", "http://localhost:5000", "-k", "--timeout", "5"]);

        let client = client_config(&cfg, &opts, None).unwrap();

        assert_eq!(client.url.as_str(), "http://localhost:5000/");
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(client.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn bad_url_is_a_usage_error() {
        let cfg = Config::default();
        let opts = global(&["--api-url", "not a url"]);
        let err = client_config(&cfg, &opts, None).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn config_defaults_fill_unset_output() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();

        let mut opts = global(&[]);
        apply_defaults(&mut opts, &cfg);
        assert_eq!(opts.output, Some(OutputFormat::Yaml));

        let mut opts = global(&["-o", "json"]);
        apply_defaults(&mut opts, &cfg);
        assert_eq!(opts.output, Some(OutputFormat::Json));
    }
}
