//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};

use evidenca_core::{Bay, VisibilityPolicy};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = match output::format(global) {
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)?,
                format => output::render_single(format, &cfg, |_| String::new(), |_| String::new())?,
            };
            output::print_output(&out, global);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global);
            Ok(())
        }
    }
}

/// Interactive wizard: adds (or replaces) one profile.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    eprintln!("Evidenca configuration");
    eprintln!("  Config path: {}\n", config::config_path().display());

    let name: String = Input::new()
        .with_prompt("Profile name")
        .default(evidenca_config::DEFAULT_PROFILE.into())
        .interact_text()
        .map_err(prompt_err)?;

    let api_url: String = Input::new()
        .with_prompt("Back-end URL")
        .default(evidenca_api::DEFAULT_BASE_URL.into())
        .validate_with(|raw: &String| -> Result<(), String> {
            url::Url::parse(raw).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;

    let bays: Vec<String> = Bay::ALL.iter().map(ToString::to_string).collect();
    let bay = Select::new()
        .with_prompt("Bay the calendar opens on")
        .items(&bays)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let policies = [VisibilityPolicy::ResourceOnly, VisibilityPolicy::OwnerScoped];
    let labels = [
        "Everyone sees every booking on a bay",
        "Regular users see only their own bookings",
    ];
    let policy = Select::new()
        .with_prompt("Booking visibility")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let insecure = Confirm::new()
        .with_prompt("Accept invalid TLS certificates (development back ends only)?")
        .default(false)
        .interact()
        .map_err(prompt_err)?;

    let profile = Profile {
        api_url,
        insecure: insecure.then_some(true),
        default_calendar: bays.get(bay).cloned(),
        visibility: policies.get(policy).map(ToString::to_string),
        ..Profile::default()
    };
    cfg.profiles.insert(name.clone(), profile);

    let make_default = cfg.default_profile.as_deref() == Some(name.as_str())
        || Confirm::new()
            .with_prompt(format!("Use '{name}' as the default profile?"))
            .default(true)
            .interact()
            .map_err(prompt_err)?;
    if make_default {
        cfg.default_profile = Some(name.clone());
    }

    let path = config::save_config(&cfg)?;
    output::notice(
        &format!("Profile '{name}' saved to {}", path.display()),
        global,
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn shown_config_is_valid_toml() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "shop".into(),
            Profile {
                api_url: "http://localhost:5000".into(),
                default_calendar: Some("Bay-2".into()),
                ..Profile::default()
            },
        );
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.profiles["shop"].default_calendar.as_deref(), Some("Bay-2"));
    }
}
