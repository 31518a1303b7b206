//! CLI error types with miette diagnostics.
//!
//! Folds `CoreError` and `ConfigError` into user-facing errors with help
//! text and a distinct process exit code per failure class.

use miette::Diagnostic;
use thiserror::Error;

use evidenca_config::ConfigError;
use evidenca_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the back end at {url}")]
    #[diagnostic(
        code(evidenca::connection_failed),
        help(
            "Check the api_url of your profile or pass --api-url.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(evidenca::timeout),
        help("Raise the limit with --timeout <seconds> or `timeout` in your profile.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(evidenca::auth_failed),
        help("Sign in again with: evidenca login --email <address>")
    )]
    AuthFailed { message: String },

    #[error("Not signed in")]
    #[diagnostic(
        code(evidenca::not_signed_in),
        help(
            "Sign in with: evidenca login --email <address>\n\
             Or set EVIDENCA_TOKEN together with a stored session."
        )
    )]
    NotSignedIn,

    #[error("Your role may not {action}")]
    #[diagnostic(code(evidenca::not_permitted))]
    NotPermitted { action: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(evidenca::not_found),
        help("Run: evidenca {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Back end ─────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(evidenca::api_error))]
    ApiError { message: String, status: Option<u16> },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(evidenca::validation))]
    Validation { field: String, reason: String },

    #[error("'{action}' needs confirmation")]
    #[diagnostic(
        code(evidenca::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(evidenca::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: evidenca config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(evidenca::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not render TOML: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotSignedIn => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::NotPermitted { .. } => exit_code::PERMISSION,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Rejected { message } => Self::ApiError {
                message,
                status: None,
            },
            CoreError::Api { message, status } => Self::ApiError { message, status },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: format!("{}s list", entity_type.to_lowercase()),
                resource_type: entity_type,
                identifier,
            },
            CoreError::MissingIdentifier { operation } => Self::Validation {
                field: "id".into(),
                reason: format!("cannot {operation} without an identifier"),
            },
            CoreError::NoSelection => Self::Validation {
                field: "id".into(),
                reason: "nothing selected".into(),
            },
            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Config { message } | CoreError::Internal(message) => Self::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => {
                let cfg = evidenca_config::load_config_or_default();
                let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
                names.sort();
                let available = if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                };
                Self::ProfileNotFound { name, available }
            }
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_failure_class() {
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(CliError::NotSignedIn.exit_code(), exit_code::AUTH);
        assert_eq!(
            CliError::from(CoreError::AuthenticationFailed {
                message: "expired".into()
            })
            .exit_code(),
            exit_code::AUTH
        );
        assert_eq!(
            CliError::from(CoreError::ConnectionFailed {
                url: "http://localhost:1".into(),
                reason: "refused".into()
            })
            .exit_code(),
            exit_code::CONNECTION
        );
        assert_eq!(
            CliError::from(CoreError::NoSelection).exit_code(),
            exit_code::USAGE
        );
        assert_eq!(
            CliError::from(CoreError::Rejected {
                message: "slot taken".into()
            })
            .exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn not_found_points_at_list_command() {
        let err = CliError::from(CoreError::NotFound {
            entity_type: "Event".into(),
            identifier: "7".into(),
        });
        let CliError::NotFound { list_command, .. } = &err else {
            panic!("expected NotFound, got {err:?}");
        };
        assert_eq!(list_command, "events list");
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }
}
