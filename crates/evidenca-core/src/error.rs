// ── Core error types ──
//
// What views and front ends see. Transport details are folded into a small
// set of variants by the `From<evidenca_api::Error>` impl; local precondition
// failures never touch the network.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the back end at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Server-side failures ─────────────────────────────────────────
    /// The back end flagged the request as failed.
    #[error("Rejected by the back end: {message}")]
    Rejected { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Local preconditions ──────────────────────────────────────────
    #[error("Cannot {operation}: no identifier")]
    MissingIdentifier { operation: &'static str },

    #[error("Nothing is selected")]
    NoSelection,

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<evidenca_api::Error> for CoreError {
    fn from(err: evidenca_api::Error) -> Self {
        match err {
            evidenca_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            evidenca_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            evidenca_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            evidenca_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            evidenca_api::Error::Http { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                },
                status: Some(status),
            },
            evidenca_api::Error::Api { message } => CoreError::Rejected { message },
            evidenca_api::Error::MissingData { endpoint } => {
                CoreError::Internal(format!("{endpoint} answered without data"))
            }
            evidenca_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

impl CoreError {
    /// Local precondition failures: no request was attempted.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingIdentifier { .. } | Self::NoSelection | Self::Validation { .. }
        )
    }
}
