use thiserror::Error;

/// Top-level error type for the `evidenca-api` crate.
///
/// Covers transport failures, HTTP-level failures, and logical failures the
/// back end reports through the envelope's `error` flag. `evidenca-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected, or the back end answered 401.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx response that carried no usable envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Envelope ────────────────────────────────────────────────────
    /// The envelope's `error` flag was truthy.
    #[error("Server reported an error: {message}")]
    Api { message: String },

    /// Success envelope without the `data` payload the endpoint must return.
    #[error("Response from {endpoint} carried no data")]
    MissingData { endpoint: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the session token was rejected.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for failures that never reached the back end's logic.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn envelope_errors_are_not_transient() {
        let err = Error::Api {
            message: "no such event".into(),
        };
        assert!(!err.is_transient());
        assert!(!err.is_auth_expired());
    }
}
