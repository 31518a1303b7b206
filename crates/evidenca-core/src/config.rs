// ── Runtime connection configuration ──
//
// Describes *how* to reach the back end and how views behave. Never touches
// disk: the CLI/TUI builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use evidenca_api::{EvidencaClient, TlsMode, TransportConfig};

use crate::calendar::VisibilityPolicy;
use crate::error::CoreError;
use crate::model::Bay;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development back ends).
    DangerAcceptInvalid,
}

/// Everything needed to build a client and open views.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Back-end origin.
    pub url: Url,
    pub tls: TlsVerification,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Session token, if signed in.
    pub token: Option<SecretString>,
    /// Bay the calendar opens on.
    pub default_calendar: Bay,
    pub visibility: VisibilityPolicy,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: None,
            token: None,
            default_calendar: Bay::default(),
            visibility: VisibilityPolicy::default(),
        }
    }

    /// Transport settings for `evidenca-api`.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            bearer_token: self.token.clone(),
        }
    }

    /// Build the HTTP client.
    pub fn build_client(&self) -> Result<EvidencaClient, CoreError> {
        Ok(EvidencaClient::new(self.url.clone(), &self.transport())?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn transport_carries_token_and_timeout() {
        let mut config = ClientConfig::new(Url::parse(evidenca_api::DEFAULT_BASE_URL).unwrap());
        config.timeout = Some(Duration::from_secs(5));
        config.token = Some(SecretString::from("tok".to_string()));
        config.tls = TlsVerification::DangerAcceptInvalid;

        let transport = config.transport();
        assert_eq!(transport.timeout, Some(Duration::from_secs(5)));
        assert!(transport.bearer_token.is_some());
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
    }
}
