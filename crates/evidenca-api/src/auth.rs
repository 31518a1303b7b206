// Login endpoint.
//
// `/login` answers with the token at the top level of the envelope rather
// than inside `data`, so it gets its own parsing instead of the shared
// envelope helper.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::EvidencaClient;
use crate::envelope::{error_message, is_truthy};
use crate::error::Error;
use crate::models::UserRecord;

/// Message shown when the back end rejects a login without saying why.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please check your credentials.";

/// Successful login: the opaque session token plus the user profile.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: SecretString,
    pub user: UserRecord,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginEnvelope {
    #[serde(default)]
    error: Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    data: Option<UserRecord>,
}

impl EvidencaClient {
    /// Authenticate with email and password.
    ///
    /// Any rejection (error flag, 401, missing token) comes back as
    /// `Error::Authentication` carrying the server's message or a fixed
    /// fallback.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        let url = self.url("login")?;
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let (status, text) = self.post_raw(url, &body).await?;

        let Ok(envelope) = serde_json::from_str::<LoginEnvelope>(&text) else {
            if status.is_success() {
                return Err(Error::Deserialization {
                    message: "login response is not a JSON envelope".into(),
                    body: text,
                });
            }
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(Error::Authentication {
                    message: LOGIN_FALLBACK_MESSAGE.into(),
                });
            }
            return Err(Error::Http {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        };

        if is_truthy(&envelope.error) || !status.is_success() {
            let message = if envelope.message.is_some() || envelope.error.is_string() {
                error_message(&envelope.error, envelope.message.as_deref())
            } else {
                LOGIN_FALLBACK_MESSAGE.into()
            };
            return Err(Error::Authentication { message });
        }

        let (Some(token), Some(user)) = (envelope.token.filter(|t| !t.is_empty()), envelope.data)
        else {
            return Err(Error::Authentication {
                message: LOGIN_FALLBACK_MESSAGE.into(),
            });
        };

        debug!(user_id = %user.id, "login accepted");
        Ok(LoginResponse {
            token: SecretString::from(token),
            user,
        })
    }
}
