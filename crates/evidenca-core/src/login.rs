// ── Login form ──
//
// One `POST /login`. The caller owns persistence of the returned session.

use secrecy::SecretString;
use tracing::{info, warn};

use evidenca_api::LOGIN_FALLBACK_MESSAGE;

use crate::backend::AuthBackend;
use crate::error::CoreError;
use crate::model::Session;

pub struct LoginForm<B> {
    backend: B,
    last_error: Option<String>,
}

impl<B: AuthBackend> LoginForm<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            last_error: None,
        }
    }

    /// Exchange credentials for a session.
    ///
    /// Every rejection surfaces as `AuthenticationFailed`; transport failures
    /// keep their own variant.
    pub async fn login(&mut self, email: &str, password: &SecretString) -> Result<Session, CoreError> {
        match self.backend.login(email.trim(), password).await {
            Ok(response) => {
                let session = Session::from(response);
                info!(user = %session.user.id, role = %session.user.role, "signed in");
                self.last_error = None;
                Ok(session)
            }
            Err(err) => {
                let err = match err {
                    CoreError::Rejected { message } => CoreError::AuthenticationFailed { message },
                    CoreError::AuthenticationFailed { message } if message.trim().is_empty() => {
                        CoreError::AuthenticationFailed {
                            message: LOGIN_FALLBACK_MESSAGE.into(),
                        }
                    }
                    other => other,
                };
                warn!(error = %err, "login failed");
                self.last_error = Some(match &err {
                    CoreError::AuthenticationFailed { message } => message.clone(),
                    other => other.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Message to show under the form.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{EntityId, Role};
    use crate::testing::RecordingBackend;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn successful_login_builds_session() {
        let mut form = LoginForm::new(RecordingBackend::new());
        let session = form
            .login(" ana@example.com ", &secret("correct horse"))
            .await
            .unwrap();
        assert_eq!(session.user.id, EntityId::Number(4));
        assert_eq!(session.user.role, Role::Admin);
        assert_eq!(session.user.display_name(), "Ana Novak");
        assert!(form.last_error().is_none());
    }

    #[tokio::test]
    async fn rejected_login_shows_fallback_message() {
        let mut form = LoginForm::new(RecordingBackend::new());
        let err = form
            .login("ana@example.com", &secret("wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
        assert_eq!(form.last_error(), Some(LOGIN_FALLBACK_MESSAGE));
    }
}
