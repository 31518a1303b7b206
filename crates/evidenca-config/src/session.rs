// Session persistence.
//
// The user profile goes to a JSON file in the data dir; the token goes to
// the system keyring when one is reachable and into the same file otherwise.
// `EVIDENCA_TOKEN` overrides whatever token is stored; `EVIDENCA_NO_KEYRING`
// keeps the token in the file (headless hosts).

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use evidenca_core::{Session, User};

use crate::ConfigError;

const KEYRING_SERVICE: &str = "evidenca";
const KEYRING_USER: &str = "session-token";

/// On-disk shape of the session file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Loads, saves and clears the signed-in session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    use_keyring: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Store at the platform data dir, token in the keyring unless
    /// `EVIDENCA_NO_KEYRING` is set.
    pub fn new() -> Self {
        Self {
            path: crate::session_path(),
            use_keyring: std::env::var_os("EVIDENCA_NO_KEYRING").is_none(),
        }
    }

    /// Store at an explicit path with the token kept in the file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            use_keyring: false,
        }
    }

    pub fn with_keyring(mut self, enabled: bool) -> Self {
        self.use_keyring = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, or `None` when nobody is signed in.
    pub fn load(&self) -> Result<Option<Session>, ConfigError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredSession = serde_json::from_str(&raw)?;

        let token = std::env::var("EVIDENCA_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.keyring_token())
            .or(stored.token);

        let Some(token) = token else {
            debug!(path = %self.path.display(), "session file without token");
            return Ok(None);
        };
        Ok(Some(Session::new(SecretString::from(token), stored.user)))
    }

    /// Persist `session`, replacing any previous one.
    pub fn save(&self, session: &Session) -> Result<(), ConfigError> {
        let in_keyring = self.use_keyring && self.store_in_keyring(&session.token);
        let stored = StoredSession {
            user: session.user.clone(),
            token: (!in_keyring).then(|| session.token.expose_secret().to_owned()),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        restrict_permissions(&self.path)?;
        debug!(path = %self.path.display(), in_keyring, "session saved");
        Ok(())
    }

    /// Forget the session. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<(), ConfigError> {
        if self.use_keyring {
            match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
                .and_then(|entry| entry.delete_credential())
            {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => warn!(error = %e, "could not remove token from keyring"),
            }
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keyring_token(&self) -> Option<String> {
        if !self.use_keyring {
            return None;
        }
        keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
            .and_then(|entry| entry.get_password())
            .ok()
    }

    fn store_in_keyring(&self, token: &SecretString) -> bool {
        match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
            .and_then(|entry| entry.set_password(token.expose_secret()))
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "keyring unavailable, keeping token in session file");
                false
            }
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}
