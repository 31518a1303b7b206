// ── Session and user identity ──
//
// The session is an explicit value handed to each view at construction.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;

/// Access level carried on the user profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[strum(serialize = "superadmin")]
    SuperAdmin,
    #[strum(serialize = "admin")]
    Admin,
    #[default]
    #[strum(serialize = "user")]
    User,
}

impl Role {
    /// Unknown or missing roles get the least privilege.
    pub fn from_wire(raw: Option<&str>) -> Self {
        raw.and_then(|r| r.trim().parse().ok()).unwrap_or_default()
    }

    /// Sees every owner's events and registers vehicles for other users.
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// May create bookings.
    pub fn can_schedule(self) -> bool {
        !matches!(self, Self::User)
    }
}

/// The signed-in person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn display_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Token plus profile, as returned by a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: User,
}

impl Session {
    pub fn new(token: SecretString, user: User) -> Self {
        Self { token, user }
    }
}

/// Join first and last name, dropping whichever is blank.
pub(crate) fn full_name(first: &str, last: &str) -> String {
    match (first.trim(), last.trim()) {
        ("", l) => l.to_owned(),
        (f, "") => f.to_owned(),
        (f, l) => format!("{f} {l}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_lenient() {
        assert_eq!(Role::from_wire(Some("superadmin")), Role::SuperAdmin);
        assert_eq!(Role::from_wire(Some("Admin")), Role::Admin);
        assert_eq!(Role::from_wire(Some("mechanic")), Role::User);
        assert_eq!(Role::from_wire(None), Role::User);
    }

    #[test]
    fn privileges() {
        assert!(Role::SuperAdmin.is_privileged());
        assert!(!Role::Admin.is_privileged());
        assert!(Role::Admin.can_schedule());
        assert!(!Role::User.can_schedule());
    }

    #[test]
    fn names_join_cleanly() {
        assert_eq!(full_name("Ana", "Novak"), "Ana Novak");
        assert_eq!(full_name("Ana", ""), "Ana");
        assert_eq!(full_name("", ""), "");
    }
}
