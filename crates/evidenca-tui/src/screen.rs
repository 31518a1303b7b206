//! Screen identifiers and tab order.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// Shown until a session exists; not in the tab bar.
    #[default]
    Login,
    Calendar, // 1
    Projects, // 2
}

impl ScreenId {
    /// Tab-bar order. Login is reached only by signing out.
    pub const ALL: [ScreenId; 2] = [Self::Calendar, Self::Projects];

    /// Number key for this screen, 0 for Login.
    pub fn number(self) -> u8 {
        match self {
            Self::Login => 0,
            Self::Calendar => 1,
            Self::Projects => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Calendar),
            2 => Some(Self::Projects),
            _ => None,
        }
    }

    /// Next tab, wrapping. Login stays put.
    pub fn next(self) -> Self {
        match Self::ALL.iter().position(|&s| s == self) {
            Some(idx) => Self::ALL[(idx + 1) % Self::ALL.len()],
            None => self,
        }
    }

    pub fn prev(self) -> Self {
        match Self::ALL.iter().position(|&s| s == self) {
            Some(idx) => Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()],
            None => self,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Calendar => "Calendar",
            Self::Projects => "Projects",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_round_trip() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(screen.number()), Some(screen));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(3), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Calendar.next(), ScreenId::Projects);
        assert_eq!(ScreenId::Projects.next(), ScreenId::Calendar);
        assert_eq!(ScreenId::Calendar.prev(), ScreenId::Projects);
    }

    #[test]
    fn login_is_outside_the_tab_cycle() {
        assert_eq!(ScreenId::Login.next(), ScreenId::Login);
        assert_eq!(ScreenId::Login.prev(), ScreenId::Login);
        assert!(!ScreenId::ALL.contains(&ScreenId::Login));
    }
}
