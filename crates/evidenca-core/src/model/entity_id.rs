// ── Identity ──
//
// Server-assigned identifiers arrive as numbers or strings. `EntityId` keeps
// the shape so it can be echoed back in URLs and bodies unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use evidenca_api::RecordId;

/// Opaque identifier for any Evidenca entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    /// Numeric text becomes `Number` so it matches ids the server sent as numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Number))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

impl From<RecordId> for EntityId {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Number(n) => Self::Number(n),
            RecordId::Text(s) => Self::Text(s),
        }
    }
}

impl From<&EntityId> for RecordId {
    fn from(id: &EntityId) -> Self {
        match id {
            EntityId::Number(n) => RecordId::Number(*n),
            EntityId::Text(s) => RecordId::Text(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_parses_as_number() {
        assert_eq!(EntityId::from("42"), EntityId::Number(42));
        assert_eq!(EntityId::from("evt-7"), EntityId::Text("evt-7".into()));
    }

    #[test]
    fn record_id_round_trips() {
        let id = EntityId::from(RecordId::Text("a1".into()));
        assert_eq!(RecordId::from(&id), RecordId::Text("a1".into()));
    }
}
