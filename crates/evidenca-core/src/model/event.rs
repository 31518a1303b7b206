// ── Calendar events and the bays they are booked on ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;

/// One of the three physical lifts/bays a booking is made against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum Bay {
    #[default]
    #[strum(serialize = "Bay-1")]
    #[serde(rename = "Bay-1")]
    Bay1,
    #[strum(serialize = "Bay-2")]
    #[serde(rename = "Bay-2")]
    Bay2,
    #[strum(serialize = "Bay-3")]
    #[serde(rename = "Bay-3")]
    Bay3,
}

impl Bay {
    /// Tab order.
    pub const ALL: [Bay; 3] = [Bay::Bay1, Bay::Bay2, Bay::Bay3];

    pub fn next(self) -> Self {
        match self {
            Self::Bay1 => Self::Bay2,
            Self::Bay2 => Self::Bay3,
            Self::Bay3 => Self::Bay1,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Bay1 => Self::Bay3,
            Self::Bay2 => Self::Bay1,
            Self::Bay3 => Self::Bay2,
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::Bay1 => 0,
            Self::Bay2 => 1,
            Self::Bay3 => 2,
        }
    }
}

/// A booking as held in the client-side cache.
///
/// The server owns every field; this is a copy refreshed on each fetch.
/// `id` is absent only when the back end omitted it, in which case the event
/// can be displayed but not selected or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<EntityId>,
    pub title: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub calendar: Bay,
    /// `"{first_name} {last_name}"` of the booking's owner.
    pub owner_name: String,
    pub owner_id: Option<EntityId>,
}

impl Event {
    /// Both bounds parsed; only placeable events appear on the grid.
    pub fn is_placeable(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bay_wire_strings() {
        assert_eq!(Bay::Bay2.to_string(), "Bay-2");
        assert_eq!("Bay-3".parse::<Bay>().unwrap(), Bay::Bay3);
        assert!("Bay-4".parse::<Bay>().is_err());
        assert_eq!(serde_json::to_value(Bay::Bay1).unwrap(), "Bay-1");
    }

    #[test]
    fn bay_cycling_wraps() {
        assert_eq!(Bay::Bay3.next(), Bay::Bay1);
        assert_eq!(Bay::Bay1.prev(), Bay::Bay3);
        for bay in Bay::ALL {
            assert_eq!(Bay::ALL[bay.index()], bay);
        }
    }
}
