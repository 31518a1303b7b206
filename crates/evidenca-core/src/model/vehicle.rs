// ── Vehicle registration types ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::session::full_name;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleBrand {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleModel {
    pub id: EntityId,
    pub brand_id: Option<EntityId>,
    pub name: String,
}

/// A vehicle already registered to a user. Everything but the id is
/// whatever the back end had on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Option<EntityId>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub license_plate: Option<String>,
}

/// Entry in the user picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

impl UserSummary {
    pub fn display_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}
