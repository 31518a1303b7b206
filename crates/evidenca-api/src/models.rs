// Wire models for the Evidenca back end.
//
// Field names follow the back end verbatim (snake_case for most resources,
// camelCase for the vehicle submission). Everything the server owns is
// optional and lenient: ids come back as numbers or strings, progress and
// year as numbers or numeric strings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Identifiers ─────────────────────────────────────────────────────

/// Server-assigned identifier, kept in whatever shape the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::Number(0)
    }
}

// ── Events ──────────────────────────────────────────────────────────

/// Event as listed or returned by the back end.
///
/// `start`/`end` stay raw: normalization belongs to the core crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end: Option<String>,
    #[serde(default)]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub calendar: Option<String>,
}

/// `POST /add-event` body. Dates are the raw form values.
#[derive(Debug, Clone, Serialize)]
pub struct NewEventRecord {
    pub title: String,
    pub start: String,
    pub end: String,
    pub user_id: RecordId,
    pub calendar: String,
}

/// `PUT /update-event/:id` body: the full event with ISO-8601 dates.
#[derive(Debug, Clone, Serialize)]
pub struct EventUpdateRecord {
    pub id: RecordId,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    pub calendar: String,
}

// ── Users ───────────────────────────────────────────────────────────

/// User profile, from `/login` and `/users`.
///
/// The login payload names the person `name`/`surname`, the user list
/// `first_name`/`last_name`; both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, alias = "surname", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

// ── Vehicles ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleBrandRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleModelRecord {
    pub id: RecordId,
    #[serde(default)]
    pub brand_id: Option<RecordId>,
    #[serde(default)]
    pub model_name: String,
}

/// A registered vehicle as listed by `/vehicles/:userId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "brand_name", deserialize_with = "lenient_string")]
    pub make: Option<String>,
    #[serde(default, alias = "model_name", deserialize_with = "lenient_string")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, alias = "licensePlate", deserialize_with = "lenient_string")]
    pub license_plate: Option<String>,
}

/// `POST /add-vehicle` body, camelCase as the back end expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicleRecord {
    pub make: String,
    pub model: String,
    pub year: String,
    pub license_plate: String,
    pub user_id: RecordId,
    pub model_id: String,
}

// ── Projects ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: RecordId,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub progress: Option<f64>,
}

/// `POST /projects` body.
#[derive(Debug, Clone, Serialize)]
pub struct NewProjectRecord {
    pub project_name: String,
    pub priority: String,
    pub status: String,
    pub progress: u8,
}

/// `PUT /projects/:id` body.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectUpdateRecord {
    pub priority: String,
    pub status: String,
    pub progress: u8,
}

// ── Lenient field helpers ───────────────────────────────────────────

/// Accept a string, a number, or null.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept a number, a numeric string, or null. Garbage becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn record_id_keeps_wire_shape() {
        let numeric: RecordId = serde_json::from_value(json!(42)).unwrap();
        let text: RecordId = serde_json::from_value(json!("evt-7")).unwrap();
        assert_eq!(numeric, RecordId::Number(42));
        assert_eq!(text, RecordId::Text("evt-7".into()));
        assert_eq!(serde_json::to_value(&numeric).unwrap(), json!(42));
        assert_eq!(numeric.to_string(), "42");
    }

    #[test]
    fn event_record_tolerates_nulls_and_numbers() {
        let rec: EventRecord = serde_json::from_value(json!({
            "id": 3,
            "title": "Oil change",
            "start": null,
            "end": 1_714_550_400,
            "first_name": "Ana",
            "last_name": "Novak"
        }))
        .unwrap();
        assert!(rec.start.is_none());
        assert_eq!(rec.end.as_deref(), Some("1714550400"));
        assert!(rec.calendar.is_none());
    }

    #[test]
    fn login_user_accepts_name_and_surname() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 1,
            "name": "Ana",
            "surname": "Novak",
            "role": "superadmin"
        }))
        .unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Ana"));
        assert_eq!(user.last_name.as_deref(), Some("Novak"));
    }

    #[test]
    fn project_progress_accepts_strings() {
        let rec: ProjectRecord = serde_json::from_value(json!({
            "id": 1,
            "project_name": "Lift 2 hydraulics",
            "priority": "High",
            "status": "In Progress",
            "progress": "45"
        }))
        .unwrap();
        assert_eq!(rec.progress, Some(45.0));
    }

    #[test]
    fn vehicle_submission_is_camel_case() {
        let body = NewVehicleRecord {
            make: "3".into(),
            model: "Golf".into(),
            year: "2019".into(),
            license_plate: "LJ AB-123".into(),
            user_id: RecordId::Number(7),
            model_id: "12".into(),
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["licensePlate"], json!("LJ AB-123"));
        assert_eq!(v["userId"], json!(7));
        assert_eq!(v["modelId"], json!("12"));
    }
}
