// ── Wire-to-domain conversions ──
//
// Bridges `evidenca_api` records into `evidenca_core::model` types:
// normalizes dates, parses enum strings and fills defaults for whatever the
// back end left out.

use evidenca_api::{
    EventRecord, LoginResponse, ProjectRecord, UserRecord, VehicleBrandRecord, VehicleModelRecord,
    VehicleRecord,
};

use crate::datetime::normalize;
use crate::model::session::full_name;
use crate::model::{
    Bay, Event, Progress, Project, ProjectStatus, Role, Session, User, UserSummary, Vehicle,
    VehicleBrand, VehicleModel,
};

// ── Events ─────────────────────────────────────────────────────────

/// Convert an event record. `fallback_bay` covers a missing or unknown
/// `calendar` tag (the bay the record was fetched or created under).
pub(crate) fn event_from_record(record: EventRecord, fallback_bay: Bay) -> Event {
    let calendar = record
        .calendar
        .as_deref()
        .and_then(|tag| tag.trim().parse().ok())
        .unwrap_or(fallback_bay);
    let owner_name = full_name(
        record.first_name.as_deref().unwrap_or_default(),
        record.last_name.as_deref().unwrap_or_default(),
    );

    Event {
        id: record.id.map(Into::into),
        title: record.title.unwrap_or_default(),
        start: normalize(record.start.as_deref()),
        end: normalize(record.end.as_deref()),
        calendar,
        owner_name,
        owner_id: record.user_id.map(Into::into),
    }
}

// ── Users ──────────────────────────────────────────────────────────

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id.into(),
            email: r.email,
            first_name: r.first_name.unwrap_or_default(),
            last_name: r.last_name.unwrap_or_default(),
            role: Role::from_wire(r.role.as_deref()),
        }
    }
}

impl From<UserRecord> for UserSummary {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id.into(),
            first_name: r.first_name.unwrap_or_default(),
            last_name: r.last_name.unwrap_or_default(),
        }
    }
}

impl From<LoginResponse> for Session {
    fn from(r: LoginResponse) -> Self {
        Session::new(r.token, r.user.into())
    }
}

// ── Projects ───────────────────────────────────────────────────────

impl From<ProjectRecord> for Project {
    fn from(r: ProjectRecord) -> Self {
        Self {
            id: r.id.into(),
            name: r.project_name,
            priority: r
                .priority
                .as_deref()
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or_default(),
            status: r
                .status
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(ProjectStatus::Pending),
            progress: r.progress.map(Progress::from_f64).unwrap_or_default(),
        }
    }
}

// ── Vehicles ───────────────────────────────────────────────────────

impl From<VehicleBrandRecord> for VehicleBrand {
    fn from(r: VehicleBrandRecord) -> Self {
        Self {
            id: r.id.into(),
            name: r.name,
        }
    }
}

impl From<VehicleModelRecord> for VehicleModel {
    fn from(r: VehicleModelRecord) -> Self {
        Self {
            id: r.id.into(),
            brand_id: r.brand_id.map(Into::into),
            name: r.model_name,
        }
    }
}

impl From<VehicleRecord> for Vehicle {
    fn from(r: VehicleRecord) -> Self {
        Self {
            id: r.id.map(Into::into),
            make: r.make,
            model: r.model,
            year: r.year,
            license_plate: r.license_plate,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{EntityId, Priority};

    fn record(value: serde_json::Value) -> EventRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn event_keeps_its_own_calendar_tag() {
        let event = event_from_record(
            record(json!({
                "id": 2, "title": "Alignment", "calendar": "Bay-2",
                "start": "2024-05-01T09:00", "end": "nonsense",
                "first_name": "Ana", "last_name": "Novak", "user_id": "u-4"
            })),
            Bay::Bay1,
        );
        assert_eq!(event.calendar, Bay::Bay2);
        assert_eq!(event.owner_name, "Ana Novak");
        assert_eq!(event.owner_id, Some(EntityId::Text("u-4".into())));
        assert!(event.start.is_some());
        assert!(event.end.is_none());
        assert!(!event.is_placeable());
    }

    #[test]
    fn unknown_calendar_falls_back() {
        let event = event_from_record(record(json!({ "id": 1, "calendar": "Lift 9" })), Bay::Bay3);
        assert_eq!(event.calendar, Bay::Bay3);
        assert_eq!(event.title, "");
    }

    #[test]
    fn project_defaults_for_unknown_strings() {
        let project = Project::from(
            serde_json::from_value::<ProjectRecord>(json!({
                "id": 3, "project_name": "Paint booth", "priority": "Urgent",
                "status": "Archived", "progress": 120
            }))
            .unwrap(),
        );
        assert_eq!(project.priority, Priority::Normal);
        assert_eq!(project.status, ProjectStatus::Pending);
        assert_eq!(project.progress, Progress::MAX);
    }
}
