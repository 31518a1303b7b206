// In-memory back end for view-model tests. Holds server-side state, counts
// calls per endpoint and can be told to fail specific endpoints.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use evidenca_api::{
    EventRecord, EventUpdateRecord, LoginResponse, NewEventRecord, NewProjectRecord,
    NewVehicleRecord, ProjectRecord, ProjectUpdateRecord, RecordId, UserRecord,
    VehicleBrandRecord, VehicleModelRecord, VehicleRecord,
};

use crate::backend::{AuthBackend, EventBackend, ProjectBackend, VehicleBackend};
use crate::error::CoreError;
use crate::model::{Bay, EntityId, Role, Session, User};

#[derive(Default)]
struct State {
    events: Vec<EventRecord>,
    projects: Vec<ProjectRecord>,
    brands: Vec<VehicleBrandRecord>,
    models: Vec<VehicleModelRecord>,
    vehicles: Vec<VehicleRecord>,
    users: Vec<UserRecord>,
    failing: HashSet<&'static str>,
    echo_updates: bool,
    next_id: i64,
    calls: Vec<&'static str>,
    bodies: Vec<(&'static str, Value)>,
}

#[derive(Default)]
pub(crate) struct RecordingBackend {
    state: Mutex<State>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().next_id = 100;
        backend
    }

    pub fn with_events(self, events: Value) -> Self {
        self.state.lock().unwrap().events = serde_json::from_value(events).unwrap();
        self
    }

    pub fn with_projects(self, projects: Value) -> Self {
        self.state.lock().unwrap().projects = serde_json::from_value(projects).unwrap();
        self
    }

    pub fn with_catalogue(self, brands: Value, models: Value) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.brands = serde_json::from_value(brands).unwrap();
            state.models = serde_json::from_value(models).unwrap();
        }
        self
    }

    pub fn with_vehicles(self, vehicles: Value) -> Self {
        self.state.lock().unwrap().vehicles = serde_json::from_value(vehicles).unwrap();
        self
    }

    pub fn with_users(self, users: Value) -> Self {
        self.state.lock().unwrap().users = serde_json::from_value(users).unwrap();
        self
    }

    /// Answer updates with the stored record instead of a bare flag.
    pub fn echo_updates(self) -> Self {
        self.state.lock().unwrap().echo_updates = true;
        self
    }

    /// Make `endpoint` answer with a flagged envelope from now on.
    pub fn fail(&self, endpoint: &'static str) {
        self.state.lock().unwrap().failing.insert(endpoint);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Body of the most recent call to `endpoint`.
    pub fn last_body(&self, endpoint: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .bodies
            .iter()
            .rev()
            .find(|(name, _)| *name == endpoint)
            .map(|(_, body)| body.clone())
    }

    pub fn server_event_count(&self) -> usize {
        self.state.lock().unwrap().events.len()
    }

    fn enter(&self, endpoint: &'static str, body: Option<Value>) -> Result<(), CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(endpoint);
        if let Some(body) = body {
            state.bodies.push((endpoint, body));
        }
        if state.failing.contains(endpoint) {
            return Err(CoreError::Rejected {
                message: format!("{endpoint} failed"),
            });
        }
        Ok(())
    }

    fn next_id(&self) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.next_id
    }
}

fn same_id(a: Option<&RecordId>, b: &EntityId) -> bool {
    a.is_some_and(|a| EntityId::from(a.clone()) == *b)
}

impl EventBackend for RecordingBackend {
    async fn list_events(&self, calendar: Option<Bay>) -> Result<Vec<EventRecord>, CoreError> {
        self.enter("list_events", calendar.map(|c| json!(c.to_string())))?;
        let tag = calendar.map(|c| c.to_string());
        let state = self.state.lock().unwrap();
        Ok(state
            .events
            .iter()
            .filter(|e| tag.is_none() || e.calendar == tag)
            .cloned()
            .collect())
    }

    async fn create_event(&self, event: &NewEventRecord) -> Result<EventRecord, CoreError> {
        self.enter("create_event", Some(serde_json::to_value(event).unwrap()))?;
        let record = EventRecord {
            id: Some(RecordId::Number(self.next_id())),
            title: Some(event.title.clone()),
            start: Some(event.start.clone()),
            end: Some(event.end.clone()),
            user_id: Some(event.user_id.clone()),
            first_name: None,
            last_name: None,
            calendar: Some(event.calendar.clone()),
        };
        self.state.lock().unwrap().events.push(record.clone());
        Ok(record)
    }

    async fn update_event(
        &self,
        id: &EntityId,
        event: &EventUpdateRecord,
    ) -> Result<Option<EventRecord>, CoreError> {
        self.enter("update_event", Some(serde_json::to_value(event).unwrap()))?;
        let mut state = self.state.lock().unwrap();
        let echo = state.echo_updates;
        let stored = state
            .events
            .iter_mut()
            .find(|e| same_id(e.id.as_ref(), id))
            .map(|stored| {
                stored.title = Some(event.title.clone());
                stored.start = Some(event.start.clone());
                stored.end = Some(event.end.clone());
                stored.clone()
            });
        Ok(stored.filter(|_| echo))
    }

    async fn delete_event(&self, id: &EntityId) -> Result<(), CoreError> {
        self.enter("delete_event", Some(json!(id.to_string())))?;
        self.state
            .lock()
            .unwrap()
            .events
            .retain(|e| !same_id(e.id.as_ref(), id));
        Ok(())
    }
}

impl AuthBackend for RecordingBackend {
    async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, CoreError> {
        self.enter("login", Some(json!({ "email": email })))?;
        if password.expose_secret() != "correct horse" {
            return Err(CoreError::AuthenticationFailed {
                message: evidenca_api::LOGIN_FALLBACK_MESSAGE.into(),
            });
        }
        Ok(LoginResponse {
            token: SecretString::from("token-1".to_string()),
            user: serde_json::from_value(json!({
                "id": 4, "email": email, "name": "Ana", "surname": "Novak", "role": "admin"
            }))
            .unwrap(),
        })
    }
}

impl VehicleBackend for RecordingBackend {
    async fn list_vehicles(&self, user_id: &EntityId) -> Result<Vec<VehicleRecord>, CoreError> {
        self.enter("list_vehicles", Some(json!(user_id.to_string())))?;
        Ok(self.state.lock().unwrap().vehicles.clone())
    }

    async fn add_vehicle(&self, vehicle: &NewVehicleRecord) -> Result<(), CoreError> {
        self.enter("add_vehicle", Some(serde_json::to_value(vehicle).unwrap()))?;
        Ok(())
    }

    async fn list_vehicle_brands(&self) -> Result<Vec<VehicleBrandRecord>, CoreError> {
        self.enter("list_vehicle_brands", None)?;
        Ok(self.state.lock().unwrap().brands.clone())
    }

    async fn list_vehicle_models(&self) -> Result<Vec<VehicleModelRecord>, CoreError> {
        self.enter("list_vehicle_models", None)?;
        Ok(self.state.lock().unwrap().models.clone())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, CoreError> {
        self.enter("list_users", None)?;
        Ok(self.state.lock().unwrap().users.clone())
    }
}

impl ProjectBackend for RecordingBackend {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, CoreError> {
        self.enter("list_projects", None)?;
        Ok(self.state.lock().unwrap().projects.clone())
    }

    async fn create_project(&self, project: &NewProjectRecord) -> Result<ProjectRecord, CoreError> {
        self.enter("create_project", Some(serde_json::to_value(project).unwrap()))?;
        let record = ProjectRecord {
            id: RecordId::Number(self.next_id()),
            project_name: project.project_name.clone(),
            priority: Some(project.priority.clone()),
            status: Some(project.status.clone()),
            progress: Some(f64::from(project.progress)),
        };
        self.state.lock().unwrap().projects.push(record.clone());
        Ok(record)
    }

    async fn update_project(
        &self,
        id: &EntityId,
        update: &ProjectUpdateRecord,
    ) -> Result<Option<ProjectRecord>, CoreError> {
        self.enter("update_project", Some(serde_json::to_value(update).unwrap()))?;
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state
            .projects
            .iter_mut()
            .find(|p| EntityId::from(p.id.clone()) == *id)
        {
            stored.priority = Some(update.priority.clone());
            stored.status = Some(update.status.clone());
            stored.progress = Some(f64::from(update.progress));
        }
        Ok(None)
    }
}

/// A signed-in session with the given role.
pub(crate) fn session(role: Role) -> Session {
    Session::new(
        SecretString::from("token-1".to_string()),
        User {
            id: EntityId::Number(4),
            email: Some("ana@example.com".into()),
            first_name: "Ana".into(),
            last_name: "Novak".into(),
            role,
        },
    )
}
