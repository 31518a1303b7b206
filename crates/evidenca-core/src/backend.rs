// ── Backend seams ──
//
// Views talk to the back end through these traits so they can be driven by
// the real HTTP client or by an in-memory double. Each trait covers the
// endpoints one view needs; `EvidencaClient` implements all of them.

use std::future::Future;

use secrecy::SecretString;

use evidenca_api::{
    EventRecord, EventUpdateRecord, EvidencaClient, LoginResponse, NewEventRecord,
    NewProjectRecord, NewVehicleRecord, ProjectRecord, ProjectUpdateRecord, RecordId, UserRecord,
    VehicleBrandRecord, VehicleModelRecord, VehicleRecord,
};

use crate::error::CoreError;
use crate::model::{Bay, EntityId};

/// Event endpoints used by the resource calendar.
pub trait EventBackend {
    /// All events, or only those tagged with `calendar`.
    fn list_events(
        &self,
        calendar: Option<Bay>,
    ) -> impl Future<Output = Result<Vec<EventRecord>, CoreError>> + Send;

    fn create_event(
        &self,
        event: &NewEventRecord,
    ) -> impl Future<Output = Result<EventRecord, CoreError>> + Send;

    fn update_event(
        &self,
        id: &EntityId,
        event: &EventUpdateRecord,
    ) -> impl Future<Output = Result<Option<EventRecord>, CoreError>> + Send;

    fn delete_event(&self, id: &EntityId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Login endpoint.
pub trait AuthBackend {
    fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<LoginResponse, CoreError>> + Send;
}

/// Vehicle catalogue, registration and the user directory.
pub trait VehicleBackend {
    fn list_vehicles(
        &self,
        user_id: &EntityId,
    ) -> impl Future<Output = Result<Vec<VehicleRecord>, CoreError>> + Send;

    fn add_vehicle(
        &self,
        vehicle: &NewVehicleRecord,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_vehicle_brands(
        &self,
    ) -> impl Future<Output = Result<Vec<VehicleBrandRecord>, CoreError>> + Send;

    fn list_vehicle_models(
        &self,
    ) -> impl Future<Output = Result<Vec<VehicleModelRecord>, CoreError>> + Send;

    fn list_users(&self) -> impl Future<Output = Result<Vec<UserRecord>, CoreError>> + Send;
}

/// Project board endpoints.
pub trait ProjectBackend {
    fn list_projects(&self) -> impl Future<Output = Result<Vec<ProjectRecord>, CoreError>> + Send;

    fn create_project(
        &self,
        project: &NewProjectRecord,
    ) -> impl Future<Output = Result<ProjectRecord, CoreError>> + Send;

    fn update_project(
        &self,
        id: &EntityId,
        update: &ProjectUpdateRecord,
    ) -> impl Future<Output = Result<Option<ProjectRecord>, CoreError>> + Send;
}

// ── HTTP implementations ─────────────────────────────────────────────

impl EventBackend for EvidencaClient {
    async fn list_events(&self, calendar: Option<Bay>) -> Result<Vec<EventRecord>, CoreError> {
        let tag = calendar.map(|bay| bay.to_string());
        Ok(EvidencaClient::list_events(self, tag.as_deref()).await?)
    }

    async fn create_event(&self, event: &NewEventRecord) -> Result<EventRecord, CoreError> {
        Ok(EvidencaClient::create_event(self, event).await?)
    }

    async fn update_event(
        &self,
        id: &EntityId,
        event: &EventUpdateRecord,
    ) -> Result<Option<EventRecord>, CoreError> {
        Ok(EvidencaClient::update_event(self, &RecordId::from(id), event).await?)
    }

    async fn delete_event(&self, id: &EntityId) -> Result<(), CoreError> {
        Ok(EvidencaClient::delete_event(self, &RecordId::from(id)).await?)
    }
}

impl AuthBackend for EvidencaClient {
    async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, CoreError> {
        Ok(EvidencaClient::login(self, email, password).await?)
    }
}

impl VehicleBackend for EvidencaClient {
    async fn list_vehicles(&self, user_id: &EntityId) -> Result<Vec<VehicleRecord>, CoreError> {
        Ok(EvidencaClient::list_vehicles(self, &RecordId::from(user_id)).await?)
    }

    async fn add_vehicle(&self, vehicle: &NewVehicleRecord) -> Result<(), CoreError> {
        EvidencaClient::add_vehicle(self, vehicle).await?;
        Ok(())
    }

    async fn list_vehicle_brands(&self) -> Result<Vec<VehicleBrandRecord>, CoreError> {
        Ok(EvidencaClient::list_vehicle_brands(self).await?)
    }

    async fn list_vehicle_models(&self) -> Result<Vec<VehicleModelRecord>, CoreError> {
        Ok(EvidencaClient::list_vehicle_models(self).await?)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, CoreError> {
        Ok(EvidencaClient::list_users(self).await?)
    }
}

impl ProjectBackend for EvidencaClient {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, CoreError> {
        Ok(EvidencaClient::list_projects(self).await?)
    }

    async fn create_project(&self, project: &NewProjectRecord) -> Result<ProjectRecord, CoreError> {
        Ok(EvidencaClient::create_project(self, project).await?)
    }

    async fn update_project(
        &self,
        id: &EntityId,
        update: &ProjectUpdateRecord,
    ) -> Result<Option<ProjectRecord>, CoreError> {
        Ok(EvidencaClient::update_project(self, &RecordId::from(id), update).await?)
    }
}
