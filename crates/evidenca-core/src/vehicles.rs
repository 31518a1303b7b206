// ── Vehicle registration form ──
//
// Brand → model pickers over the catalogue, an optional owner picker for
// privileged users, and the user's already-registered vehicles.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use evidenca_api::{NewVehicleRecord, RecordId};

use crate::backend::VehicleBackend;
use crate::error::CoreError;
use crate::model::{EntityId, Session, UserSummary, Vehicle, VehicleBrand, VehicleModel};

/// Confirmation recorded after a successful submission.
pub const VEHICLE_ADDED: &str = "Vehicle successfully added.";

/// Form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDraft {
    /// Selected brand id; sent as `make`.
    pub make: Option<EntityId>,
    pub model_id: Option<EntityId>,
    /// Model name as entered (prefilled from the picked model).
    pub model: String,
    pub year: String,
    pub license_plate: String,
    /// Owner picked by a privileged user; the session user otherwise.
    pub user_id: Option<EntityId>,
}

pub struct VehicleRegistrationForm<B> {
    backend: B,
    session: Session,
    brands: Vec<VehicleBrand>,
    models: Vec<VehicleModel>,
    vehicles: Vec<Vehicle>,
    users: Vec<UserSummary>,
    draft: VehicleDraft,
    confirmation: Option<String>,
    last_error: Option<String>,
}

impl<B: VehicleBackend> VehicleRegistrationForm<B> {
    pub fn new(backend: B, session: Session) -> Self {
        Self {
            backend,
            session,
            brands: Vec::new(),
            models: Vec::new(),
            vehicles: Vec::new(),
            users: Vec::new(),
            draft: VehicleDraft::default(),
            confirmation: None,
            last_error: None,
        }
    }

    /// Fetch the catalogue, the user's vehicles and (privileged users only)
    /// the user list. Each fetch stands alone: one failing leaves the others
    /// populated, and the first failure is returned.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        let mut first_error = None;

        match self.backend.list_vehicle_brands().await {
            Ok(records) => self.brands = records.into_iter().map(VehicleBrand::from).collect(),
            Err(e) => first_error = first_error.or(Some(self.fail("load brands", e))),
        }
        match self.backend.list_vehicle_models().await {
            Ok(records) => self.models = records.into_iter().map(VehicleModel::from).collect(),
            Err(e) => first_error = first_error.or(Some(self.fail("load models", e))),
        }
        let user_id = self.session.user.id.clone();
        match self.backend.list_vehicles(&user_id).await {
            Ok(records) => self.vehicles = records.into_iter().map(Vehicle::from).collect(),
            Err(e) => first_error = first_error.or(Some(self.fail("load vehicles", e))),
        }
        if self.session.user.role.is_privileged() {
            match self.backend.list_users().await {
                Ok(records) => self.users = records.into_iter().map(UserSummary::from).collect(),
                Err(e) => first_error = first_error.or(Some(self.fail("load users", e))),
            }
        }

        debug!(
            brands = self.brands.len(),
            models = self.models.len(),
            vehicles = self.vehicles.len(),
            users = self.users.len(),
            "vehicle form loaded"
        );
        first_error.map_or(Ok(()), Err)
    }

    /// Pick a brand. Clears any model picked for the previous brand.
    pub fn select_brand(&mut self, brand_id: &EntityId) {
        self.draft.make = Some(brand_id.clone());
        self.draft.model_id = None;
    }

    /// Pick a model; fills the model name if none was typed.
    pub fn select_model(&mut self, model_id: &EntityId) -> bool {
        let Some(name) = self
            .models
            .iter()
            .find(|m| m.id == *model_id)
            .map(|m| m.name.clone())
        else {
            return false;
        };
        self.draft.model_id = Some(model_id.clone());
        if self.draft.model.trim().is_empty() {
            self.draft.model = name;
        }
        true
    }

    /// Pick the owner. Refused unless the session user is privileged.
    pub fn select_user(&mut self, user_id: &EntityId) -> bool {
        let role = self.session.user.role;
        if !role.is_privileged() {
            warn!(%role, owner = %user_id, "owner pick refused");
            self.last_error = Some(format!(
                "Role {role} cannot register vehicles for other users"
            ));
            return false;
        }
        self.draft.user_id = Some(user_id.clone());
        true
    }

    /// Models of the selected brand; empty until a brand is picked.
    pub fn filtered_models(&self) -> Vec<&VehicleModel> {
        let Some(ref brand) = self.draft.make else {
            return Vec::new();
        };
        self.models
            .iter()
            .filter(|m| m.brand_id.as_ref() == Some(brand))
            .collect()
    }

    /// Post the draft to `/add-vehicle`.
    pub async fn submit(&mut self) -> Result<(), CoreError> {
        let user_id = self
            .draft
            .user_id
            .clone()
            .filter(|_| self.session.user.role.is_privileged())
            .unwrap_or_else(|| self.session.user.id.clone());
        let body = NewVehicleRecord {
            make: self
                .draft
                .make
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            model: self.draft.model.clone(),
            year: self.draft.year.clone(),
            license_plate: self.draft.license_plate.clone(),
            user_id: RecordId::from(&user_id),
            model_id: self
                .draft
                .model_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };

        self.confirmation = None;
        if let Err(e) = self.backend.add_vehicle(&body).await {
            return Err(self.fail("add vehicle", e));
        }
        info!(owner = %user_id, plate = %body.license_plate, "vehicle registered");
        self.confirmation = Some(VEHICLE_ADDED.into());
        self.last_error = None;
        Ok(())
    }

    pub fn draft(&self) -> &VehicleDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut VehicleDraft {
        &mut self.draft
    }

    pub fn brands(&self) -> &[VehicleBrand] {
        &self.brands
    }

    pub fn models(&self) -> &[VehicleModel] {
        &self.models
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn users(&self) -> &[UserSummary] {
        &self.users
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn fail(&mut self, action: &str, err: CoreError) -> CoreError {
        warn!(error = %err, "{action} failed");
        self.last_error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::Role;
    use crate::testing::{RecordingBackend, session};

    fn backend() -> RecordingBackend {
        RecordingBackend::new()
            .with_catalogue(
                json!([{ "id": 1, "name": "Volkswagen" }, { "id": 2, "name": "Škoda" }]),
                json!([
                    { "id": 10, "brand_id": 1, "model_name": "Golf" },
                    { "id": 11, "brand_id": 1, "model_name": "Passat" },
                    { "id": 20, "brand_id": 2, "model_name": "Octavia" }
                ]),
            )
            .with_vehicles(json!([
                { "id": 3, "brand_name": "Volkswagen", "model_name": "Golf",
                  "year": 2019, "license_plate": "LJ AB-123" }
            ]))
            .with_users(json!([
                { "id": 4, "first_name": "Ana", "last_name": "Novak" },
                { "id": 7, "first_name": "Bor", "last_name": "Kos" }
            ]))
    }

    #[tokio::test]
    async fn user_list_is_loaded_for_privileged_users_only() {
        let mut form = VehicleRegistrationForm::new(backend(), session(Role::Admin));
        form.load().await.unwrap();
        assert!(form.users().is_empty());
        assert_eq!(form.backend().calls("list_users"), 0);

        let mut form = VehicleRegistrationForm::new(backend(), session(Role::SuperAdmin));
        form.load().await.unwrap();
        assert_eq!(form.users().len(), 2);
        assert_eq!(form.vehicles()[0].year.as_deref(), Some("2019"));
    }

    #[tokio::test]
    async fn one_failed_fetch_leaves_the_rest() {
        let backend = backend();
        backend.fail("list_vehicle_brands");
        let mut form = VehicleRegistrationForm::new(backend, session(Role::SuperAdmin));

        assert!(form.load().await.is_err());

        assert!(form.brands().is_empty());
        assert_eq!(form.models().len(), 3);
        assert_eq!(form.vehicles().len(), 1);
        assert_eq!(form.users().len(), 2);
    }

    #[tokio::test]
    async fn brand_selection_narrows_models_and_resets_model() {
        let mut form = VehicleRegistrationForm::new(backend(), session(Role::Admin));
        form.load().await.unwrap();
        assert!(form.filtered_models().is_empty());

        form.select_brand(&EntityId::Number(1));
        assert!(form.select_model(&EntityId::Number(11)));
        assert_eq!(form.draft().model, "Passat");

        form.select_brand(&EntityId::Number(2));
        assert_eq!(form.draft().model_id, None);
        let names: Vec<_> = form.filtered_models().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Octavia"]);
    }

    #[tokio::test]
    async fn submit_falls_back_to_session_user() {
        let mut form = VehicleRegistrationForm::new(backend(), session(Role::Admin));
        form.load().await.unwrap();
        form.select_brand(&EntityId::Number(1));
        form.select_model(&EntityId::Number(10));
        form.draft_mut().year = "2021".into();
        form.draft_mut().license_plate = "KR 12-ABC".into();

        form.submit().await.unwrap();

        assert_eq!(
            form.backend().last_body("add_vehicle"),
            Some(json!({
                "make": "1", "model": "Golf", "year": "2021",
                "licensePlate": "KR 12-ABC", "userId": 4, "modelId": "10"
            }))
        );
        assert_eq!(form.confirmation(), Some(VEHICLE_ADDED));
    }

    #[tokio::test]
    async fn submit_uses_picked_user_and_reports_failure() {
        let mut form = VehicleRegistrationForm::new(backend(), session(Role::SuperAdmin));
        form.load().await.unwrap();
        assert!(form.select_user(&EntityId::Number(7)));
        form.backend().fail("add_vehicle");

        assert!(form.submit().await.is_err());

        assert_eq!(
            form.backend().last_body("add_vehicle").unwrap()["userId"],
            json!(7)
        );
        assert!(form.confirmation().is_none());
        assert!(form.last_error().is_some());
    }

    #[tokio::test]
    async fn plain_users_register_for_themselves_only() {
        let mut form = VehicleRegistrationForm::new(backend(), session(Role::User));
        form.load().await.unwrap();
        form.select_brand(&EntityId::Number(2));
        form.select_model(&EntityId::Number(20));

        assert!(!form.select_user(&EntityId::Number(7)));
        assert!(form.draft().user_id.is_none());
        assert!(form.last_error().is_some());

        form.draft_mut().user_id = Some(EntityId::Number(7));
        form.submit().await.unwrap();

        assert_eq!(
            form.backend().last_body("add_vehicle").unwrap()["userId"],
            json!(4)
        );
    }
}
