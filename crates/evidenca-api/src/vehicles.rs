// Vehicle registration endpoints and the user directory.

use crate::client::EvidencaClient;
use crate::error::Error;
use crate::models::{
    NewVehicleRecord, RecordId, UserRecord, VehicleBrandRecord, VehicleModelRecord, VehicleRecord,
};

impl EvidencaClient {
    /// `GET /vehicles/:userId`
    pub async fn list_vehicles(&self, user_id: &RecordId) -> Result<Vec<VehicleRecord>, Error> {
        let url = self.url_with_id("vehicles", user_id)?;
        Ok(self.get(url).await?.unwrap_or_default())
    }

    /// `POST /add-vehicle`. The echo, if any, is returned untouched.
    pub async fn add_vehicle(
        &self,
        vehicle: &NewVehicleRecord,
    ) -> Result<Option<serde_json::Value>, Error> {
        let url = self.url("add-vehicle")?;
        self.post(url, vehicle).await
    }

    /// `GET /vehicle-brands`
    pub async fn list_vehicle_brands(&self) -> Result<Vec<VehicleBrandRecord>, Error> {
        let url = self.url("vehicle-brands")?;
        Ok(self.get(url).await?.unwrap_or_default())
    }

    /// `GET /vehicle-models`
    pub async fn list_vehicle_models(&self) -> Result<Vec<VehicleModelRecord>, Error> {
        let url = self.url("vehicle-models")?;
        Ok(self.get(url).await?.unwrap_or_default())
    }

    /// `GET /users`
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        let url = self.url("users")?;
        Ok(self.get(url).await?.unwrap_or_default())
    }
}
