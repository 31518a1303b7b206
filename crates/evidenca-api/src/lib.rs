// evidenca-api: Async Rust client for the Evidenca reservation back end
//
// Every endpoint answers with a `{ error, message?, data }` envelope. The
// client strips it, turning a truthy `error` flag into `Error::Api` no matter
// what HTTP status carried it.

pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod events;
pub mod models;
pub mod projects;
pub mod transport;
pub mod vehicles;

pub use auth::{LOGIN_FALLBACK_MESSAGE, LoginResponse};
pub use client::EvidencaClient;
pub use error::Error;
pub use models::{
    EventRecord, EventUpdateRecord, NewEventRecord, NewProjectRecord, NewVehicleRecord,
    ProjectRecord, ProjectUpdateRecord, RecordId, UserRecord, VehicleBrandRecord,
    VehicleModelRecord, VehicleRecord,
};
pub use transport::{TlsMode, TransportConfig};

/// Production back-end origin.
pub const DEFAULT_BASE_URL: &str = "https://evidenca-back-end.onrender.com";
