// evidenca-core: Domain model and view models between evidenca-api and the
// front ends (CLI/TUI).

pub mod backend;
pub mod board;
pub mod calendar;
pub mod config;
pub mod convert;
pub mod datetime;
pub mod error;
pub mod login;
pub mod model;
pub mod vehicles;

#[cfg(test)]
pub(crate) mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{AuthBackend, EventBackend, ProjectBackend, VehicleBackend};
pub use board::{ProjectBoard, ProjectEditor};
pub use calendar::{
    CalendarGrid, CalendarOptions, DayCell, EditDraft, EventDraft, GridView, Point,
    ResourceCalendarView, Selection, VisibilityPolicy,
};
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use login::LoginForm;
pub use vehicles::{VehicleDraft, VehicleRegistrationForm};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Bay, EntityId, Event, Priority, Progress, Project, ProjectStatus, Role, Session, User,
    UserSummary, Vehicle, VehicleBrand, VehicleModel,
};
