// ── Domain model ──

pub mod entity_id;
pub mod event;
pub mod project;
pub mod session;
pub mod vehicle;

pub use entity_id::EntityId;
pub use event::{Bay, Event};
pub use project::{Priority, Progress, Project, ProjectStatus};
pub use session::{Role, Session, User};
pub use vehicle::{UserSummary, Vehicle, VehicleBrand, VehicleModel};
