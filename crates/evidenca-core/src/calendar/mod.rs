// ── Resource calendar ──

pub mod draft;
pub mod grid;
pub mod view;

pub use draft::{EditDraft, EventDraft, Point, Selection};
pub use grid::{CalendarGrid, DayCell, GridView};
pub use view::{CalendarOptions, ResourceCalendarView, VisibilityPolicy};
