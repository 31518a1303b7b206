// ── Form drafts and selection ──

use serde::{Deserialize, Serialize};

use crate::datetime::to_input_value;
use crate::model::{EntityId, Event};

/// Add-form contents, kept as typed until the back end accepts them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Edit-form contents. `id` is `None` until seeded from a selected event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDraft {
    pub id: Option<EntityId>,
    pub title: String,
    pub start: String,
    pub end: String,
}

impl EditDraft {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            start: event.start.as_ref().map(to_input_value).unwrap_or_default(),
            end: event.end.as_ref().map(to_input_value).unwrap_or_default(),
        }
    }
}

/// Pointer position in whatever units the front end draws in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Offset from the pointer to the tooltip's corner.
pub const TOOLTIP_OFFSET: i32 = 10;

/// The one selected event and where it was picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: EntityId,
    pub pointer: Point,
}

impl Selection {
    pub fn tooltip_anchor(&self) -> Point {
        Point::new(
            self.pointer.x.saturating_add(TOOLTIP_OFFSET),
            self.pointer.y.saturating_add(TOOLTIP_OFFSET),
        )
    }
}
