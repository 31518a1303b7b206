// ── Project board domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::EntityId;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum ProjectStatus {
    #[strum(to_string = "In Progress", serialize = "in-progress", serialize = "InProgress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[default]
    Pending,
    Completed,
    Canceled,
}

impl ProjectStatus {
    /// Closed projects are listed separately from active ones.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    /// Statuses a project may be created with.
    pub fn is_initial(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

/// Completion percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    pub const MAX: Progress = Progress(100);

    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    /// Clamp a wire value; NaN becomes zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self(0);
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub progress: Progress,
}
