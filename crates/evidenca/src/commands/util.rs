//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, NaiveDate, Utc};

use evidenca_core::{Bay, EntityId, GridView, Priority, ProjectStatus};

use crate::cli::{BayArg, PriorityArg, StatusArg, ViewArg};
use crate::error::CliError;

impl From<BayArg> for Bay {
    fn from(arg: BayArg) -> Self {
        match arg {
            BayArg::Bay1 => Bay::Bay1,
            BayArg::Bay2 => Bay::Bay2,
            BayArg::Bay3 => Bay::Bay3,
        }
    }
}

impl From<ViewArg> for GridView {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Month => GridView::Month,
            ViewArg::Week => GridView::Week,
            ViewArg::Day => GridView::Day,
        }
    }
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Normal => Priority::Normal,
            PriorityArg::Low => Priority::Low,
        }
    }
}

impl From<StatusArg> for ProjectStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => ProjectStatus::Pending,
            StatusArg::InProgress => ProjectStatus::InProgress,
            StatusArg::Completed => ProjectStatus::Completed,
            StatusArg::Canceled => ProjectStatus::Canceled,
        }
    }
}

pub fn entity_id(raw: &str) -> EntityId {
    EntityId::from(raw.trim())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| CliError::Validation {
        field: "date".into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}' ({e})"),
    })
}

/// Short local-agnostic rendering for tables.
pub fn short_time(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

/// Map a dialoguer / rpassword failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask before a destructive action; `--yes` skips the prompt.
pub fn confirm(message: &str, global_yes: bool) -> Result<bool, CliError> {
    if global_yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_match_server_numbers() {
        assert_eq!(entity_id(" 42 "), EntityId::Number(42));
        assert_eq!(entity_id("a1"), EntityId::Text("a1".into()));
    }

    #[test]
    fn dates_must_be_iso_days() {
        assert!(parse_date("2024-05-01").is_ok());
        assert!(matches!(
            parse_date("01.05.2024"),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn bay_args_map_to_wire_bays() {
        assert_eq!(Bay::from(BayArg::Bay2).to_string(), "Bay-2");
    }
}
