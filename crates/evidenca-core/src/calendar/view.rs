// ── Resource calendar view model ──
//
// Holds the event cache for the active bay plus the add/edit form state.
// Each mutation is a single round-trip; local state changes only after the
// back end acknowledges it. A fetch replaces the cache wholesale.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, info, warn};

use evidenca_api::{EventUpdateRecord, NewEventRecord, RecordId};

use super::draft::{EditDraft, EventDraft, Point, Selection};
use super::grid::{CalendarGrid, DayCell, GridView};
use crate::backend::EventBackend;
use crate::convert::event_from_record;
use crate::datetime::{normalize, to_iso};
use crate::error::CoreError;
use crate::model::{Bay, EntityId, Event, Session};

/// Which events the viewer sees within the active bay.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityPolicy {
    /// Every event on the bay.
    #[default]
    ResourceOnly,
    /// Non-privileged viewers additionally see only their own events.
    OwnerScoped,
}

/// Construction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarOptions {
    pub initial_bay: Bay,
    pub visibility: VisibilityPolicy,
}

/// Calendar of bookings for one bay at a time.
pub struct ResourceCalendarView<B> {
    backend: B,
    session: Session,
    visibility: VisibilityPolicy,
    events: Vec<Event>,
    active: Bay,
    selection: Option<Selection>,
    add_draft: EventDraft,
    edit_draft: EditDraft,
    add_open: bool,
    edit_open: bool,
    last_error: Option<String>,
    grid_view: GridView,
    anchor: NaiveDate,
}

impl<B: EventBackend> ResourceCalendarView<B> {
    pub fn new(backend: B, session: Session, options: CalendarOptions) -> Self {
        Self {
            backend,
            session,
            visibility: options.visibility,
            events: Vec::new(),
            active: options.initial_bay,
            selection: None,
            add_draft: EventDraft::default(),
            edit_draft: EditDraft::default(),
            add_open: false,
            edit_open: false,
            last_error: None,
            grid_view: GridView::default(),
            anchor: Utc::now().date_naive(),
        }
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Initial fetch for the bay the view was opened on.
    pub async fn mount(&mut self) -> Result<usize, CoreError> {
        self.load().await
    }

    /// Fetch the active bay's events and replace the cache with them.
    ///
    /// On failure the previous cache stays as it was.
    async fn load(&mut self) -> Result<usize, CoreError> {
        let bay = self.active;
        match self.backend.list_events(Some(bay)).await {
            Ok(records) => {
                self.events = records
                    .into_iter()
                    .map(|r| event_from_record(r, bay))
                    .collect();
                self.last_error = None;
                debug!(calendar = %bay, count = self.events.len(), "calendar loaded");
                Ok(self.events.len())
            }
            Err(e) => Err(self.fail("load events", e)),
        }
    }

    /// Make `bay` active: clears the selection, closes both forms, re-fetches.
    pub async fn switch_calendar(&mut self, bay: Bay) -> Result<usize, CoreError> {
        self.active = bay;
        self.selection = None;
        self.add_open = false;
        self.close_editor();
        self.load().await
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Show the add form. Refused for users who may not schedule.
    pub fn open_add_form(&mut self) -> bool {
        if !self.session.user.role.can_schedule() {
            return false;
        }
        self.add_open = true;
        true
    }

    pub fn close_add_form(&mut self) {
        self.add_open = false;
    }

    /// Submit the add form as a booking on the active bay.
    ///
    /// Start and end go out exactly as typed. The acknowledged event is
    /// appended; on failure the draft is kept for another attempt.
    pub async fn create_event(&mut self) -> Result<Event, CoreError> {
        if !self.add_open {
            let message = "the add form is not open".to_owned();
            return Err(self.fail("create event", CoreError::Validation { message }));
        }
        let user = self.session.user.clone();
        let body = NewEventRecord {
            title: self.add_draft.title.clone(),
            start: self.add_draft.start.clone(),
            end: self.add_draft.end.clone(),
            user_id: RecordId::from(&user.id),
            calendar: self.active.to_string(),
        };

        let record = match self.backend.create_event(&body).await {
            Ok(record) => record,
            Err(e) => return Err(self.fail("create event", e)),
        };

        let mut event = event_from_record(record, self.active);
        event.calendar = self.active;
        if event.owner_name.is_empty() {
            event.owner_name = user.display_name();
        }
        if event.owner_id.is_none() {
            event.owner_id = Some(user.id.clone());
        }

        info!(id = ?event.id, calendar = %self.active, "event created");
        self.events.push(event.clone());
        self.add_open = false;
        self.add_draft = EventDraft::default();
        self.last_error = None;
        Ok(event)
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Select the cached event with `id`. Unknown ids are ignored.
    pub fn select_event(&mut self, id: &EntityId, pointer: Point) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.selection = Some(Selection {
            id: id.clone(),
            pointer,
        });
        true
    }

    /// Clear the selection. The edit form goes with it.
    pub fn deselect_event(&mut self) {
        self.selection = None;
        self.close_editor();
    }

    // ── Edit ─────────────────────────────────────────────────────────

    /// Show the edit form seeded from the selection.
    pub fn open_editor(&mut self) -> bool {
        let Some(draft) = self.selected_event().map(EditDraft::from_event) else {
            return false;
        };
        self.edit_draft = draft;
        self.edit_open = true;
        true
    }

    pub fn close_editor(&mut self) {
        self.edit_open = false;
        self.edit_draft = EditDraft::default();
    }

    /// Send the edit draft as a full replacement of the event.
    ///
    /// Requires an open editor whose id names a cached event, and both bounds
    /// parseable; a failed check sends nothing. The event keeps its bay. The
    /// server's copy replaces the cached one when it returns one, the draft
    /// otherwise.
    pub async fn save_edit(&mut self) -> Result<Event, CoreError> {
        let Some(id) = self.edit_draft.id.clone() else {
            return Err(self.fail(
                "save event",
                CoreError::MissingIdentifier {
                    operation: "save event",
                },
            ));
        };
        let cached = self.find(&id).filter(|_| self.edit_open).cloned();
        let Some(cached) = cached else {
            return Err(self.fail("save event", CoreError::NoSelection));
        };
        let start = normalize(Some(&self.edit_draft.start));
        let end = normalize(Some(&self.edit_draft.end));
        let (Some(start), Some(end)) = (start, end) else {
            let message = format!(
                "start and end must be dates like 2024-05-01T09:00 (got {:?} and {:?})",
                self.edit_draft.start, self.edit_draft.end
            );
            return Err(self.fail("save event", CoreError::Validation { message }));
        };

        let calendar = cached.calendar;
        let body = EventUpdateRecord {
            id: RecordId::from(&id),
            title: self.edit_draft.title.clone(),
            start: to_iso(&start),
            end: to_iso(&end),
            user_id: cached.owner_id.as_ref().map(RecordId::from),
            calendar: calendar.to_string(),
        };

        let response = match self.backend.update_event(&id, &body).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail("save event", e)),
        };

        let updated = if let Some(record) = response {
            let mut event = event_from_record(record, calendar);
            event.calendar = calendar;
            if event.id.is_none() {
                event.id = Some(id.clone());
            }
            if event.owner_name.is_empty() {
                event.owner_name.clone_from(&cached.owner_name);
            }
            if event.owner_id.is_none() {
                event.owner_id.clone_from(&cached.owner_id);
            }
            event
        } else {
            Event {
                id: Some(id.clone()),
                title: self.edit_draft.title.clone(),
                start: Some(start),
                end: Some(end),
                calendar,
                owner_name: cached.owner_name,
                owner_id: cached.owner_id,
            }
        };

        if let Some(slot) = self
            .events
            .iter_mut()
            .find(|e| e.id.as_ref() == Some(&id))
        {
            *slot = updated.clone();
        }
        info!(%id, "event updated");
        self.close_editor();
        self.last_error = None;
        Ok(updated)
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Delete the event with `id` and drop it from the cache.
    pub async fn delete_event(&mut self, id: &EntityId) -> Result<(), CoreError> {
        if let Err(e) = self.backend.delete_event(id).await {
            return Err(self.fail("delete event", e));
        }
        self.events.retain(|e| e.id.as_ref() != Some(id));
        self.close_editor();
        self.selection = None;
        self.last_error = None;
        info!(%id, "event deleted");
        Ok(())
    }

    /// Delete whatever the edit form or the selection points at.
    pub async fn delete_selected(&mut self) -> Result<(), CoreError> {
        let target = self
            .edit_draft
            .id
            .clone()
            .filter(|_| self.edit_open)
            .or_else(|| self.selection.as_ref().map(|s| s.id.clone()));
        let Some(id) = target else {
            return Err(self.fail("delete event", CoreError::NoSelection));
        };
        self.delete_event(&id).await
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn set_grid_view(&mut self, view: GridView) {
        self.grid_view = view;
    }

    pub fn set_anchor(&mut self, date: NaiveDate) {
        self.anchor = date;
    }

    pub fn next_period(&mut self) {
        self.anchor = CalendarGrid::next_period(self.grid_view, self.anchor);
    }

    pub fn prev_period(&mut self) {
        self.anchor = CalendarGrid::prev_period(self.grid_view, self.anchor);
    }

    pub fn today(&mut self) {
        self.anchor = Utc::now().date_naive();
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Events on the active bay that this viewer may see.
    pub fn visible_events(&self) -> Vec<&Event> {
        let user = &self.session.user;
        let owner_scoped =
            self.visibility == VisibilityPolicy::OwnerScoped && !user.role.is_privileged();
        self.events
            .iter()
            .filter(|e| e.calendar == self.active)
            .filter(|e| !owner_scoped || e.owner_id.as_ref() == Some(&user.id))
            .collect()
    }

    /// Visible events laid out over the current period.
    pub fn grid(&self) -> Vec<DayCell<'_>> {
        CalendarGrid::layout(self.visible_events(), self.grid_view, self.anchor)
    }

    pub fn period_title(&self) -> String {
        CalendarGrid::title(self.grid_view, self.anchor)
    }

    /// The whole cache, regardless of bay or owner.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find(&self, id: &EntityId) -> Option<&Event> {
        self.events.iter().find(|e| e.id.as_ref() == Some(id))
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selection.as_ref().and_then(|s| self.find(&s.id))
    }

    /// Where to draw the tooltip for the selection.
    pub fn tooltip_anchor(&self) -> Option<Point> {
        self.selection.as_ref().map(Selection::tooltip_anchor)
    }

    pub fn active_bay(&self) -> Bay {
        self.active
    }

    pub fn add_draft(&self) -> &EventDraft {
        &self.add_draft
    }

    pub fn add_draft_mut(&mut self) -> &mut EventDraft {
        &mut self.add_draft
    }

    pub fn edit_draft(&self) -> &EditDraft {
        &self.edit_draft
    }

    pub fn edit_draft_mut(&mut self) -> &mut EditDraft {
        &mut self.edit_draft
    }

    pub fn is_add_open(&self) -> bool {
        self.add_open
    }

    pub fn is_edit_open(&self) -> bool {
        self.edit_open
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn grid_view(&self) -> GridView {
        self.grid_view
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn visibility(&self) -> VisibilityPolicy {
        self.visibility
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn fail(&mut self, action: &str, err: CoreError) -> CoreError {
        if err.is_local() {
            warn!(error = %err, "{action} refused");
        } else {
            warn!(error = %err, calendar = %self.active, "{action} failed");
        }
        self.last_error = Some(err.to_string());
        err
    }
}
