//! Reservation commands. Each one drives a `ResourceCalendarView` the same
//! way the interactive front end does: load the bay, select, edit, save.

use tabled::Tabled;

use evidenca_api::EvidencaClient;
use evidenca_core::{
    Bay, CalendarOptions, ClientConfig, EntityId, Event, EventDraft, GridView, Point,
    ResourceCalendarView, Session,
};

use crate::cli::{EventsArgs, EventsCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

type CalendarView = ResourceCalendarView<EvidencaClient>;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Bay")]
    bay: String,
    #[tabled(rename = "Booked by")]
    owner: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        Self {
            id: event_id(e),
            title: e.title.clone(),
            start: util::short_time(e.start.as_ref()),
            end: util::short_time(e.end.as_ref()),
            bay: e.calendar.to_string(),
            owner: e.owner_name.clone(),
        }
    }
}

fn event_id(e: &Event) -> String {
    e.id.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn detail(e: &Event) -> String {
    format!(
        "{}\n  ID:        {}\n  Bay:       {}\n  Start:     {}\n  End:       {}\n  Booked by: {}",
        e.title,
        event_id(e),
        e.calendar,
        util::short_time(e.start.as_ref()),
        util::short_time(e.end.as_ref()),
        e.owner_name
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: EventsArgs,
    client: EvidencaClient,
    session: Session,
    client_cfg: &ClientConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let open = |bay: Bay| {
        ResourceCalendarView::new(
            client,
            session,
            CalendarOptions {
                initial_bay: bay,
                visibility: client_cfg.visibility,
            },
        )
    };

    match args.command {
        EventsCommand::List {
            calendar,
            view,
            date,
        } => {
            let mut calendar = open(calendar.map_or(client_cfg.default_calendar, Bay::from));
            calendar.set_grid_view(GridView::from(view));
            if let Some(ref raw) = date {
                calendar.set_anchor(util::parse_date(raw)?);
            }
            load(&mut calendar, global).await?;

            let events = events_in_period(&calendar);
            let format = output::format(global);
            let out = output::render_list(format, &events, |e| EventRow::from(e), event_id)?;
            if format == OutputFormat::Table {
                output::notice(
                    &format!("{} · {}", calendar.active_bay(), calendar.period_title()),
                    global,
                );
            }
            output::print_output(&out, global);
            Ok(())
        }

        EventsCommand::Add {
            calendar,
            title,
            start,
            end,
        } => {
            let mut calendar = open(Bay::from(calendar));
            if !calendar.open_add_form() {
                return Err(CliError::NotPermitted {
                    action: "book a bay".into(),
                });
            }
            *calendar.add_draft_mut() = EventDraft::new(title, start, end);

            let spinner = output::spinner("Booking", global);
            let created = calendar.create_event().await;
            spinner.finish_and_clear();
            let created = created?;

            output::notice(&format!("Booked {}", created.calendar), global);
            print_event(&created, global)
        }

        EventsCommand::Edit {
            id,
            calendar,
            title,
            start,
            end,
        } => {
            let mut calendar = open(Bay::from(calendar));
            load(&mut calendar, global).await?;
            let id = util::entity_id(&id);
            select(&mut calendar, &id)?;
            calendar.open_editor();

            let draft = calendar.edit_draft_mut();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(start) = start {
                draft.start = start;
            }
            if let Some(end) = end {
                draft.end = end;
            }

            let spinner = output::spinner("Saving", global);
            let saved = calendar.save_edit().await;
            spinner.finish_and_clear();
            let saved = saved?;

            output::notice("Reservation updated", global);
            print_event(&saved, global)
        }

        EventsCommand::Delete { id, calendar } => {
            let mut calendar = open(Bay::from(calendar));
            load(&mut calendar, global).await?;
            let id = util::entity_id(&id);
            select(&mut calendar, &id)?;

            let title = calendar
                .selected_event()
                .map(|e| e.title.clone())
                .unwrap_or_default();
            if !util::confirm(&format!("Cancel reservation '{title}' ({id})?"), global.yes)? {
                return Ok(());
            }
            calendar.delete_selected().await?;
            output::notice("Reservation canceled", global);
            Ok(())
        }
    }
}

async fn load(calendar: &mut CalendarView, global: &GlobalOpts) -> Result<usize, CliError> {
    let spinner = output::spinner(&format!("Loading {}", calendar.active_bay()), global);
    let result = calendar.mount().await;
    spinner.finish_and_clear();
    Ok(result?)
}

fn select(calendar: &mut CalendarView, id: &EntityId) -> Result<(), CliError> {
    if calendar.select_event(id, Point::default()) {
        return Ok(());
    }
    Err(CliError::NotFound {
        resource_type: format!("Reservation on {}", calendar.active_bay()),
        identifier: id.to_string(),
        list_command: format!("events list --calendar {}", calendar.active_bay()),
    })
}

/// Visible events overlapping the current period, each once, in start order.
fn events_in_period(calendar: &CalendarView) -> Vec<Event> {
    let mut seen: Vec<&Event> = Vec::new();
    for cell in calendar.grid().into_iter().filter(|c| c.in_period) {
        for event in cell.events {
            if !seen.iter().any(|s| std::ptr::eq(*s, event)) {
                seen.push(event);
            }
        }
    }
    seen.into_iter().cloned().collect()
}

fn print_event(event: &Event, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(output::format(global), event, detail, event_id)?;
    output::print_output(&out, global);
    Ok(())
}
