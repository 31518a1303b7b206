//! Bay calendar: tabs per bay, a month/week/day grid, the focused day's
//! reservations, add and edit modals and a tooltip for the selection.

use std::cell::Cell;

use chrono::{Days, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use evidenca_api::EvidencaClient;
use evidenca_core::datetime::INPUT_FORMAT;
use evidenca_core::{Bay, Event, EventDraft, GridView, Point, ResourceCalendarView};

use crate::action::{Action, Request};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::{input, panel};

/// Field focused in the add/edit modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DraftField {
    #[default]
    Title,
    Start,
    End,
}

impl DraftField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Start,
            Self::Start => Self::End,
            Self::End => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::End,
            Self::Start => Self::Title,
            Self::End => Self::Start,
        }
    }
}

/// Start and end offered for a new booking on `date`: 09:00 to 10:00.
fn default_slot(date: NaiveDate) -> (String, String) {
    let at = |h| {
        date.and_hms_opt(h, 0, 0)
            .map(|dt| dt.format(INPUT_FORMAT).to_string())
            .unwrap_or_default()
    };
    (at(9), at(10))
}

/// Days the focused date moves for the vertical arrows.
fn vertical_step(view: GridView) -> u64 {
    match view {
        GridView::Month => 7,
        GridView::Week | GridView::Day => 1,
    }
}

fn time_range(event: &Event) -> String {
    let hm = |dt: Option<&chrono::DateTime<Utc>>| {
        dt.map_or_else(|| "--:--".to_owned(), |d| d.format("%H:%M").to_string())
    };
    format!("{}-{}", hm(event.start.as_ref()), hm(event.end.as_ref()))
}

pub struct CalendarScreen {
    view: ResourceCalendarView<EvidencaClient>,
    /// Highlighted row in the focused day's list.
    day_index: usize,
    field: DraftField,
    confirm_delete: bool,
    notice: Option<String>,
    // Where the last frame drew things, for mouse hit testing.
    list_area: Cell<Rect>,
    grid_area: Cell<Rect>,
}

impl CalendarScreen {
    pub fn new(view: ResourceCalendarView<EvidencaClient>) -> Self {
        Self {
            view,
            day_index: 0,
            field: DraftField::default(),
            confirm_delete: false,
            notice: None,
            list_area: Cell::new(Rect::default()),
            grid_area: Cell::new(Rect::default()),
        }
    }

    /// Run a calendar request against the back end. Failures stay in the
    /// view's diagnostic for the status bar.
    pub async fn perform(&mut self, request: Request) {
        match request {
            Request::LoadCalendar => {
                let _ = self.view.mount().await;
            }
            Request::SwitchBay(bay) => {
                self.day_index = 0;
                self.confirm_delete = false;
                let _ = self.view.switch_calendar(bay).await;
            }
            Request::CreateEvent => {
                if let Ok(event) = self.view.create_event().await {
                    self.notice = Some(format!("Booked {} on {}", event.title, event.calendar));
                }
            }
            Request::SaveEvent => {
                if self.view.save_edit().await.is_ok() {
                    self.notice = Some("Reservation updated".into());
                }
            }
            Request::DeleteEvent => {
                if self.view.delete_selected().await.is_ok() {
                    self.day_index = 0;
                    self.notice = Some("Reservation canceled".into());
                }
            }
            _ => {}
        }
    }

    fn focused_events(&self) -> Vec<&Event> {
        let anchor = self.view.anchor();
        self.view
            .grid()
            .into_iter()
            .find(|cell| cell.date == anchor)
            .map(|cell| cell.events)
            .unwrap_or_default()
    }

    fn move_focus(&mut self, forward: bool, days: u64) {
        let anchor = self.view.anchor();
        let moved = if forward {
            anchor.checked_add_days(Days::new(days))
        } else {
            anchor.checked_sub_days(Days::new(days))
        };
        if let Some(date) = moved {
            self.view.set_anchor(date);
            self.day_index = 0;
        }
    }

    fn set_view(&mut self, view: GridView) {
        self.view.set_grid_view(view);
        self.day_index = 0;
    }

    /// Select the list row `index`, anchoring the tooltip at `pointer`.
    fn select_row(&mut self, index: usize, pointer: Point) {
        let id = self
            .focused_events()
            .get(index)
            .and_then(|e| e.id.clone());
        match id {
            Some(id) => {
                self.day_index = index;
                self.view.select_event(&id, pointer);
            }
            None => self.notice = Some("This reservation has no id and cannot be selected".into()),
        }
    }

    /// Screen position of list row `index`, just right of the row's start.
    fn row_pointer(&self, index: usize) -> Point {
        let area = self.list_area.get();
        let row = i32::from(area.y) + 1 + i32::try_from(index).unwrap_or(i32::MAX);
        Point::new(i32::from(area.x) + 2, row)
    }

    fn open_add(&mut self) {
        if !self.view.open_add_form() {
            self.notice = Some("Your role cannot book bays".into());
            return;
        }
        let (start, end) = default_slot(self.view.anchor());
        let draft = self.view.add_draft_mut();
        if draft.title.is_empty() && draft.start.is_empty() && draft.end.is_empty() {
            *draft = EventDraft::new("", start, end);
        }
        self.field = DraftField::Title;
    }

    fn draft_input_mut(&mut self) -> &mut String {
        if self.view.is_edit_open() {
            let draft = self.view.edit_draft_mut();
            match self.field {
                DraftField::Title => &mut draft.title,
                DraftField::Start => &mut draft.start,
                DraftField::End => &mut draft.end,
            }
        } else {
            let draft = self.view.add_draft_mut();
            match self.field {
                DraftField::Title => &mut draft.title,
                DraftField::Start => &mut draft.start,
                DraftField::End => &mut draft.end,
            }
        }
    }

    // ── Key handling ────────────────────────────────────────────────

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Action> {
        let editing = self.view.is_edit_open();
        match key.code {
            KeyCode::Esc => {
                if editing {
                    self.view.close_editor();
                } else {
                    self.view.close_add_form();
                }
            }
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Enter => {
                return Some(Action::Request(if editing {
                    Request::SaveEvent
                } else {
                    Request::CreateEvent
                }));
            }
            KeyCode::Char('d') if editing && key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.confirm_delete = true;
            }
            _ => {
                input::edit(self.draft_input_mut(), key);
            }
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<Action> {
        self.confirm_delete = false;
        match key.code {
            KeyCode::Char('y' | 'Y') => Some(Action::Request(Request::DeleteEvent)),
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let active = self.view.active_bay();
        let mut spans = Vec::new();
        for bay in Bay::ALL {
            let label = format!(" {bay} ");
            spans.push(if bay == active {
                Span::styled(format!("[{label}]"), theme::tab_active())
            } else {
                Span::styled(label, theme::tab_inactive())
            });
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("  ", theme::dim()));
        spans.push(Span::styled(self.view.period_title(), theme::title_style()));
        spans.push(Span::styled(
            format!("  ({})", self.view.grid_view()),
            theme::dim(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cells = self.view.grid();
        let grid_view = self.view.grid_view();
        let cols: u16 = if grid_view == GridView::Day { 1 } else { 7 };
        let rows = u16::try_from(cells.len()).unwrap_or(1).div_ceil(cols).max(1);

        let [weekdays, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        if grid_view != GridView::Day {
            let names = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            let col_areas = Layout::horizontal(vec![Constraint::Ratio(1, 7); 7]).split(weekdays);
            for (name, col) in names.iter().zip(col_areas.iter()) {
                frame.render_widget(
                    Paragraph::new(Span::styled(*name, theme::table_header()))
                        .alignment(Alignment::Center),
                    *col,
                );
            }
        }
        self.grid_area.set(body);

        let today = Utc::now().date_naive();
        let anchor = self.view.anchor();
        let row_areas =
            Layout::vertical(vec![Constraint::Ratio(1, u32::from(rows)); usize::from(rows)])
                .split(body);
        for (r, row_area) in row_areas.iter().enumerate() {
            let col_areas =
                Layout::horizontal(vec![Constraint::Ratio(1, u32::from(cols)); usize::from(cols)])
                    .split(*row_area);
            for (c, cell_area) in col_areas.iter().enumerate() {
                let Some(cell) = cells.get(r * usize::from(cols) + c) else {
                    continue;
                };
                let day_style = if cell.date == anchor {
                    theme::day_focused()
                } else if cell.date == today {
                    theme::day_today()
                } else if cell.in_period {
                    theme::table_row()
                } else {
                    theme::day_outside()
                };
                let heading = if grid_view == GridView::Day {
                    cell.date.format("%a %-d %b").to_string()
                } else {
                    cell.date.format("%-d").to_string()
                };
                let mut lines = vec![Line::from(Span::styled(heading, day_style))];

                let room = usize::from(cell_area.height.saturating_sub(1));
                let shown = if cell.events.len() > room {
                    room.saturating_sub(1)
                } else {
                    cell.events.len()
                };
                for event in cell.events.iter().take(shown) {
                    let start = event
                        .start
                        .map(|s| s.format("%H:%M").to_string())
                        .unwrap_or_default();
                    lines.push(Line::from(Span::styled(
                        format!("{start} {}", event.title),
                        theme::event_chip(),
                    )));
                }
                if shown < cell.events.len() {
                    lines.push(Line::from(Span::styled(
                        format!("+{} more", cell.events.len() - shown),
                        theme::dim(),
                    )));
                }
                frame.render_widget(Paragraph::new(lines), *cell_area);
            }
        }
    }

    fn render_day_list(&self, frame: &mut Frame, area: Rect) {
        let events = self.focused_events();
        let selected_id = self.view.selection().map(|s| &s.id);
        let items: Vec<ListItem> = events
            .iter()
            .map(|e| {
                let marker = if e.id.as_ref().is_some_and(|id| Some(id) == selected_id) {
                    "\u{25CF} "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, theme::success()),
                    Span::styled(time_range(e), theme::dim()),
                    Span::raw(" "),
                    Span::styled(e.title.clone(), theme::table_row()),
                ]))
            })
            .collect();

        let title = self.view.anchor().format(" %A %-d %B ").to_string();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(Span::styled(title, theme::title_style()))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_focused()),
            )
            .highlight_style(theme::table_selected());
        let mut state = ListState::default()
            .with_selected((!events.is_empty()).then(|| self.day_index.min(events.len() - 1)));
        self.list_area.set(area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_tooltip(&self, frame: &mut Frame) {
        let (Some(event), Some(anchor)) = (self.view.selected_event(), self.view.tooltip_anchor())
        else {
            return;
        };
        let area = panel::anchored(anchor, 40, 7, frame.area());
        let inner = panel::open(frame, area, &event.title);
        let owner = if event.owner_name.is_empty() {
            "-"
        } else {
            event.owner_name.as_str()
        };
        let when = event
            .start
            .map(|s| s.format("%a %-d %b").to_string())
            .unwrap_or_default();
        let lines = vec![
            Line::from(vec![
                Span::styled("When   ", theme::dim()),
                Span::raw(format!("{when} {}", time_range(event))),
            ]),
            Line::from(vec![
                Span::styled("Bay    ", theme::dim()),
                Span::raw(event.calendar.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Booked ", theme::dim()),
                Span::raw(owner.to_owned()),
            ]),
            Line::from(Span::styled("e edit  x cancel  Esc close", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let editing = self.view.is_edit_open();
        let (title, text_title, start, end) = if editing {
            let d = self.view.edit_draft();
            ("Edit reservation", &d.title, &d.start, &d.end)
        } else {
            let d = self.view.add_draft();
            ("New reservation", &d.title, &d.start, &d.end)
        };
        let heading = format!("{title} · {}", self.view.active_bay());
        let inner = panel::open(frame, panel::centered(area, 56, 18), &heading);
        let [t, s, e, hint] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(2),
        ])
        .margin(1)
        .areas(inner);

        input::render_field(frame, t, "Title", text_title, self.field == DraftField::Title, false);
        input::render_field(
            frame,
            s,
            "Start (YYYY-MM-DDTHH:MM)",
            start,
            self.field == DraftField::Start,
            false,
        );
        input::render_field(
            frame,
            e,
            "End (YYYY-MM-DDTHH:MM)",
            end,
            self.field == DraftField::End,
            false,
        );
        let hints = if editing {
            "Tab next  Enter save  Ctrl+D cancel booking  Esc close"
        } else {
            "Tab next  Enter book  Esc close"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hints, theme::key_hint())).alignment(Alignment::Center),
            hint,
        );
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .view
            .selected_event()
            .map_or_else(|| "this reservation".to_owned(), |e| format!("'{}'", e.title));
        let inner = panel::open(frame, panel::centered(area, 50, 5), "Cancel reservation");
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(format!("Cancel {title}?")),
                Line::from(Span::styled("y yes  any other key no", theme::key_hint())),
            ])
            .alignment(Alignment::Center),
            inner,
        );
    }
}

impl Component for CalendarScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        self.notice = None;
        if self.confirm_delete {
            return self.handle_confirm_key(key);
        }
        if self.view.is_add_open() || self.view.is_edit_open() {
            return self.handle_modal_key(key);
        }

        let step = vertical_step(self.view.grid_view());
        match key.code {
            KeyCode::Left => self.move_focus(false, 1),
            KeyCode::Right => self.move_focus(true, 1),
            KeyCode::Up => self.move_focus(false, step),
            KeyCode::Down => self.move_focus(true, step),
            KeyCode::Char('j') => {
                let len = self.focused_events().len();
                if self.day_index + 1 < len {
                    self.day_index += 1;
                }
            }
            KeyCode::Char('k') => self.day_index = self.day_index.saturating_sub(1),
            KeyCode::Char('n') | KeyCode::PageDown => {
                self.view.next_period();
                self.day_index = 0;
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                self.view.prev_period();
                self.day_index = 0;
            }
            KeyCode::Char('t') => {
                self.view.today();
                self.day_index = 0;
            }
            KeyCode::Char('m') => self.set_view(GridView::Month),
            KeyCode::Char('w') => self.set_view(GridView::Week),
            KeyCode::Char('d') => self.set_view(GridView::Day),
            KeyCode::Char('b' | ']') => {
                return Some(Action::Request(Request::SwitchBay(
                    self.view.active_bay().next(),
                )));
            }
            KeyCode::Char('B' | '[') => {
                return Some(Action::Request(Request::SwitchBay(
                    self.view.active_bay().prev(),
                )));
            }
            KeyCode::Enter => self.select_row(self.day_index, self.row_pointer(self.day_index)),
            KeyCode::Esc => self.view.deselect_event(),
            KeyCode::Char('a') => self.open_add(),
            KeyCode::Char('e') => {
                if self.view.open_editor() {
                    self.field = DraftField::Title;
                } else {
                    self.notice = Some("Select a reservation first (Enter)".into());
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if self.view.selection().is_some() {
                    self.confirm_delete = true;
                } else {
                    self.notice = Some("Select a reservation first (Enter)".into());
                }
            }
            KeyCode::Char('r') => return Some(Action::Request(Request::LoadCalendar)),
            _ => {}
        }
        None
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Option<Action> {
        if self.captures_input() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => self.view.next_period(),
            MouseEventKind::ScrollUp => self.view.prev_period(),
            MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = (mouse.column, mouse.row);
                let list = self.list_area.get();
                let grid = self.grid_area.get();
                if list.contains((x, y).into()) && y > list.y {
                    let index = usize::from(y - list.y - 1);
                    if index < self.focused_events().len() {
                        self.select_row(index, Point::new(i32::from(x), i32::from(y)));
                    }
                } else if grid.contains((x, y).into()) {
                    let date = {
                        let per_row: u16 = if self.view.grid_view() == GridView::Day { 1 } else { 7 };
                        let cells = self.view.grid();
                        let row_count =
                            u16::try_from(cells.len()).unwrap_or(1).div_ceil(per_row).max(1);
                        let across = (x - grid.x) * per_row / grid.width.max(1);
                        let down = (y - grid.y) * row_count / grid.height.max(1);
                        cells.get(usize::from(down * per_row + across)).map(|cell| cell.date)
                    };
                    if let Some(date) = date {
                        self.view.set_anchor(date);
                        self.day_index = 0;
                    }
                }
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [header, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        self.render_header(frame, header);

        let [grid, list] =
            Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
                .areas(body);
        self.render_grid(frame, grid);
        self.render_day_list(frame, list);

        if self.view.is_add_open() || self.view.is_edit_open() {
            self.render_form(frame, area);
        } else {
            self.render_tooltip(frame);
        }
        if self.confirm_delete {
            self.render_confirm(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.confirm_delete || self.view.is_add_open() || self.view.is_edit_open()
    }

    fn last_error(&self) -> Option<&str> {
        self.view.last_error()
    }

    fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn key_hints(&self) -> &'static str {
        "\u{2190}\u{2192}\u{2191}\u{2193} day  j/k pick  Enter select  a book  e edit  x cancel  m/w/d view  n/p period  b bay  r reload"
    }

    fn id(&self) -> ScreenId {
        ScreenId::Calendar
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use evidenca_api::TransportConfig;
    use evidenca_core::{CalendarOptions, EntityId, Role, Session, User, VisibilityPolicy};

    use super::*;

    fn screen(role: Role) -> CalendarScreen {
        let client = EvidencaClient::new(
            "http://localhost:5000".parse().unwrap(),
            &TransportConfig::default(),
        )
        .unwrap();
        let user = User {
            id: EntityId::Number(4),
            email: None,
            first_name: "Ana".into(),
            last_name: "Novak".into(),
            role,
        };
        let view = ResourceCalendarView::new(
            client,
            Session::new(SecretString::from("tok"), user),
            CalendarOptions {
                initial_bay: Bay::Bay2,
                visibility: VisibilityPolicy::ResourceOnly,
            },
        );
        CalendarScreen::new(view)
    }

    fn press(screen: &mut CalendarScreen, code: KeyCode) -> Option<Action> {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn default_slot_is_nine_to_ten() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(
            default_slot(date),
            ("2024-05-02T09:00".to_owned(), "2024-05-02T10:00".to_owned())
        );
    }

    #[test]
    fn draft_fields_cycle() {
        assert_eq!(DraftField::Title.next(), DraftField::Start);
        assert_eq!(DraftField::End.next(), DraftField::Title);
        assert_eq!(DraftField::Title.prev(), DraftField::End);
    }

    #[test]
    fn booking_opens_a_prefilled_form() {
        let mut screen = screen(Role::Admin);
        screen.view.set_anchor(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        press(&mut screen, KeyCode::Char('a'));
        assert!(screen.view.is_add_open());
        assert!(screen.captures_input());
        assert_eq!(screen.view.add_draft().start, "2024-05-02T09:00");

        for c in "Brakes".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        assert_eq!(screen.view.add_draft().title, "Brakes");
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::Request(Request::CreateEvent))
        );

        press(&mut screen, KeyCode::Esc);
        assert!(!screen.view.is_add_open());
    }

    #[test]
    fn regular_users_are_told_they_cannot_book() {
        let mut screen = screen(Role::User);
        press(&mut screen, KeyCode::Char('a'));
        assert!(!screen.view.is_add_open());
        assert!(screen.notice().is_some());
    }

    #[test]
    fn bay_keys_request_a_switch() {
        let mut screen = screen(Role::Admin);
        assert_eq!(
            press(&mut screen, KeyCode::Char('b')),
            Some(Action::Request(Request::SwitchBay(Bay::Bay3)))
        );
        assert_eq!(
            press(&mut screen, KeyCode::Char('B')),
            Some(Action::Request(Request::SwitchBay(Bay::Bay1)))
        );
    }

    #[test]
    fn arrows_move_the_focused_day() {
        let mut screen = screen(Role::Admin);
        screen.view.set_anchor(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.view.anchor(), NaiveDate::from_ymd_opt(2024, 5, 9).unwrap());
        press(&mut screen, KeyCode::Char('d'));
        press(&mut screen, KeyCode::Up);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.view.anchor(), NaiveDate::from_ymd_opt(2024, 5, 7).unwrap());
        assert_eq!(screen.view.grid_view(), GridView::Day);
    }

    #[test]
    fn edit_and_cancel_need_a_selection() {
        let mut screen = screen(Role::Admin);
        press(&mut screen, KeyCode::Char('e'));
        assert!(!screen.view.is_edit_open());
        press(&mut screen, KeyCode::Char('x'));
        assert!(!screen.captures_input());
        assert!(screen.notice().is_some());
    }
}
