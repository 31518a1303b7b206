//! Project board: active and closed tables with edit and add modals.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

use evidenca_api::EvidencaClient;
use evidenca_core::{Priority, Progress, Project, ProjectBoard, ProjectStatus};

use crate::action::{Action, Request};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::{input, panel};

const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Normal, Priority::Low];
const STATUSES: [ProjectStatus; 4] = [
    ProjectStatus::Pending,
    ProjectStatus::InProgress,
    ProjectStatus::Completed,
    ProjectStatus::Canceled,
];
/// Statuses a new project may start in.
const STARTING: [ProjectStatus; 2] = [ProjectStatus::Pending, ProjectStatus::InProgress];
const PROGRESS_STEP: u8 = 5;

/// The option after (or before) `current`, wrapping. Unknown values start
/// from the first option.
fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let Some(idx) = options.iter().position(|&o| o == current) else {
        return options.first().copied().unwrap_or(current);
    };
    let len = options.len();
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    options[next]
}

fn step_progress(progress: Progress, up: bool) -> Progress {
    let pct = progress.percent();
    Progress::new(if up {
        pct.saturating_add(PROGRESS_STEP)
    } else {
        pct.saturating_sub(PROGRESS_STEP)
    })
}

/// Ten-cell bar followed by the percentage.
fn progress_bar(progress: Progress) -> String {
    let filled = usize::from(progress.percent() / 10);
    format!(
        "{}{} {progress}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(10 - filled)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Active,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EditField {
    #[default]
    Priority,
    Status,
    Progress,
}

impl EditField {
    fn next(self) -> Self {
        match self {
            Self::Priority => Self::Status,
            Self::Status => Self::Progress,
            Self::Progress => Self::Priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AddField {
    #[default]
    Name,
    Priority,
    Status,
}

impl AddField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Priority,
            Self::Priority => Self::Status,
            Self::Status => Self::Name,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct AddDraft {
    name: String,
    priority: Priority,
    status: ProjectStatus,
    field: AddField,
}

pub struct ProjectsScreen {
    board: ProjectBoard<EvidencaClient>,
    focus: Focus,
    active_index: usize,
    closed_index: usize,
    edit_field: EditField,
    add: Option<AddDraft>,
    notice: Option<String>,
}

impl ProjectsScreen {
    pub fn new(board: ProjectBoard<EvidencaClient>) -> Self {
        Self {
            board,
            focus: Focus::default(),
            active_index: 0,
            closed_index: 0,
            edit_field: EditField::default(),
            add: None,
            notice: None,
        }
    }

    pub async fn perform(&mut self, request: Request) {
        match request {
            Request::LoadProjects => {
                let _ = self.board.load().await;
            }
            Request::SaveProject => {
                if let Ok(project) = self.board.save().await {
                    self.notice = Some(format!("Project '{}' updated", project.name));
                }
            }
            Request::AddProject => {
                let Some(draft) = self.add.clone() else {
                    return;
                };
                let created = self
                    .board
                    .add_project(draft.name.trim(), draft.priority, draft.status)
                    .await;
                if let Ok(project) = created {
                    self.add = None;
                    self.notice = Some(format!("Project '{}' created", project.name));
                }
            }
            _ => {}
        }
    }

    fn rows(&self, focus: Focus) -> Vec<&Project> {
        match focus {
            Focus::Active => self.board.active(),
            Focus::Closed => self.board.closed(),
        }
    }

    fn index_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Active => &mut self.active_index,
            Focus::Closed => &mut self.closed_index,
        }
    }

    fn open_editor(&mut self) {
        let index = match self.focus {
            Focus::Active => self.active_index,
            Focus::Closed => self.closed_index,
        };
        let id = self.rows(self.focus).get(index).map(|p| p.id.clone());
        if let Some(id) = id {
            self.board.open_editor(&id);
            self.edit_field = EditField::default();
        }
    }

    // ── Key handling ────────────────────────────────────────────────

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Action> {
        let field = self.edit_field;
        let editor = self.board.editor_mut()?;
        match key.code {
            KeyCode::Esc => self.board.close_editor(),
            KeyCode::Tab | KeyCode::Down => self.edit_field = field.next(),
            KeyCode::Enter => return Some(Action::Request(Request::SaveProject)),
            KeyCode::Left | KeyCode::Right | KeyCode::Char('-' | '+' | 'h' | 'l') => {
                let forward = matches!(key.code, KeyCode::Right | KeyCode::Char('+' | 'l'));
                match field {
                    EditField::Priority => {
                        editor.priority = cycle(&PRIORITIES, editor.priority, forward);
                    }
                    EditField::Status => editor.status = cycle(&STATUSES, editor.status, forward),
                    EditField::Progress => editor.progress = step_progress(editor.progress, forward),
                }
            }
            _ => {}
        }
        None
    }

    fn handle_add_key(&mut self, key: KeyEvent) -> Option<Action> {
        let draft = self.add.as_mut()?;
        match key.code {
            KeyCode::Esc => self.add = None,
            KeyCode::Tab | KeyCode::Down => draft.field = draft.field.next(),
            KeyCode::Enter => return Some(Action::Request(Request::AddProject)),
            KeyCode::Left | KeyCode::Right if draft.field != AddField::Name => {
                let forward = key.code == KeyCode::Right;
                match draft.field {
                    AddField::Priority => draft.priority = cycle(&PRIORITIES, draft.priority, forward),
                    AddField::Status => draft.status = cycle(&STARTING, draft.status, forward),
                    AddField::Name => {}
                }
            }
            _ if draft.field == AddField::Name => {
                input::edit(&mut draft.name, key);
            }
            _ => {}
        }
        None
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_table(&self, frame: &mut Frame, area: Rect, focus: Focus) {
        let projects = self.rows(focus);
        let focused = self.focus == focus;
        let title = match focus {
            Focus::Active => format!(" Active ({}) ", projects.len()),
            Focus::Closed => format!(" Closed ({}) ", projects.len()),
        };

        let header = Row::new(["Name", "Priority", "Status", "Progress"].map(Cell::from))
            .style(theme::table_header());
        let rows = projects.iter().map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.priority.to_string()),
                Cell::from(p.status.to_string()),
                Cell::from(progress_bar(p.progress)),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(16),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(Span::styled(title, theme::title_style()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if focused {
                    theme::border_focused()
                } else {
                    theme::border_default()
                }),
        )
        .row_highlight_style(theme::table_selected());

        let index = match focus {
            Focus::Active => self.active_index,
            Focus::Closed => self.closed_index,
        };
        let mut state = TableState::default()
            .with_selected((focused && !projects.is_empty()).then(|| index.min(projects.len() - 1)));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let Some(editor) = self.board.editor() else {
            return;
        };
        let name = self
            .board
            .find(&editor.id)
            .map_or_else(|| editor.id.to_string(), |p| p.name.clone());
        let inner = panel::open(frame, panel::centered(area, 50, 9), &name);
        let line = |label: &str, value: String, field: EditField| {
            let style = if self.edit_field == field {
                theme::tab_active()
            } else {
                theme::table_row()
            };
            Line::from(vec![
                Span::styled(format!("{label:<10}"), theme::dim()),
                Span::styled(format!("\u{2039} {value} \u{203A}"), style),
            ])
        };
        let lines = vec![
            line("Priority", editor.priority.to_string(), EditField::Priority),
            line("Status", editor.status.to_string(), EditField::Status),
            line("Progress", progress_bar(editor.progress), EditField::Progress),
            Line::default(),
            Line::from(Span::styled(
                "Tab field  \u{2190}/\u{2192} change  Enter save  Esc close",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn render_add(&self, frame: &mut Frame, area: Rect, draft: &AddDraft) {
        let inner = panel::open(frame, panel::centered(area, 50, 11), "New project");
        let [name_area, rest] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(inner);
        input::render_field(
            frame,
            name_area,
            "Name",
            &draft.name,
            draft.field == AddField::Name,
            false,
        );
        let choice = |label: &str, value: String, field: AddField| {
            let style = if draft.field == field {
                theme::tab_active()
            } else {
                theme::table_row()
            };
            Line::from(vec![
                Span::styled(format!("{label:<10}"), theme::dim()),
                Span::styled(format!("\u{2039} {value} \u{203A}"), style),
            ])
        };
        let lines = vec![
            choice("Priority", draft.priority.to_string(), AddField::Priority),
            choice("Status", draft.status.to_string(), AddField::Status),
            Line::default(),
            Line::from(Span::styled(
                "Tab field  \u{2190}/\u{2192} change  Enter create  Esc close",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), rest);
    }
}

impl Component for ProjectsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        self.notice = None;
        if self.add.is_some() {
            return self.handle_add_key(key);
        }
        if self.board.editor().is_some() {
            return self.handle_edit_key(key);
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.focus = Focus::Active,
            KeyCode::Right | KeyCode::Char('l') => self.focus = Focus::Closed,
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.rows(self.focus).len();
                let index = self.index_mut();
                if *index + 1 < len {
                    *index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let index = self.index_mut();
                *index = index.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('e') => self.open_editor(),
            KeyCode::Char('a') => self.add = Some(AddDraft::default()),
            KeyCode::Char('r') => return Some(Action::Request(Request::LoadProjects)),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [active, closed] =
            Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);
        self.render_table(frame, active, Focus::Active);
        self.render_table(frame, closed, Focus::Closed);

        if let Some(ref draft) = self.add {
            self.render_add(frame, area, draft);
        } else {
            self.render_editor(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.add.is_some() || self.board.editor().is_some()
    }

    fn last_error(&self) -> Option<&str> {
        self.board.last_error()
    }

    fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn key_hints(&self) -> &'static str {
        "h/l table  j/k move  Enter edit  a add  r reload"
    }

    fn id(&self) -> ScreenId {
        ScreenId::Projects
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;

    use evidenca_api::TransportConfig;

    use super::*;

    fn screen() -> ProjectsScreen {
        let client = EvidencaClient::new(
            "http://localhost:5000".parse().unwrap(),
            &TransportConfig::default(),
        )
        .unwrap();
        ProjectsScreen::new(ProjectBoard::new(client))
    }

    fn press(screen: &mut ProjectsScreen, code: KeyCode) -> Option<Action> {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(cycle(&PRIORITIES, Priority::Low, true), Priority::High);
        assert_eq!(cycle(&PRIORITIES, Priority::High, false), Priority::Low);
        assert_eq!(
            cycle(&STARTING, ProjectStatus::Completed, true),
            ProjectStatus::Pending
        );
    }

    #[test]
    fn progress_steps_stay_in_range() {
        assert_eq!(step_progress(Progress::new(98), true).percent(), 100);
        assert_eq!(step_progress(Progress::new(3), false).percent(), 0);
        assert_eq!(step_progress(Progress::new(40), true).percent(), 45);
    }

    #[test]
    fn progress_bar_fills_by_tenths() {
        assert!(progress_bar(Progress::new(60)).starts_with(&"\u{2588}".repeat(6)));
        assert!(progress_bar(Progress::new(100)).ends_with("100%"));
    }

    #[test]
    fn add_modal_only_offers_starting_statuses() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('a'));
        assert!(screen.captures_input());
        for c in "Lift service".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Right);
        let draft = screen.add.clone().unwrap();
        assert_eq!(draft.name, "Lift service");
        assert_eq!(draft.status, ProjectStatus::Pending);
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::Request(Request::AddProject))
        );
        press(&mut screen, KeyCode::Esc);
        assert!(!screen.captures_input());
    }

    #[test]
    fn editor_needs_a_project() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        assert!(screen.board.editor().is_none());
        assert_eq!(
            press(&mut screen, KeyCode::Char('r')),
            Some(Action::Request(Request::LoadProjects))
        );
    }
}
