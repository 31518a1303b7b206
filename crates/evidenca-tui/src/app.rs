//! Application core: owns the screens, turns input into actions and performs
//! back-end requests one at a time.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use evidenca_config::SessionStore;
use evidenca_core::{
    CalendarOptions, ClientConfig, ProjectBoard, ResourceCalendarView, Session, User,
};

use crate::action::{Action, Request};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::{calendar::CalendarScreen, login::LoginScreen, projects::ProjectsScreen};
use crate::theme;
use crate::tui::Tui;
use crate::widgets::panel;

const TICK_RATE: Duration = Duration::from_secs(1);

/// Screens that exist only while signed in.
struct Workspace {
    user: User,
    calendar: CalendarScreen,
    projects: ProjectsScreen,
}

pub struct App {
    /// Connection settings without a token.
    client_cfg: ClientConfig,
    store: SessionStore,
    login: LoginScreen,
    workspace: Option<Workspace>,
    active: ScreenId,
    help_visible: bool,
    /// Label of the request in flight.
    busy: Option<&'static str>,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(client_cfg: ClientConfig, store: SessionStore, session: Option<Session>) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let login = LoginScreen::new(client_cfg.build_client()?);
        let mut app = Self {
            client_cfg,
            store,
            login,
            workspace: None,
            active: ScreenId::Login,
            help_visible: false,
            busy: None,
            running: true,
            action_tx,
            action_rx,
        };
        if let Some(session) = session {
            app.open_workspace(session)?;
        }
        Ok(app)
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let mut events = EventReader::new(TICK_RATE);
        let (width, height) = tui.size()?;
        debug!(width, height, "terminal ready");

        tui.draw(|frame| self.render(frame))?;
        while self.running {
            self.drain_actions(&mut tui).await?;
            if !self.running {
                break;
            }
            let Some(event) = events.next().await else {
                break;
            };
            self.handle_event(event);
            self.drain_actions(&mut tui).await?;
            tui.draw(|frame| self.render(frame))?;
        }

        tui.exit();
        Ok(())
    }

    /// Process queued actions. A request is shown as busy, drawn, then
    /// awaited before the next action is looked at.
    async fn drain_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            match action {
                Action::Request(request) => {
                    self.busy = Some(request.label());
                    tui.draw(|frame| self.render(frame))?;
                    let outcome = self.perform(request).await;
                    self.busy = None;
                    outcome?;
                    tui.draw(|frame| self.render(frame))?;
                }
                other => self.update(other),
            }
        }
        Ok(())
    }

    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Build the signed-in screens for `session` and queue their first loads.
    fn open_workspace(&mut self, session: Session) -> Result<()> {
        let mut cfg = self.client_cfg.clone();
        cfg.token = Some(session.token.clone());
        let client = cfg.build_client()?;

        let options = CalendarOptions {
            initial_bay: cfg.default_calendar,
            visibility: cfg.visibility,
        };
        let user = session.user.clone();
        let calendar = CalendarScreen::new(ResourceCalendarView::new(
            client.clone(),
            session,
            options,
        ));
        let projects = ProjectsScreen::new(ProjectBoard::new(client));

        info!(user = %user.display_name(), role = %user.role, "workspace opened");
        self.workspace = Some(Workspace {
            user,
            calendar,
            projects,
        });
        self.active = ScreenId::Calendar;
        self.send(Action::Request(Request::LoadCalendar));
        self.send(Action::Request(Request::LoadProjects));
        Ok(())
    }

    fn sign_out(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not clear the stored session");
        }
        self.workspace = None;
        self.active = ScreenId::Login;
        self.login.reset();
        info!("signed out");
    }

    async fn perform(&mut self, request: Request) -> Result<()> {
        debug!(?request, "performing request");
        match request {
            Request::SignIn => {
                if let Some(session) = self.login.sign_in().await {
                    if let Err(e) = self.store.save(&session) {
                        warn!(error = %e, "session not persisted");
                    }
                    self.open_workspace(session)?;
                }
            }
            Request::LoadCalendar
            | Request::SwitchBay(_)
            | Request::CreateEvent
            | Request::SaveEvent
            | Request::DeleteEvent => {
                if let Some(ws) = self.workspace.as_mut() {
                    ws.calendar.perform(request).await;
                }
            }
            Request::LoadProjects | Request::SaveProject | Request::AddProject => {
                if let Some(ws) = self.workspace.as_mut() {
                    ws.projects.perform(request).await;
                }
            }
        }
        Ok(())
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchScreen(screen) => {
                if self.workspace.is_some() && screen != ScreenId::Login {
                    self.active = screen;
                }
            }
            Action::NextScreen => self.active = self.active.next(),
            Action::PrevScreen => self.active = self.active.prev(),
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::SignOut => self.sign_out(),
            // Performed by drain_actions.
            Action::Request(_) => {}
        }
    }

    // ── Input ───────────────────────────────────────────────────────

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.active_component_mut().handle_mouse_event(mouse),
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                None
            }
            Event::Tick => None,
        };
        if let Some(action) = action {
            self.send(action);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        if self.help_visible {
            self.help_visible = false;
            return None;
        }
        if self.active_component().captures_input() {
            return self.active_component_mut().handle_key_event(key);
        }
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('L') => Some(Action::SignOut),
            KeyCode::Tab => Some(Action::NextScreen),
            KeyCode::BackTab => Some(Action::PrevScreen),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .and_then(|n| u8::try_from(n).ok())
                .and_then(ScreenId::from_number)
                .map(Action::SwitchScreen),
            _ => self.active_component_mut().handle_key_event(key),
        }
    }

    fn active_component(&self) -> &dyn Component {
        match (self.active, self.workspace.as_ref()) {
            (ScreenId::Calendar, Some(ws)) => &ws.calendar,
            (ScreenId::Projects, Some(ws)) => &ws.projects,
            _ => &self.login,
        }
    }

    fn active_component_mut(&mut self) -> &mut dyn Component {
        match (self.active, self.workspace.as_mut()) {
            (ScreenId::Calendar, Some(ws)) => &mut ws.calendar,
            (ScreenId::Projects, Some(ws)) => &mut ws.projects,
            _ => &mut self.login,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [tabs, content, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_tab_bar(frame, tabs);
        self.active_component().render(frame, content);
        self.render_status_bar(frame, status);

        if self.help_visible {
            self.render_help(frame, content);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" Evidenca ", theme::title_style())];
        if let Some(ref ws) = self.workspace {
            for screen in ScreenId::ALL {
                let label = format!(" {} {} ", screen.number(), screen.label());
                spans.push(if screen == self.active {
                    Span::styled(label, theme::tab_active())
                } else {
                    Span::styled(label, theme::tab_inactive())
                });
            }
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{} ({}) ", ws.user.display_name(), ws.user.role),
                    theme::dim(),
                ))
                .alignment(Alignment::Right),
                area,
            );
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let component = self.active_component();
        let line = if let Some(label) = self.busy {
            Line::from(Span::styled(format!(" \u{27F3} {label}\u{2026}"), theme::tab_active()))
        } else if let Some(message) = component.last_error() {
            Line::from(Span::styled(format!(" \u{2717} {message}"), theme::error()))
        } else if let Some(message) = component.notice() {
            Line::from(Span::styled(format!(" \u{2713} {message}"), theme::success()))
        } else {
            Line::from(vec![
                Span::styled(format!(" {}", component.key_hints()), theme::dim()),
                Span::styled("  ? help  q quit", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let inner = panel::open(frame, panel::centered(area, 64, 14), "Keys");
        let row = |key: &str, what: &str| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), theme::key_hint()),
                Span::styled(what.to_owned(), theme::table_row()),
            ])
        };
        let mut lines = vec![
            row("1 2", "switch screen"),
            row("Tab S-Tab", "next / previous screen"),
            row("?", "toggle this help"),
            row("L", "sign out"),
            row("q Ctrl+C", "quit"),
            Line::default(),
        ];
        let component = self.active_component();
        lines.push(Line::from(Span::styled(
            format!("{}:", component.id()),
            theme::title_style(),
        )));
        lines.push(Line::from(Span::styled(
            component.key_hints(),
            theme::table_row(),
        )));
        frame.render_widget(
            Paragraph::new(lines).wrap(ratatui::widgets::Wrap { trim: true }),
            inner,
        );
    }
}
