//! Sign-in screen, shown while there is no session.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Span,
    widgets::Paragraph,
};
use secrecy::SecretString;

use evidenca_api::EvidencaClient;
use evidenca_core::{LoginForm, Session};

use crate::action::{Action, Request};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::{input, panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
}

pub struct LoginScreen {
    form: LoginForm<EvidencaClient>,
    email: String,
    password: String,
    field: Field,
}

impl LoginScreen {
    pub fn new(client: EvidencaClient) -> Self {
        Self {
            form: LoginForm::new(client),
            email: String::new(),
            password: String::new(),
            field: Field::Email,
        }
    }

    /// Submit the typed credentials. The password field is emptied either
    /// way; a rejection is left in the form's diagnostic.
    pub async fn sign_in(&mut self) -> Option<Session> {
        let password = SecretString::from(std::mem::take(&mut self.password));
        let email = self.email.trim().to_owned();
        self.form.login(&email, &password).await.ok()
    }

    /// Back to an empty password after signing out, keeping the email.
    pub fn reset(&mut self) {
        self.password.clear();
        self.field = if self.email.is_empty() {
            Field::Email
        } else {
            Field::Password
        };
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            Field::Email => Field::Password,
            Field::Password => Field::Email,
        };
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_field();
                None
            }
            KeyCode::Enter => match self.field {
                Field::Email => {
                    self.field = Field::Password;
                    None
                }
                Field::Password => Some(Action::Request(Request::SignIn)),
            },
            _ => {
                input::edit(self.active_input_mut(), key);
                None
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let inner = panel::open(frame, panel::centered(area, 56, 15), "Evidenca · Sign in");

        let [email_area, password_area, error_area, hint_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .margin(1)
        .areas(inner);

        input::render_field(
            frame,
            email_area,
            "Email",
            &self.email,
            self.field == Field::Email,
            false,
        );
        input::render_field(
            frame,
            password_area,
            "Password",
            &self.password,
            self.field == Field::Password,
            true,
        );
        if let Some(message) = self.form.last_error() {
            frame.render_widget(
                Paragraph::new(Span::styled(message.to_owned(), theme::error()))
                    .alignment(Alignment::Center),
                error_area,
            );
        }
        frame.render_widget(
            Paragraph::new(Span::styled(self.key_hints(), theme::key_hint()))
                .alignment(Alignment::Center),
            hint_area,
        );
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn last_error(&self) -> Option<&str> {
        self.form.last_error()
    }

    fn key_hints(&self) -> &'static str {
        "Tab switch field  Enter sign in  Esc quit"
    }

    fn id(&self) -> ScreenId {
        ScreenId::Login
    }
}
