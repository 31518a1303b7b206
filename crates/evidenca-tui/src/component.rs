//! The trait every screen implements.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::action::Action;
use crate::screen::ScreenId;

/// Input handling and drawing for one screen.
///
/// Handlers only touch local state and return an [`Action`]; anything that
/// needs the back end comes back as [`Action::Request`] for the app to
/// perform.
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action>;

    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Option<Action> {
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// True while a text field or modal has the keyboard, so global keys
    /// like `q` and the number keys are passed through.
    fn captures_input(&self) -> bool {
        false
    }

    /// Most recent diagnostic from the screen's view model.
    fn last_error(&self) -> Option<&str> {
        None
    }

    /// Latest confirmation or hint, shown when there is no error.
    fn notice(&self) -> Option<&str> {
        None
    }

    /// Short key reference for the status bar.
    fn key_hints(&self) -> &'static str;

    fn id(&self) -> ScreenId;
}
