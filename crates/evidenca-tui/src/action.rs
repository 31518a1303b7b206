//! Actions flowing from input handlers to the app loop.

use evidenca_core::Bay;

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchScreen(ScreenId),
    NextScreen,
    PrevScreen,
    ToggleHelp,
    SignOut,
    /// Back-end work, performed by the app one request at a time.
    Request(Request),
}

/// Work that needs the back end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    SignIn,
    LoadCalendar,
    SwitchBay(Bay),
    CreateEvent,
    SaveEvent,
    DeleteEvent,
    LoadProjects,
    SaveProject,
    AddProject,
}

impl Request {
    /// Shown in the status bar while the request runs.
    pub fn label(self) -> &'static str {
        match self {
            Self::SignIn => "Signing in",
            Self::LoadCalendar => "Loading reservations",
            Self::SwitchBay(_) => "Switching bay",
            Self::CreateEvent => "Booking",
            Self::SaveEvent => "Saving reservation",
            Self::DeleteEvent => "Canceling reservation",
            Self::LoadProjects => "Loading projects",
            Self::SaveProject => "Saving project",
            Self::AddProject => "Creating project",
        }
    }
}
