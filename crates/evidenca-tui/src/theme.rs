//! Workshop palette and shared styles.

use ratatui::style::{Color, Modifier, Style};

pub const STEEL_BLUE: Color = Color::Rgb(94, 156, 214); // #5e9cd6
pub const AMBER: Color = Color::Rgb(255, 184, 76); // #ffb84c
pub const TEAL: Color = Color::Rgb(72, 201, 176); // #48c9b0
pub const SIGNAL_RED: Color = Color::Rgb(235, 87, 87); // #eb5757
pub const OK_GREEN: Color = Color::Rgb(111, 207, 151); // #6fcf97

pub const TEXT: Color = Color::Rgb(214, 218, 224); // #d6dae0
pub const MUTED: Color = Color::Rgb(120, 128, 140); // #78808c
pub const BG_SELECTED: Color = Color::Rgb(44, 52, 64); // #2c3440

pub fn title_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(AMBER)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(STEEL_BLUE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().fg(MUTED)
}

pub fn error() -> Style {
    Style::default().fg(SIGNAL_RED).add_modifier(Modifier::BOLD)
}

pub fn success() -> Style {
    Style::default().fg(OK_GREEN)
}

/// Day cell outside the displayed month.
pub fn day_outside() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::DIM)
}

/// The focused day on the grid.
pub fn day_focused() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(AMBER)
        .add_modifier(Modifier::BOLD)
}

pub fn day_today() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Booking chip on the grid.
pub fn event_chip() -> Style {
    Style::default().fg(STEEL_BLUE)
}
