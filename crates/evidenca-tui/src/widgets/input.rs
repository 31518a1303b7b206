//! Single-line text fields for forms.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::theme;

/// Apply a typing key to `value`. Returns `false` for keys that are not
/// text editing, so the caller can treat them as commands.
pub fn edit(value: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Backspace => {
            value.pop();
            true
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            value.clear();
            true
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            value.push(c);
            true
        }
        _ => false,
    }
}

/// One bullet per character.
pub fn mask(value: &str) -> String {
    "\u{25CF}".repeat(value.chars().count())
}

/// Label on the first row, bordered value box on the next three.
pub fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    active: bool,
    masked: bool,
) {
    if area.height < 4 {
        return;
    }

    let label_style = if active {
        theme::title_style()
    } else {
        theme::table_row()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label, label_style)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if active {
            theme::border_focused()
        } else {
            theme::border_default()
        });
    let box_area = Rect::new(area.x, area.y + 1, area.width, 3);
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let shown = if masked { mask(value) } else { value.to_owned() };
    let text = if active {
        format!("{shown}\u{2588}")
    } else {
        shown
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(theme::TEXT))),
        inner,
    );
}
