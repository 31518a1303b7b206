//! Floating panels: modals, the help overlay and the selection tooltip.

use evidenca_core::Point;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear},
};

use crate::theme;

/// A `width` x `height` rect centred in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// A `width` x `height` rect with its corner at `anchor`, pushed back inside
/// `bounds` when it would spill over an edge.
pub fn anchored(anchor: Point, width: u16, height: u16, bounds: Rect) -> Rect {
    let w = width.min(bounds.width);
    let h = height.min(bounds.height);
    let clamp = |pos: i32, lo: u16, span: u16, size: u16| -> u16 {
        let max = i32::from(lo) + i32::from(span - size);
        u16::try_from(pos.clamp(i32::from(lo), max)).unwrap_or(lo)
    };
    Rect::new(
        clamp(anchor.x, bounds.x, bounds.width, w),
        clamp(anchor.y, bounds.y, bounds.height, h),
        w,
        h,
    )
}

/// Clear `area`, draw a titled rounded border and return the inside.
pub fn open(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title.to_owned(), theme::title_style()),
            Span::raw(" "),
        ]))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn centered_shrinks_to_fit() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered(area, 80, 40), area);
    }

    #[test]
    fn anchored_stays_at_the_anchor_when_it_fits() {
        let bounds = Rect::new(0, 0, 100, 40);
        assert_eq!(
            anchored(Point::new(12, 5), 30, 6, bounds),
            Rect::new(12, 5, 30, 6)
        );
    }

    #[test]
    fn anchored_is_pulled_back_inside() {
        let bounds = Rect::new(2, 1, 60, 20);
        assert_eq!(
            anchored(Point::new(55, 18), 30, 6, bounds),
            Rect::new(32, 15, 30, 6)
        );
        assert_eq!(
            anchored(Point::new(-4, -9), 30, 6, bounds),
            Rect::new(2, 1, 30, 6)
        );
    }
}
