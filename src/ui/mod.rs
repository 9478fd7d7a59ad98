//! Terminal UI components
//!
//! Built with ratatui for a neon aesthetic.
//! Keyboard-first navigation throughout.

pub mod browser;
pub mod modal;
pub mod search;
pub mod status;
pub mod theme;
pub mod trending;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Clear},
    Frame,
};

use crate::app::{App, Focus, InputMode, ModalState};

pub use theme::Theme;

/// Main render function: header, optional trending strip, movie list,
/// status bar, and the detail overlay on top when open.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let trending_height = if app.trending.is_visible() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Header
            Constraint::Length(trending_height), // Trending strip
            Constraint::Min(1),                  // Movies
            Constraint::Length(1),               // Status bar
        ])
        .split(area);

    let editing = app.input_mode == InputMode::Editing;
    search::render(frame, chunks[0], &app.search, editing, app.debounce_pending());

    if app.trending.is_visible() {
        let focused = app.focus == Focus::Trending && !editing;
        trending::render(frame, chunks[1], &app.trending, focused);
    }

    let focused = app.focus == Focus::Movies && !editing;
    browser::render(frame, chunks[2], &mut app.search, focused);

    status::render(frame, chunks[3], app);

    if let ModalState::Open(open) = &mut app.modal {
        modal::render(frame, area, open);
    }
}

/// Rect of `percent_x` by `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(80, 80, area);
        assert!(rect.x >= 10 && rect.y >= 4);
        assert!(rect.right() <= area.right() && rect.bottom() <= area.bottom());
        assert_eq!(rect.width, 80);
    }
}
