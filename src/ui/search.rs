//! Search box component
//!
//! Logo on the left, the live query on the right. The query is shown as
//! typed; the debounced term only drives the listing below.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::SearchState;
use crate::ui::Theme;

/// Placeholder shown while the box is empty and unfocused
pub const PLACEHOLDER: &str = "Search through thousands of movies";

/// Render the header: logo plus search box
pub fn render(frame: &mut Frame, area: Rect, search: &SearchState, editing: bool, pending: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Logo
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("REEL", Theme::title()),
        Span::styled("TUI", Theme::secondary().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, chunks[0]);

    let mut spans = vec![Span::styled("⌕ ", Theme::accent())];
    if editing {
        let (before, after) = search.split_at_cursor();
        spans.push(Span::styled(before.to_string(), Theme::input().fg(Theme::PRIMARY)));
        spans.push(Span::styled("│", Theme::accent()));
        spans.push(Span::styled(after.to_string(), Theme::input().fg(Theme::PRIMARY)));
    } else if search.query.is_empty() {
        spans.push(Span::styled(PLACEHOLDER, Theme::dimmed()));
        spans.push(Span::styled("  (press /)", Theme::dimmed()));
    } else {
        spans.push(Span::styled(search.query.clone(), Theme::input()));
    }

    let title = if pending { " SEARCH … " } else { " SEARCH " };
    let search_box = Paragraph::new(Line::from(spans)).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if editing {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(title, Theme::title())),
    );
    frame.render_widget(search_box, chunks[1]);
}
