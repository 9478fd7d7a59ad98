//! Trending strip
//!
//! One line of ranked search terms. Only rendered when there are entries.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::TrendingState;
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, trending: &TrendingState, focused: bool) {
    let mut spans = Vec::with_capacity(trending.entries.len() * 3);
    for (i, entry) in trending.entries.iter().enumerate() {
        let selected = focused && i == trending.list.selected;
        spans.push(Span::styled(format!(" {} ", i + 1), Theme::rank()));
        spans.push(Span::styled(
            entry.search_term.clone(),
            if selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ));
        spans.push(Span::styled(format!(" ×{}  ", entry.count), Theme::dimmed()));
    }

    let strip = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(" ⚡ TRENDING ", Theme::title())),
    );
    frame.render_widget(strip, area);
}
