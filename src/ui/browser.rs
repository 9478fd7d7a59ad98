//! Movie list view
//!
//! Shows the listing for the committed term, or the popular listing when the
//! term is empty. Loading, failure and empty results each get their own
//! placeholder.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{LoadingState, SearchState};
use crate::models::{rating_str, Movie};
use crate::ui::Theme;

/// Title of the list panel for a committed term
pub fn list_title(search: &SearchState) -> String {
    match search.committed.as_deref() {
        Some(term) if !term.is_empty() => format!(" RESULTS FOR \"{}\" ", term),
        _ => " POPULAR ".to_string(),
    }
}

/// Render the movie list
pub fn render(frame: &mut Frame, area: Rect, search: &mut SearchState, focused: bool) {
    let mut title = list_title(search);
    if !search.results.is_empty() && !search.loading.is_loading() {
        title = format!("{}({}/{}) ", title, search.list.selected + 1, search.results.len());
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let placeholder = match &search.loading {
        LoadingState::Loading => Some(Paragraph::new("⟳ Loading movies...").style(Theme::loading())),
        LoadingState::Error(msg) => Some(Paragraph::new(msg.clone()).style(Theme::error())),
        LoadingState::Idle if search.results.is_empty() => {
            Some(Paragraph::new("No movies found").style(Theme::dimmed()))
        }
        LoadingState::Idle => None,
    };
    if let Some(placeholder) = placeholder {
        frame.render_widget(placeholder.alignment(Alignment::Center), inner);
        return;
    }

    let visible_height = inner.height as usize;
    search.list.scroll_into_view(visible_height);

    let items: Vec<ListItem> = search
        .results
        .iter()
        .enumerate()
        .skip(search.list.offset)
        .take(visible_height)
        .map(|(i, movie)| movie_item(movie, i == search.list.selected))
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), inner);
}

/// Format: ▸ Title (Year)  ★ 8.5  EN
fn movie_item(movie: &Movie, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let year = movie.year().map(|y| format!(" ({})", y)).unwrap_or_default();
    let language = movie
        .original_language
        .as_deref()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "N/A".to_string());

    ListItem::new(Line::from(vec![
        Span::styled(
            marker,
            if is_selected {
                Theme::accent()
            } else {
                Theme::dimmed()
            },
        ),
        Span::styled(
            movie.title.clone(),
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
        Span::styled(year, Theme::year()),
        Span::raw("  "),
        Span::styled(
            format!("★ {}", rating_str(movie.vote_average)),
            Theme::rating(movie.vote_average),
        ),
        Span::raw("  "),
        Span::styled(language, Theme::dimmed()),
    ]))
}
