//! Movie detail overlay
//!
//! Pure rendering of an [`OpenModal`]. While the detail request is in flight
//! only a spinner is shown; afterwards every field is listed, with a
//! placeholder for anything TMDB left empty. A failed request renders the
//! same layout with the listing-level fields and placeholders elsewhere.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::OpenModal;
use crate::models::{format_money, rating_str, MovieDetail};
use crate::ui::{centered_rect, Theme};

const NOT_AVAILABLE: &str = "N/A";

/// Draw the overlay. The stored scroll offset is clamped to the text.
pub fn render(frame: &mut Frame, area: Rect, modal: &mut OpenModal) {
    let popup = centered_rect(80, 80, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(" DETAILS ", Theme::title()))
        .title_bottom(Line::from(Span::styled(" ESC/q/x close ", Theme::dimmed())).right_aligned())
        .style(Style::default().bg(Theme::BACKGROUND));

    if modal.loading {
        let spinner = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("⟳ Loading details...", Theme::loading())),
            Line::from(""),
            Line::from(Span::styled(modal.movie.title.clone(), Theme::dimmed())),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(spinner, popup);
        return;
    }

    let lines = match &modal.detail {
        Some(detail) => detail_lines(detail),
        None => detail_lines(&MovieDetail::from(&modal.movie)),
    };
    modal.scroll = modal.scroll.min(max_scroll(&lines));
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((modal.scroll, 0))
        .block(block);
    frame.render_widget(body, popup);
}

/// Last offset that still shows a line of text
fn max_scroll(lines: &[Line]) -> u16 {
    u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
}

fn placeholder(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Theme::dimmed())
}

fn field(label: &str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<22}", label), Theme::label()),
        value,
    ])
}

fn joined_or(items: &[String], empty: &str) -> Span<'static> {
    if items.is_empty() {
        placeholder(empty)
    } else {
        Span::styled(items.join(" • "), Theme::text())
    }
}

fn money_or_na(amount: u64) -> Span<'static> {
    if amount == 0 {
        placeholder(NOT_AVAILABLE)
    } else {
        Span::styled(format_money(amount), Theme::text())
    }
}

/// Text of the loaded overlay
pub fn detail_lines(detail: &MovieDetail) -> Vec<Line<'static>> {
    let year = detail
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let language = detail
        .original_language
        .clone()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut meta = vec![
        Span::styled(format!("★ {}", rating_str(detail.vote_average)), Theme::rating(detail.vote_average)),
        Span::styled(" • ", Theme::dimmed()),
        Span::styled(language, Theme::text()),
        Span::styled(" • ", Theme::dimmed()),
        Span::styled(year, Theme::year()),
    ];
    if let Some(runtime) = detail.runtime.filter(|r| *r > 0) {
        meta.push(Span::styled(" • ", Theme::dimmed()));
        meta.push(Span::styled(format!("{}h {}m", runtime / 60, runtime % 60), Theme::text()));
    }

    let mut lines = vec![
        Line::from(Span::styled(detail.title.clone(), Theme::title())),
        Line::from(meta),
        Line::from(""),
    ];

    let mut genres = if detail.genres.is_empty() {
        vec![placeholder(NOT_AVAILABLE)]
    } else {
        detail
            .genres
            .iter()
            .map(|g| Span::styled(format!("[{}] ", g), Theme::secondary()))
            .collect()
    };
    if let Some(homepage) = &detail.homepage {
        genres.push(Span::styled(format!("  → {}", homepage), Theme::accent()));
    }
    lines.push(Line::from(
        std::iter::once(Span::styled(format!("{:<22}", "Genres"), Theme::label()))
            .chain(genres)
            .collect::<Vec<_>>(),
    ));

    let overview = if detail.overview.trim().is_empty() {
        placeholder("No overview available.")
    } else {
        Span::styled(detail.overview.clone(), Theme::text())
    };
    lines.push(field("Overview", overview));

    let release = detail
        .release_date_long()
        .map(|d| Span::styled(d, Theme::text()))
        .unwrap_or_else(|| placeholder(NOT_AVAILABLE));
    lines.push(field("Release date", release));

    lines.push(field(
        "Countries",
        joined_or(&detail.production_countries, "No countries available"),
    ));

    let status = detail
        .status
        .clone()
        .map(|s| Span::styled(s, Theme::text()))
        .unwrap_or_else(|| placeholder(NOT_AVAILABLE));
    lines.push(field("Status", status));

    lines.push(field("Language", joined_or(&detail.spoken_languages, NOT_AVAILABLE)));
    lines.push(field("Budget", money_or_na(detail.budget)));
    lines.push(field("Revenue", money_or_na(detail.revenue)));

    let tagline = detail
        .tagline
        .as_ref()
        .map(|t| Span::styled(format!("\"{}\"", t), Theme::text()))
        .unwrap_or_else(|| placeholder("No tagline available"));
    lines.push(field("Tagline", tagline));

    lines.push(field(
        "Production Companies",
        joined_or(&detail.production_companies, "No companies available"),
    ));

    if let Some(poster) = detail.poster_url() {
        lines.push(field("Poster", Span::styled(poster, Theme::dimmed())));
    }

    lines
}
