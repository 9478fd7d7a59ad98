//! Status bar

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode, ModalPhase};
use crate::ui::Theme;

/// Key hints for the current mode
pub fn hints(app: &App) -> &'static str {
    match (app.modal.phase(), &app.input_mode) {
        (ModalPhase::OpenLoading | ModalPhase::OpenLoaded, _) => " ↑↓:scroll  ESC/q/x:close ",
        (ModalPhase::Closed, InputMode::Editing) => " type to search  ↵/ESC:done ",
        (ModalPhase::Closed, InputMode::Normal) if app.trending.is_visible() => {
            " q:quit  /:search  ↑↓:move  ↵:details  TAB:trending "
        }
        (ModalPhase::Closed, InputMode::Normal) => " q:quit  /:search  ↑↓:move  ↵:details ",
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let activity = if app.search.loading.is_loading() {
        Span::styled(" ⟳ fetching ", Theme::loading())
    } else if app.search.loading.is_error() {
        Span::styled(" ✗ offline ", Theme::error())
    } else {
        Span::styled(format!(" {} movies ", app.search.results.len()), Theme::dimmed())
    };

    let line = Line::from(vec![
        mode,
        activity,
        Span::raw("│"),
        Span::styled(hints(app), Theme::keybind()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}
