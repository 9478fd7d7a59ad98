//! Neon theme for ReelTUI
//!
//! Color palette and style helpers shared by every component.

use ratatui::style::{Color, Modifier, Style};

/// Neon color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0a0a0f (deep black-blue)
    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0f);

    /// Primary: #00fff2 (cyan neon)
    pub const PRIMARY: Color = Color::Rgb(0x00, 0xff, 0xf2);

    /// Secondary: #ff00ff (magenta)
    pub const SECONDARY: Color = Color::Rgb(0xff, 0x00, 0xff);

    /// Accent: #ffff00 (yellow)
    pub const ACCENT: Color = Color::Rgb(0xff, 0xff, 0x00);

    /// Highlight: #ff0080 (hot pink)
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0x00, 0x80);

    pub const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
    pub const DIM: Color = Color::Rgb(0x60, 0x60, 0x78);
    pub const SUCCESS: Color = Color::Rgb(0x00, 0xff, 0x00);
    pub const WARNING: Color = Color::Rgb(0xff, 0xaa, 0x00);
    pub const ERROR: Color = Color::Rgb(0xff, 0x00, 0x40);

    /// Panels and the status bar
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x14, 0x14, 0x1e);

    /// Border color (dim cyan)
    pub const BORDER: Color = Color::Rgb(0x00, 0x80, 0x78);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Logo second half and year tags
    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border (glowing effect)
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected list row
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Field labels in the detail overlay
    pub fn label() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Trending rank numbers
    pub fn rank() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    /// Rating color by score: green from 7.5, orange from 6, dim from 4,
    /// red below. Unrated movies are dim.
    pub fn rating(vote_average: f32) -> Style {
        let color = if vote_average <= 0.0 {
            Self::DIM
        } else if vote_average >= 7.5 {
            Self::SUCCESS
        } else if vote_average >= 6.0 {
            Self::WARNING
        } else if vote_average >= 4.0 {
            Self::DIM
        } else {
            Self::ERROR
        };
        Style::default().fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Theme::rating(8.1).fg, Some(Theme::SUCCESS));
        assert_eq!(Theme::rating(7.5).fg, Some(Theme::SUCCESS));
        assert_eq!(Theme::rating(6.4).fg, Some(Theme::WARNING));
        assert_eq!(Theme::rating(4.2).fg, Some(Theme::DIM));
        assert_eq!(Theme::rating(2.0).fg, Some(Theme::ERROR));
        assert_eq!(Theme::rating(0.0).fg, Some(Theme::DIM));
    }

    #[test]
    fn test_selected_row_is_inverted() {
        let style = Theme::list_item_selected();
        assert_eq!(style.fg, Some(Theme::BACKGROUND));
        assert_eq!(style.bg, Some(Theme::PRIMARY));
    }
}
