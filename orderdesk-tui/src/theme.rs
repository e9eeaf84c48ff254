//! Color tokens and style helpers for the order desk.
//!
//! Neon accents on a dark terminal:
//! - **Accent**: electric cyan (focus, highlights)
//! - **Positive**: neon green (saved, executed)
//! - **Negative**: hot pink (errors)
//! - **Warning**: neon orange (selection problems)
//! - **Neutral**: cool purple (labels, secondary info)
//! - **Muted**: steel blue (hints, unfocused borders)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Cursor row / active field.
pub fn selected() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

pub fn panel_border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_changes_border() {
        assert_eq!(panel_border(true).fg, Some(ACCENT));
        assert_eq!(panel_border(false).fg, Some(MUTED));
        assert!(panel_title(true).add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn selected_is_reversed_accent() {
        let style = selected();
        assert_eq!(style.fg, Some(ACCENT));
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }
}
