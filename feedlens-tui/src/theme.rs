//! Dark dashboard theme tokens.
//!
//! # Color Palette
//! - **Background**: deep navy (base layer)
//! - **Accent**: teal (focus, highlights), matches the positive slice
//! - **Positive / Negative / Neutral**: the sentiment slice colors
//! - **Warning**: amber (refusals, discarded imports)
//! - **Muted**: slate (hints, disabled text)

use ratatui::style::{Color, Modifier, Style};

use feedlens_core::chart::Rgb;

pub const BACKGROUND: Color = Color::Rgb(15, 17, 26);
pub const ACCENT: Color = Color::Rgb(0, 212, 170);
pub const POSITIVE: Color = Color::Rgb(0, 184, 148);
pub const NEGATIVE: Color = Color::Rgb(255, 107, 107);
pub const NEUTRAL: Color = Color::Rgb(116, 185, 255);
pub const WARNING: Color = Color::Rgb(255, 171, 64);
pub const MUTED: Color = Color::Rgb(112, 128, 144);
pub const TEXT: Color = Color::Rgb(224, 224, 224);

/// Core colors are plain RGB triples.
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
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
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_maps_to_terminal_color() {
        assert_eq!(color(Rgb(0, 212, 170)), ACCENT);
        assert_eq!(color(Rgb::WHITE), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn focus_changes_border() {
        assert_ne!(panel_border(true), panel_border(false));
        assert!(panel_title(true).add_modifier.contains(Modifier::BOLD));
    }
}
