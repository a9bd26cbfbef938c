//! Fixed dashboard palettes. Not user-configurable.

use super::color::{Gradient, GradientDirection, Rgb};

/// Sentiment slices: (gradient top, gradient bottom, border).
pub const POSITIVE: (Rgb, Rgb, Rgb) = (
    Rgb(0x00, 0xd4, 0xaa),
    Rgb(0x00, 0xb8, 0x94),
    Rgb(0x00, 0xb8, 0x94),
);
pub const NEGATIVE: (Rgb, Rgb, Rgb) = (
    Rgb(0xff, 0x6b, 0x6b),
    Rgb(0xee, 0x5a, 0x52),
    Rgb(0xee, 0x5a, 0x52),
);
pub const NEUTRAL: (Rgb, Rgb, Rgb) = (
    Rgb(0x74, 0xb9, 0xff),
    Rgb(0x09, 0x84, 0xe3),
    Rgb(0x09, 0x84, 0xe3),
);

/// Theme bars cycle through these pairs by position.
pub const THEME_PAIRS: [(Rgb, Rgb); 4] = [
    (Rgb(0x66, 0x7e, 0xea), Rgb(0x76, 0x4b, 0xa2)), // purple-blue
    (Rgb(0xf0, 0x93, 0xfb), Rgb(0xf5, 0x57, 0x6c)), // pink-red
    (Rgb(0x4f, 0xac, 0xfe), Rgb(0x00, 0xf2, 0xfe)), // blue-cyan
    (Rgb(0x43, 0xe9, 0x7b), Rgb(0x38, 0xf9, 0xd7)), // green-teal
];

/// Shared fill for every top-word bar.
pub const WORD_STOPS: [Rgb; 3] = [
    Rgb(0x00, 0xd4, 0xaa),
    Rgb(0x00, 0xb8, 0x94),
    Rgb(0x00, 0xa0, 0x85),
];
pub const WORD_BORDER: Rgb = Rgb(0x00, 0xd4, 0xaa);

/// Text colors.
pub const LABEL_TEXT: Rgb = Rgb(0xe0, 0xe0, 0xe0);
pub const TICK_TEXT: Rgb = Rgb(0xa0, 0xa0, 0xa0);

/// Gradient for the theme bar at `position`; period 4.
pub fn theme_gradient(position: usize) -> Gradient {
    let (from, to) = THEME_PAIRS[position % THEME_PAIRS.len()];
    Gradient::two_stop(GradientDirection::Horizontal, from, to)
}

pub fn word_gradient() -> Gradient {
    Gradient::even(GradientDirection::Horizontal, &WORD_STOPS)
}

/// Vertical two-stop gradient for a sentiment slice.
pub fn sentiment_gradient(entry: (Rgb, Rgb, Rgb)) -> Gradient {
    Gradient::two_stop(GradientDirection::Vertical, entry.0, entry.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_palette_wraps_after_four() {
        assert_eq!(theme_gradient(0), theme_gradient(4));
        assert_eq!(theme_gradient(3), theme_gradient(7));
        assert_ne!(theme_gradient(0), theme_gradient(1));
    }

    #[test]
    fn sentiment_entries_are_distinct() {
        let all = [POSITIVE, NEGATIVE, NEUTRAL];
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(sentiment_gradient(all[i]), sentiment_gradient(all[j]));
            }
        }
    }
}
