//! Colors and linear gradients used by chart specs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Rgb::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{hex}'")))
    }
}

/// Axis a gradient runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
}

/// A single stop: `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgb,
}

/// Linear gradient with ordered stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub direction: GradientDirection,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    /// Two stops at 0 and 1.
    pub fn two_stop(direction: GradientDirection, from: Rgb, to: Rgb) -> Self {
        Self {
            direction,
            stops: vec![
                ColorStop { offset: 0.0, color: from },
                ColorStop { offset: 1.0, color: to },
            ],
        }
    }

    /// Stops spread evenly over `[0, 1]`.
    pub fn even(direction: GradientDirection, colors: &[Rgb]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| ColorStop {
                offset: i as f32 / last,
                color,
            })
            .collect();
        Self { direction, stops }
    }

    /// Sample the gradient at `t`. Values outside the stop range take the
    /// nearest end color.
    pub fn color_at(&self, t: f32) -> Rgb {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Rgb::WHITE,
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.offset && t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        last.color
    }

    /// First stop color, used where only a flat color can be drawn.
    pub fn start(&self) -> Rgb {
        self.stops.first().map(|s| s.color).unwrap_or(Rgb::WHITE)
    }
}
