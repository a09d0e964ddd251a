//! FILENAME: core/engine/src/style.rs
//! PURPOSE: Color math and alignment types used to annotate report cells.
//! CONTEXT: Presentation in a report is limited to a background color and an
//! alignment per cell. Colors travel through row metadata as `#RRGGBB`
//! strings; this module converts between those strings and `Color`, and
//! computes the red-to-green ramp used by the spectrum colorizer.

use serde::{Deserialize, Serialize};

use crate::number_format::starts_with_number;

/// Text alignment options for cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TextAlign {
    #[default]
    General, // Renderer default (right-aligned numbers)
    Left,
}

impl TextAlign {
    /// Numbers keep the renderer default; anything else is left-aligned.
    pub fn for_text(text: &str) -> Self {
        if starts_with_number(text.trim_matches('*')) {
            TextAlign::General
        } else {
            TextAlign::Left
        }
    }

    /// CSS value, or None for `General` (left to the renderer's default).
    pub fn to_css(&self) -> Option<&'static str> {
        match self {
            TextAlign::General => None,
            TextAlign::Left => Some("left"),
        }
    }
}

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const fn black() -> Self {
        Color::new(0, 0, 0)
    }

    pub const fn white() -> Self {
        Color::new(255, 255, 255)
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse from hex string ("#F00", "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Some(Color::new(r * 17, g * 17, b * 17))
            }
            6 => Some(Color::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    /// Maps a score in [0, 1] onto a red -> yellow -> green ramp.
    /// 0 is pure red, 0.5 is yellow, 1 is pure green. Blue is always 0.
    pub fn between_red_and_green(score: f64) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        let value = score * 510.0;

        if value < 255.0 {
            let green = (value.sqrt() * 16.0) as u8;
            Color::new(255, green, 0)
        } else {
            let over = value - 255.0;
            let red = (255.0 - over * over / 255.0) as u8;
            Color::new(red, 255, 0)
        }
    }

    /// Linear blend toward `other`. `amount` 0 keeps self, 1 yields `other`.
    /// Channels round half to even.
    pub fn mix(&self, other: Color, amount: f64) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let blend = |from: u8, to: u8| -> u8 {
            let v = from as f64 * (1.0 - amount) + to as f64 * amount;
            v.round_ties_even().clamp(0.0, 255.0) as u8
        };

        Color::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    pub fn lighten(&self, amount: f64) -> Self {
        self.mix(Color::white(), amount)
    }

    pub fn darken(&self, amount: f64) -> Self {
        self.mix(Color::black(), amount)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        let red = Color::new(255, 0, 0);
        assert_eq!(red.to_hex(), "#FF0000");
        assert_eq!(Color::new(0xab, 0x0c, 0x01).to_hex(), "#AB0C01");
    }

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex("#FF0000").unwrap();
        assert_eq!(color.r, 255);
        assert_eq!(color.g, 0);
        assert_eq!(color.b, 0);

        let color2 = Color::from_hex("00FF00").unwrap();
        assert_eq!(color2.g, 255);

        assert_eq!(Color::from_hex("#CFF"), Some(Color::new(0xCC, 0xFF, 0xFF)));
        assert_eq!(Color::from_hex("#FF000080"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::from_hex("#12345"), None);
    }

    #[test]
    fn test_red_green_ramp_endpoints() {
        assert_eq!(Color::between_red_and_green(0.0), Color::new(255, 0, 0));
        assert_eq!(Color::between_red_and_green(0.5), Color::new(255, 255, 0));
        assert_eq!(Color::between_red_and_green(1.0), Color::new(0, 255, 0));
    }

    #[test]
    fn test_red_green_ramp_midpoints() {
        // 0.25 * 510 = 127.5, sqrt * 16 = 180.66
        assert_eq!(Color::between_red_and_green(0.25), Color::new(255, 180, 0));
        // 0.75 * 510 = 382.5, 255 - 127.5^2 / 255 = 191.25
        assert_eq!(Color::between_red_and_green(0.75), Color::new(191, 255, 0));
    }

    #[test]
    fn test_lighten_toward_white() {
        assert_eq!(
            Color::between_red_and_green(1.0).lighten(0.6).to_hex(),
            "#99FF99"
        );
        assert_eq!(
            Color::between_red_and_green(0.0).lighten(0.6).to_hex(),
            "#FF9999"
        );
        assert_eq!(Color::white().darken(1.0), Color::black());
    }

    #[test]
    fn test_text_align_css() {
        assert_eq!(TextAlign::General.to_css(), None);
        assert_eq!(TextAlign::Left.to_css(), Some("left"));
    }

    #[test]
    fn test_text_align_for_text() {
        assert_eq!(TextAlign::for_text("10.00 ns"), TextAlign::General);
        assert_eq!(TextAlign::for_text("**12 B**"), TextAlign::General);
        assert_eq!(TextAlign::for_text("Foo"), TextAlign::Left);
        assert_eq!(TextAlign::for_text("-"), TextAlign::Left);
    }
}
