//! Color math primitives.
//!
//! Every operation comes in two flavors: a fallible `try_*` / [`Rgb`] form
//! that returns [`ColorError`], and a lossy string form that logs the error
//! and substitutes [`FALLBACK_HEX`]. The token engine uses the lossy form so
//! a single bad seed color degrades to black instead of aborting the theme.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Substituted for any color that fails to parse.
pub const FALLBACK_HEX: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("hex color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("hex color must have 3 or 6 digits: {0:?}")]
    InvalidLength(String),
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
    #[error("expected three space-separated channels: {0:?}")]
    ChannelCount(String),
    #[error("channel is not a number: {0:?}")]
    InvalidChannel(String),
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let trimmed = hex.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(ColorError::MissingHash(hex.to_string()));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(hex.to_string()));
        }
        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorError::InvalidLength(hex.to_string())),
        };
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|_| ColorError::InvalidDigit(hex.to_string()))?;
        Ok(Self::new(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        ))
    }

    /// Parse, logging and falling back to black on failure.
    pub fn from_hex_lossy(hex: &str) -> Self {
        match Self::from_hex(hex) {
            Ok(rgb) => rgb,
            Err(err) => {
                tracing::error!(%err, fallback = FALLBACK_HEX, "invalid hex color");
                Self::BLACK
            }
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shift every channel by `round(2.55 * percent)`, percent clamped to
    /// [-100, 100] and channels clamped to [0, 255].
    pub fn adjust(self, percent: f64) -> Self {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(-100.0, 100.0)
        };
        let offset = round_half_up(2.55 * percent) as i32;
        let shift = |c: u8| (i32::from(c) + offset).clamp(0, 255) as u8;
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }

    /// Linear blend: `self * weight + other * (1 - weight)`, weight clamped
    /// to [0, 1].
    pub fn mix(self, other: Self, weight: f64) -> Self {
        let weight = if weight.is_nan() {
            0.5
        } else {
            weight.clamp(0.0, 1.0)
        };
        let blend = |a: u8, b: u8| {
            round_half_up(f64::from(a) * weight + f64::from(b) * (1.0 - weight)).clamp(0.0, 255.0)
                as u8
        };
        Self::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    /// Rec. 709 luma on the 0–255 scale.
    pub fn luma(self) -> f64 {
        0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b)
    }

    /// Luma below 128. This is the only contrast heuristic; there is no
    /// WCAG ratio check, so mid-gray bases can get low-contrast text.
    pub fn is_dark(self) -> bool {
        self.luma() < 128.0
    }
}

/// `"R G B"`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

/// Parses `"R G B"`. Channels are rounded and clamped to [0, 255].
impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [r, g, b] = tokens.as_slice() else {
            return Err(ColorError::ChannelCount(s.to_string()));
        };
        let channel = |token: &str| -> Result<u8, ColorError> {
            let value: f64 = token
                .parse()
                .map_err(|_| ColorError::InvalidChannel(token.to_string()))?;
            if !value.is_finite() {
                return Err(ColorError::InvalidChannel(token.to_string()));
            }
            Ok(round_half_up(value).clamp(0.0, 255.0) as u8)
        };
        Ok(Self::new(channel(*r)?, channel(*g)?, channel(*b)?))
    }
}

/// Halves round toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub fn try_normalize_hex(hex: &str) -> Result<String, ColorError> {
    Rgb::from_hex(hex).map(Rgb::to_hex)
}

/// Lowercase `#rrggbb`, expanding `#rgb`. Invalid input yields `#000000`.
pub fn normalize_hex(hex: &str) -> String {
    Rgb::from_hex_lossy(hex).to_hex()
}

pub fn try_hex_to_rgb(hex: &str) -> Result<String, ColorError> {
    Rgb::from_hex(hex).map(|rgb| rgb.to_string())
}

/// `"#3b82f6"` → `"59 130 246"`.
pub fn hex_to_rgb(hex: &str) -> String {
    Rgb::from_hex_lossy(hex).to_string()
}

pub fn try_rgb_to_hex(rgb: &str) -> Result<String, ColorError> {
    rgb.parse::<Rgb>().map(Rgb::to_hex)
}

/// `"59 130 246"` → `"#3b82f6"`. Malformed input yields `#000000`.
pub fn rgb_to_hex(rgb: &str) -> String {
    match try_rgb_to_hex(rgb) {
        Ok(hex) => hex,
        Err(err) => {
            tracing::error!(%err, fallback = FALLBACK_HEX, "invalid rgb triplet");
            FALLBACK_HEX.to_string()
        }
    }
}

pub fn adjust_brightness(hex: &str, percent: f64) -> String {
    Rgb::from_hex_lossy(hex).adjust(percent).to_hex()
}

pub fn mix_hex(color1: &str, color2: &str, weight: f64) -> String {
    Rgb::from_hex_lossy(color1)
        .mix(Rgb::from_hex_lossy(color2), weight)
        .to_hex()
}

pub fn is_dark_color(hex: &str) -> bool {
    Rgb::from_hex_lossy(hex).is_dark()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_short_and_long_form() {
        assert_eq!(normalize_hex("#ABC"), "#aabbcc");
        assert_eq!(normalize_hex("#3B82F6"), "#3b82f6");
        assert_eq!(normalize_hex("  #fff "), "#ffffff");
    }

    #[test]
    fn invalid_hex_falls_back_to_black() {
        assert_eq!(normalize_hex("3b82f6"), FALLBACK_HEX);
        assert_eq!(normalize_hex("#3b82f"), FALLBACK_HEX);
        assert_eq!(normalize_hex("#ggg"), FALLBACK_HEX);
        assert_eq!(normalize_hex(""), FALLBACK_HEX);
        assert_eq!(hex_to_rgb("nope"), "0 0 0");
    }

    #[test]
    fn reports_why_parsing_failed() {
        assert!(matches!(try_normalize_hex("fff"), Err(ColorError::MissingHash(_))));
        assert!(matches!(try_normalize_hex("#ffff"), Err(ColorError::InvalidLength(_))));
        assert!(matches!(try_normalize_hex("#zzzzzz"), Err(ColorError::InvalidDigit(_))));
        assert!(matches!(try_normalize_hex("#ééé"), Err(ColorError::InvalidDigit(_))));
    }

    #[test]
    fn hex_to_rgb_splits_channels() {
        assert_eq!(hex_to_rgb("#3b82f6"), "59 130 246");
        assert_eq!(hex_to_rgb("#09090b"), "9 9 11");
        assert_eq!(hex_to_rgb("#fff"), "255 255 255");
    }

    #[test]
    fn rgb_hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#3b82f6", "#09090b", "#a855f7", "#123456"] {
            assert_eq!(rgb_to_hex(&hex_to_rgb(hex)), hex);
        }
        assert_eq!(rgb_to_hex(&hex_to_rgb("#ABCDEF")), "#abcdef");
    }

    #[test]
    fn rgb_to_hex_clamps_and_rejects() {
        assert_eq!(rgb_to_hex("300 -5 16"), "#ff0010");
        assert_eq!(rgb_to_hex("1 2"), FALLBACK_HEX);
        assert_eq!(rgb_to_hex("1 2 3 4"), FALLBACK_HEX);
        assert_eq!(rgb_to_hex("a b c"), FALLBACK_HEX);
        assert_eq!(rgb_to_hex("NaN 0 0"), FALLBACK_HEX);
        assert!(matches!(try_rgb_to_hex("1,2,3"), Err(ColorError::ChannelCount(_))));
    }

    #[test]
    fn zero_adjustment_is_identity() {
        for hex in ["#3b82f6", "#ABC", "#09090b"] {
            assert_eq!(adjust_brightness(hex, 0.0), normalize_hex(hex));
        }
    }

    #[test]
    fn adjusts_brightness_with_clamping() {
        assert_eq!(adjust_brightness("#808080", 20.0), "#b3b3b3");
        assert_eq!(adjust_brightness("#808080", -20.0), "#4d4d4d");
        assert_eq!(adjust_brightness("#000000", -20.0), "#000000");
        assert_eq!(adjust_brightness("#f0f0f0", 40.0), "#ffffff");
        // Out-of-range percentages clamp to +/-100.
        assert_eq!(adjust_brightness("#123456", 500.0), "#ffffff");
        assert_eq!(adjust_brightness("#123456", -500.0), "#000000");
    }

    #[test]
    fn mix_weight_boundaries() {
        let (a, b) = ("#3b82f6", "#EF4444");
        assert_eq!(mix_hex(a, b, 1.0), normalize_hex(a));
        assert_eq!(mix_hex(a, b, 0.0), normalize_hex(b));
        assert_eq!(mix_hex(a, b, 7.0), normalize_hex(a));
        assert_eq!(mix_hex(a, b, -3.0), normalize_hex(b));
    }

    #[test]
    fn mix_interpolates_per_channel() {
        assert_eq!(mix_hex("#ff0000", "#0000ff", 0.5), "#800080");
        assert_eq!(mix_hex("#000000", "#ffffff", 0.75), "#404040");
    }

    #[test]
    fn darkness_classification() {
        assert!(is_dark_color("#000000"));
        assert!(!is_dark_color("#ffffff"));
        assert!(is_dark_color("#1d4ed8"));
        assert!(!is_dark_color("#fde047"));
    }

    #[test]
    fn triplet_display_and_parse() {
        let rgb = Rgb::new(59, 130, 246);
        assert_eq!(rgb.to_string(), "59 130 246");
        assert_eq!("59 130 246".parse::<Rgb>().unwrap(), rgb);
        assert_eq!(" 59   130 246 ".parse::<Rgb>().unwrap(), rgb);
        assert_eq!("0.4 254.6 12".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 12));
    }
}
