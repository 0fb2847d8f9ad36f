use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::extensions::easing::lerp;

/// 8-bit RGB colour. Interpolated per channel, the way SVG fill transitions blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const CYAN: Rgb = Rgb::new(0x00, 0xff, 0xff);
    pub const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb`, or one of the few CSS names the UI uses.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "red" => return Ok(Self::RED),
            "cyan" | "aqua" => return Ok(Self::CYAN),
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }

        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        match hex.len() {
            3 => {
                // #0ff -> #00ffff
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => Err(invalid()),
        }
    }

    /// Blend towards `other` by `t` in [0, 1].
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| lerp(a as f32, b as f32, t).round().clamp(0.0, 255.0) as u8;
        Rgb::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }

    /// `rgb(r, g, b)` CSS form.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_hex() {
        assert_eq!(Rgb::parse("#0ff").unwrap(), Rgb::CYAN);
    }

    #[test]
    fn parses_long_hex_and_names() {
        assert_eq!(Rgb::parse("#ff0000").unwrap(), Rgb::RED);
        assert_eq!(Rgb::parse("red").unwrap(), Rgb::RED);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Rgb::parse("0ff").is_err());
        assert!(Rgb::parse("#12345").is_err());
        assert!(Rgb::parse("#zzz").is_err());
    }

    #[test]
    fn mix_endpoints_and_midpoint() {
        assert_eq!(Rgb::CYAN.mix(Rgb::RED, 0.0), Rgb::CYAN);
        assert_eq!(Rgb::CYAN.mix(Rgb::RED, 1.0), Rgb::RED);
        let mid = Rgb::BLACK.mix(Rgb::WHITE, 0.5);
        assert_eq!(mid, Rgb::new(128, 128, 128));
    }

    #[test]
    fn css_output() {
        assert_eq!(Rgb::RED.to_css(), "rgb(255, 0, 0)");
    }
}
