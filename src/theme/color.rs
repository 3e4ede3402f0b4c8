//! RGBA color value and its hex string codec

use std::fmt;

/// A color with four 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgba {
    pub const OPAQUE_BLACK: Rgba = Rgba::argb(0xFF, 0, 0, 0);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    /// Encode as eight uppercase hex digits in `AARRGGBB` order
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }

    /// Decode a hex color.
    ///
    /// Anything that is not alphanumeric is stripped first, so `#ff8800` and
    /// `ff-88-00` are both accepted. Three digits are a 12-bit RGB value, six
    /// are RGB and eight are ARGB; RGB forms are fully opaque. Every other
    /// input decodes to opaque black.
    pub fn from_hex(value: &str) -> Self {
        let digits: String = value.chars().filter(|c| c.is_alphanumeric()).collect();
        let Ok(packed) = u32::from_str_radix(&digits, 16) else {
            return Self::OPAQUE_BLACK;
        };
        let channel = |shift: u32| ((packed >> shift) & 0xFF) as u8;
        let nibble = |shift: u32| ((packed >> shift) & 0x0F) as u8 * 17;

        match digits.len() {
            3 => Self::rgb(nibble(8), nibble(4), nibble(0)),
            6 => Self::rgb(channel(16), channel(8), channel(0)),
            8 => Self::argb(channel(24), channel(16), channel(8), channel(0)),
            _ => Self::OPAQUE_BLACK,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
