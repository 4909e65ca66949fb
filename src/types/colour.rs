//! Colour type and RGB332 conversion.

use std::fmt;

/// A 24-bit RGB colour value, as stored in a PNG palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Pack into the Next's 8-bit palette format.
    ///
    /// Keeps the top 3 bits of red (bits 5-7), the top 3 bits of green
    /// (bits 2-4) and the top 2 bits of blue (bits 0-1).
    pub const fn to_rgb332(self) -> u8 {
        (self.r & 0b1110_0000) | ((self.g & 0b1110_0000) >> 3) | ((self.b & 0b1100_0000) >> 6)
    }

    /// Expand an RGB332 byte back to 24-bit colour.
    ///
    /// Channel bits are replicated so that full intensity maps to 255.
    pub const fn from_rgb332(packed: u8) -> Self {
        let r = packed >> 5;
        let g = (packed >> 2) & 0b111;
        let b = packed & 0b11;
        Self {
            r: (r << 5) | (r << 2) | (r >> 1),
            g: (g << 5) | (g << 2) | (g >> 1),
            b: b * 0x55,
        }
    }

    /// Convert to an opaque RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
