//! Color identity and integer luminance estimation

use image::Rgb;
use std::fmt;

/// Number of distinct integer luminance values
pub const LUMINANCE_LEVELS: usize = 256;

/// Number of colors representable with 8 bits per RGB channel
pub const TOTAL_COLORS: usize = 1 << 24;

/// A single 24-bit RGB color
///
/// Identity is the `(r, g, b)` triple; within one pool every color is unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Rebuild a color from its packed `0xRRGGBB` index
    pub const fn from_index(index: u32) -> Self {
        Self {
            r: (index >> 16) as u8,
            g: (index >> 8) as u8,
            b: index as u8,
        }
    }

    /// Pack the color into a `0xRRGGBB` index in `0..TOTAL_COLORS`
    pub const fn index(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Integer luminance of this color
    pub const fn luminance(self) -> u8 {
        luminance(self.r, self.g, self.b)
    }

    /// Channels as a byte triple
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Self(color.to_bytes())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Brightness estimate `round(0.3r + 0.59g + 0.11b)`
///
/// Computed in integer hundredths so that exact halves always round up,
/// independent of floating point representation. The result is in `0..=255`.
pub const fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 30 * r as u32 + 59 * g as u32 + 11 * b as u32;
    ((weighted + 50) / 100) as u8
}

/// Iterate every 24-bit color in `(r, g, b)` lexicographic order
pub fn all_colors() -> impl Iterator<Item = Color> {
    (0..TOTAL_COLORS as u32).map(Color::from_index)
}
