//! Canvas shapes whose area equals the number of colors being placed

use crate::io::error::{Result, SynthesisError};
use std::fmt;

/// Canvas shape in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Aspect {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
}

/// Every canvas able to hold all 2^24 colors, narrowest first
pub const FULL_COLOR_ASPECTS: [Aspect; 5] = [
    Aspect::new(1024, 16384),
    Aspect::new(2048, 8192),
    Aspect::new(4096, 4096),
    Aspect::new(8192, 2048),
    Aspect::new(16384, 1024),
];

impl Aspect {
    /// Create a canvas shape
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height
    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Number of pixels on the canvas
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Dimensions as a `(width, height)` pair
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pick the candidate whose width/height ratio is closest to the source's
///
/// On an exact tie the candidate listed first wins.
///
/// # Errors
///
/// Returns an error if the source has a zero dimension or no candidates are given
pub fn select_aspect(src_width: u32, src_height: u32, candidates: &[Aspect]) -> Result<Aspect> {
    if src_width == 0 || src_height == 0 {
        return Err(SynthesisError::InvalidSourceData {
            reason: format!("Source image has zero size ({src_width}x{src_height})"),
        });
    }

    let source_ratio = f64::from(src_width) / f64::from(src_height);
    let mut best: Option<(f64, Aspect)> = None;

    for &candidate in candidates {
        let distance = (source_ratio - candidate.ratio()).abs();
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, candidate));
        }
    }

    best.map(|(_, aspect)| aspect)
        .ok_or_else(|| SynthesisError::InvalidSourceData {
            reason: "No canvas shapes to choose from".to_string(),
        })
}
