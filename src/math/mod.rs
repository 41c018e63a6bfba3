//! Color arithmetic shared by the pool and the synthesis pipeline

/// Color identity and integer luminance
pub mod luminance;

pub use luminance::{Color, LUMINANCE_LEVELS, TOTAL_COLORS, luminance};
