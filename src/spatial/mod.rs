//! Canvas geometry
//!
//! This module contains the mapping of an arbitrary source onto a canvas:
//! - Canvas shape selection by closest aspect ratio
//! - Resizing to cover and aligned cropping

/// Canvas shapes and aspect ratio matching
pub mod aspect;
/// Resize and crop of the source onto the canvas
pub mod fit;

pub use aspect::{Aspect, FULL_COLOR_ASPECTS, select_aspect};
pub use fit::{Alignment, fit_and_crop};
