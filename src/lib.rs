//! Redraws an arbitrary image using each of the 16,777,216 24-bit RGB colors exactly once
//!
//! Every pixel of a fitted source image, visited in a deterministic interleaved
//! order, receives the unused color whose luminance is closest to its own. The
//! output approximates the source's luminance pattern while forming a bijection
//! with the full RGB color space.

#![forbid(unsafe_code)]

/// Color pool, traversal order and the synthesis executor
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Color identity and luminance
pub mod math;
/// Canvas shape selection and source fitting
pub mod spatial;

pub use algorithm::executor::{SynthesisConfig, Synthesizer, synthesize};
pub use io::error::{Result, SynthesisError};
