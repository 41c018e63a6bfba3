//! Cropping a source image to a canvas ratio and resampling it onto the canvas

use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::spatial::aspect::Aspect;
use image::RgbImage;
use image::imageops::{self, FilterType};
use log::debug;

/// Which part of a source that overflows the canvas ratio survives the crop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Keep the top or left edge
    Start,
    /// Keep the middle
    #[default]
    Center,
    /// Keep the bottom or right edge
    End,
}

impl Alignment {
    /// Convert a command-line code: `-1` start, `0` center, `1` end
    ///
    /// # Errors
    ///
    /// Returns an error if the code is outside `-1..=1`
    pub fn from_code(code: i8) -> Result<Self> {
        match code {
            -1 => Ok(Self::Start),
            0 => Ok(Self::Center),
            1 => Ok(Self::End),
            _ => Err(invalid_parameter(
                "align",
                &code,
                &"alignment code must be -1, 0 or 1",
            )),
        }
    }

    /// Command-line code of this alignment
    pub const fn code(self) -> i8 {
        match self {
            Self::Start => -1,
            Self::Center => 0,
            Self::End => 1,
        }
    }

    /// Leading-edge offset of the kept window within `overflow` surplus pixels
    ///
    /// Centering floors the offset, so an odd leftover pixel is always cut
    /// from the trailing side rather than split by rounding.
    pub const fn offset(self, overflow: u32) -> u32 {
        match self {
            Self::Start => 0,
            Self::Center => overflow / 2,
            Self::End => overflow,
        }
    }
}

/// Region of the source with the canvas ratio, as `(x, y, width, height)`
///
/// The window spans the whole source along its constrained axis and is placed
/// by `align` along the overflowing one. Its length on the overflowing axis is
/// rounded to the nearest pixel and kept within `1..=` the source length.
pub fn crop_window(src: (u32, u32), aspect: Aspect, align: Alignment) -> (u32, u32, u32, u32) {
    let (src_width, src_height) = (u64::from(src.0), u64::from(src.1));
    let (dest_width, dest_height) = (
        u64::from(aspect.width.max(1)),
        u64::from(aspect.height.max(1)),
    );

    if src_width * dest_height >= src_height * dest_width {
        let width = ((2 * src_height * dest_width + dest_height) / (2 * dest_height))
            .clamp(1, src_width.max(1)) as u32;
        let x = align.offset(src.0.saturating_sub(width));
        (x, 0, width, src.1)
    } else {
        let height = ((2 * src_width * dest_height + dest_width) / (2 * dest_width))
            .clamp(1, src_height.max(1)) as u32;
        let y = align.offset(src.1.saturating_sub(height));
        (0, y, src.0, height)
    }
}

/// Crop `source` to the canvas ratio according to `align`, then resample it
/// to the canvas size
///
/// The result always has exactly the canvas dimensions, and no intermediate
/// image is larger than the source window or the canvas.
///
/// # Errors
///
/// Returns an error if the source or the canvas is empty
pub fn fit_and_crop(source: &RgbImage, aspect: Aspect, align: Alignment) -> Result<RgbImage> {
    let src = source.dimensions();
    if src.0 == 0 || src.1 == 0 {
        return Err(SynthesisError::InvalidSourceData {
            reason: "Source image has no pixels".to_string(),
        });
    }
    if aspect.area() == 0 {
        return Err(SynthesisError::InvalidSourceData {
            reason: format!("Canvas {aspect} has no pixels"),
        });
    }

    let (x, y, width, height) = crop_window(src, aspect, align);
    debug!("Cropping {width}x{height} at ({x}, {y}) with {align:?} alignment");
    let window = imageops::crop_imm(source, x, y, width, height).to_image();

    if window.dimensions() == aspect.dimensions() {
        return Ok(window);
    }

    debug!("Resizing {width}x{height} -> {aspect}");
    Ok(imageops::resize(
        &window,
        aspect.width,
        aspect.height,
        FilterType::Lanczos3,
    ))
}
