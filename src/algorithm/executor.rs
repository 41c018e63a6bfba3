use crate::{
    algorithm::pool::ColorPool,
    algorithm::traversal::{BlockSize, Pass, TraversalPlan},
    io::error::{ErrorContext, Result, SynthesisError, WithContext, computation_error},
    math::{Color, TOTAL_COLORS},
    spatial::{Alignment, Aspect, FULL_COLOR_ASPECTS, fit_and_crop, select_aspect},
};
use image::RgbImage;
use log::{debug, info};

/// Parameters controlling how a source is fitted and traversed
#[derive(Clone, Debug)]
pub struct SynthesisConfig {
    /// Traversal block size
    pub block_size: BlockSize,
    /// Crop alignment for the overflowing dimension
    pub alignment: Alignment,
    /// Canvas shapes to choose from
    pub aspects: Vec<Aspect>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            block_size: BlockSize::ONE,
            alignment: Alignment::Center,
            aspects: FULL_COLOR_ASPECTS.to_vec(),
        }
    }
}

/// Pixel-by-pixel assignment of pool colors to a fitted source
///
/// Owns the color pool and the destination canvas for one run. Work proceeds
/// one traversal row at a time, and pool and canvas are consistent between
/// rows, so callers may report progress or stop between steps. The canvas is
/// only handed out once every coordinate has been written.
pub struct Synthesizer {
    aspect: Aspect,
    plan: TraversalPlan,
    fitted: RgbImage,
    canvas: RgbImage,
    pool: ColorPool,
    pass_index: usize,
    row_index: usize,
    assigned: usize,
}

impl Synthesizer {
    /// Prepare a run over the complete 24-bit color space
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source has no pixels or no canvas shape is configured
    /// - The chosen canvas does not hold exactly 2^24 pixels
    /// - The source ratio is too extreme to resize onto the canvas
    pub fn new(source: &RgbImage, config: &SynthesisConfig) -> Result<Self> {
        let (aspect, fitted) = Self::prepare(source, config, TOTAL_COLORS)?;
        Ok(Self::assemble(aspect, fitted, ColorPool::full(), config))
    }

    /// Prepare a run over a preloaded pool
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source has no pixels or no canvas shape is configured
    /// - The chosen canvas area differs from the pool size
    /// - The source ratio is too extreme to resize onto the canvas
    pub fn with_pool(source: &RgbImage, pool: ColorPool, config: &SynthesisConfig) -> Result<Self> {
        let (aspect, fitted) = Self::prepare(source, config, pool.size())?;
        Ok(Self::assemble(aspect, fitted, pool, config))
    }

    fn prepare(
        source: &RgbImage,
        config: &SynthesisConfig,
        pool_size: usize,
    ) -> Result<(Aspect, RgbImage)> {
        let (width, height) = source.dimensions();
        let aspect = select_aspect(width, height, &config.aspects)?;
        info!("Source {width}x{height} mapped onto canvas {aspect}");

        if aspect.area() != pool_size {
            return Err(SynthesisError::GeometryMismatch {
                canvas: aspect.dimensions(),
                pool_size,
            });
        }

        let fitted = fit_and_crop(source, aspect, config.alignment)?;
        Ok((aspect, fitted))
    }

    fn assemble(
        aspect: Aspect,
        fitted: RgbImage,
        pool: ColorPool,
        config: &SynthesisConfig,
    ) -> Self {
        let plan = TraversalPlan::new(config.block_size, aspect.width, aspect.height);
        let mut synthesizer = Self {
            aspect,
            plan,
            fitted,
            canvas: RgbImage::new(aspect.width, aspect.height),
            pool,
            pass_index: 0,
            row_index: 0,
            assigned: 0,
        };
        synthesizer.skip_empty_passes();
        synthesizer
    }

    /// Canvas shape chosen for the source
    pub const fn aspect(&self) -> Aspect {
        self.aspect
    }

    /// Traversal order being followed
    pub const fn plan(&self) -> &TraversalPlan {
        &self.plan
    }

    /// Source resized and cropped to the canvas
    pub const fn fitted(&self) -> &RgbImage {
        &self.fitted
    }

    /// Canvas as written so far
    pub const fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Colors not yet assigned
    pub const fn pool(&self) -> &ColorPool {
        &self.pool
    }

    /// Index of the pass in progress
    pub const fn pass_index(&self) -> usize {
        self.pass_index
    }

    /// Number of pixels written so far
    pub const fn assigned(&self) -> usize {
        self.assigned
    }

    /// Test if every pass has been walked
    pub const fn is_complete(&self) -> bool {
        self.pass_index >= self.plan.pass_count()
    }

    /// Assign colors to the next row of the current pass
    ///
    /// Returns whether any work remains.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::PoolExhausted`] with pass and position
    /// context if the pool runs dry before the canvas is full
    pub fn execute_row(&mut self) -> Result<bool> {
        let Some(pass) = self.plan.pass(self.pass_index) else {
            return Ok(false);
        };

        let context = ErrorContext {
            pass: Some(pass.index),
            ..Default::default()
        };

        for (x, y) in pass.row_coordinates(self.row_index) {
            let target = Color::from(*self.fitted.get_pixel(x, y)).luminance();
            let color = self
                .pool
                .nearest_and_remove(target)
                .with_context(context)
                .at_position(x, y)?;
            self.canvas.put_pixel(x, y, color.into());
            self.assigned += 1;
        }

        self.row_index += 1;
        if self.row_index >= pass.rows() {
            self.finish_pass(pass);
        }

        Ok(!self.is_complete())
    }

    /// Assign colors to every remaining row of the current pass
    ///
    /// Returns whether any passes remain.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Synthesizer::execute_row`]
    pub fn execute_pass(&mut self) -> Result<bool> {
        let pass = self.pass_index;
        while self.pass_index == pass && self.execute_row()? {}
        Ok(!self.is_complete())
    }

    /// Walk the whole traversal plan
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Synthesizer::execute_row`]
    pub fn run(&mut self) -> Result<()> {
        while self.execute_row()? {}
        Ok(())
    }

    /// Hand out the finished canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the traversal is unfinished or colors remain unassigned
    pub fn finish(self) -> Result<RgbImage> {
        if !self.is_complete() {
            return Err(computation_error(
                "finish",
                &format!(
                    "traversal stopped in pass {} after {} pixels",
                    self.pass_index, self.assigned
                ),
            ));
        }
        if !self.pool.is_empty() {
            return Err(computation_error(
                "finish",
                &format!("{} colors were never assigned", self.pool.size()),
            ));
        }
        Ok(self.canvas)
    }

    fn finish_pass(&mut self, pass: Pass) {
        info!(
            "Pass {} of {} completed ({} colors remaining)",
            pass.index + 1,
            self.plan.pass_count(),
            self.pool.size()
        );
        self.pass_index += 1;
        self.row_index = 0;
        self.skip_empty_passes();
    }

    fn skip_empty_passes(&mut self) {
        while let Some(pass) = self.plan.pass(self.pass_index) {
            if !pass.is_empty() {
                break;
            }
            debug!("Pass {} visits no pixels on this canvas", pass.index + 1);
            self.pass_index += 1;
        }
    }
}

/// Run a complete synthesis over the full color space
///
/// # Errors
///
/// Returns an error if preparation or traversal fails
pub fn synthesize(source: &RgbImage, config: &SynthesisConfig) -> Result<RgbImage> {
    let mut synthesizer = Synthesizer::new(source, config)?;
    synthesizer.run()?;
    synthesizer.finish()
}
