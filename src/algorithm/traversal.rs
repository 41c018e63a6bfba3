use crate::io::error::{Result, invalid_parameter};

/// Largest supported traversal block
pub const MAX_BLOCK_SIZE: u8 = 4;

// Pass order as (x, y) offsets inside a block. Early passes are spread across
// the block so the canvas fills coarse-to-fine, like an interlaced scan.
const OFFSETS_1: [(u32, u32); 1] = [(0, 0)];
const OFFSETS_2: [(u32, u32); 4] = [(0, 0), (1, 1), (1, 0), (0, 1)];
const OFFSETS_3: [(u32, u32); 9] = [
    (0, 0),
    (2, 2),
    (2, 0),
    (0, 2),
    (1, 1),
    (1, 2),
    (2, 1),
    (1, 0),
    (0, 1),
];
const OFFSETS_4: [(u32, u32); 16] = [
    (0, 0),
    (2, 2),
    (2, 0),
    (0, 2),
    (1, 1),
    (3, 3),
    (3, 1),
    (1, 3),
    (1, 0),
    (3, 2),
    (3, 0),
    (1, 2),
    (0, 1),
    (2, 3),
    (2, 1),
    (0, 3),
];

/// Traversal granularity, validated to `1..=4`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockSize(u8);

impl BlockSize {
    /// Single raster pass
    pub const ONE: Self = Self(1);

    /// Convert a zero-based command-line code (`0..=3`)
    ///
    /// # Errors
    ///
    /// Returns an error if the code is outside `0..=3`
    pub fn from_code(code: u8) -> Result<Self> {
        if code < MAX_BLOCK_SIZE {
            Ok(Self(code + 1))
        } else {
            Err(invalid_parameter(
                "block_size",
                &code,
                &"block size code must be 0, 1, 2 or 3",
            ))
        }
    }

    /// Side length of a block in pixels
    pub const fn get(self) -> u32 {
        self.0 as u32
    }

    /// Number of interleaved passes
    pub const fn pass_count(self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }

    /// `(x, y)` offsets of every pass, in traversal order
    pub const fn offsets(self) -> &'static [(u32, u32)] {
        match self.0 {
            2 => &OFFSETS_2,
            3 => &OFFSETS_3,
            4 => &OFFSETS_4,
            _ => &OFFSETS_1,
        }
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for BlockSize {
    type Error = crate::io::error::SynthesisError;

    fn try_from(value: u8) -> Result<Self> {
        if (1..=MAX_BLOCK_SIZE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(invalid_parameter(
                "block_size",
                &value,
                &format!("must be between 1 and {MAX_BLOCK_SIZE}"),
            ))
        }
    }
}

/// One interleaved pass over the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pass {
    /// Zero-based position of this pass in the plan
    pub index: usize,
    /// First column visited
    pub x_offset: u32,
    /// First row visited
    pub y_offset: u32,
    step: u32,
    width: u32,
    height: u32,
}

impl Pass {
    /// Coordinates of this pass in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let Self {
            x_offset,
            y_offset,
            step,
            width,
            height,
            ..
        } = *self;
        let step = step as usize;

        (y_offset..height)
            .step_by(step)
            .flat_map(move |y| (x_offset..width).step_by(step).map(move |x| (x, y)))
    }

    /// Coordinates of the `row`-th row this pass visits, left to right
    pub fn row_coordinates(&self, row: usize) -> impl Iterator<Item = (u32, u32)> + use<> {
        let y = u32::try_from(row)
            .ok()
            .and_then(|row| row.checked_mul(self.step))
            .and_then(|offset| offset.checked_add(self.y_offset))
            .filter(|&y| y < self.height);
        let (x_offset, width, step) = (self.x_offset, self.width, self.step as usize);

        y.into_iter()
            .flat_map(move |y| (x_offset..width).step_by(step).map(move |x| (x, y)))
    }

    /// Number of rows this pass visits
    pub fn rows(&self) -> usize {
        self.height
            .saturating_sub(self.y_offset)
            .div_ceil(self.step) as usize
    }

    /// Number of coordinates this pass visits
    pub fn len(&self) -> usize {
        let columns = self.width.saturating_sub(self.x_offset).div_ceil(self.step) as usize;
        self.rows() * columns
    }

    /// Test if the pass visits nothing (offset beyond a tiny canvas)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Deterministic multi-pass ordering of every canvas coordinate
///
/// The canvas is divided into `block × block` cells. Pass `i` visits the
/// pixel at offset `offsets[i]` inside every cell. Across all passes each
/// coordinate is visited exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraversalPlan {
    block_size: BlockSize,
    width: u32,
    height: u32,
}

impl TraversalPlan {
    /// Build the plan for a canvas of the given size
    pub const fn new(block_size: BlockSize, width: u32, height: u32) -> Self {
        Self {
            block_size,
            width,
            height,
        }
    }

    /// Block size the plan was built for
    pub const fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Number of passes
    pub const fn pass_count(&self) -> usize {
        self.block_size.pass_count()
    }

    /// Pass at `index`, if any
    pub fn pass(&self, index: usize) -> Option<Pass> {
        let &(x_offset, y_offset) = self.block_size.offsets().get(index)?;
        Some(Pass {
            index,
            x_offset,
            y_offset,
            step: self.block_size.get(),
            width: self.width,
            height: self.height,
        })
    }

    /// All passes in order
    pub fn passes(&self) -> impl Iterator<Item = Pass> + '_ {
        (0..self.pass_count()).filter_map(|index| self.pass(index))
    }

    /// Every coordinate in traversal order
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.passes().flat_map(|pass| pass.coordinates())
    }

    /// Total coordinates visited, equal to the canvas area
    pub fn len(&self) -> usize {
        self.passes().map(|pass| pass.len()).sum()
    }

    /// Test if the canvas has no pixels
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
