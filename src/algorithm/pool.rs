use crate::algorithm::bitset::LuminanceBitset;
use crate::io::error::{Result, SynthesisError, computation_error};
use crate::math::luminance::all_colors;
use crate::math::{Color, LUMINANCE_LEVELS, TOTAL_COLORS, luminance};
use bitvec::prelude::*;

/// Colors sharing one luminance, consumed front to back
#[derive(Clone, Debug, Default)]
struct Bucket {
    colors: Vec<Color>,
    head: usize,
}

impl Bucket {
    fn len(&self) -> usize {
        self.colors.len() - self.head
    }

    fn remaining(&self) -> &[Color] {
        self.colors.get(self.head..).unwrap_or(&[])
    }

    fn pop_front(&mut self) -> Option<Color> {
        let color = self.colors.get(self.head).copied()?;
        self.head += 1;
        if self.head == self.colors.len() {
            // Release the backing storage as soon as the bucket drains
            self.colors = Vec::new();
            self.head = 0;
        }
        Some(color)
    }
}

/// Exhaustive set of unassigned colors indexed by luminance
///
/// Colors are grouped into 256 buckets, one per integer luminance. A bitset of
/// non-empty buckets answers nearest-luminance queries in time bounded by the
/// number of luminance levels. Colors leave the pool through
/// [`ColorPool::nearest_and_remove`] and never return.
#[derive(Clone, Debug)]
pub struct ColorPool {
    buckets: Vec<Bucket>,
    active: LuminanceBitset,
    remaining: usize,
}

impl ColorPool {
    /// Populate the pool with every 24-bit color
    ///
    /// Colors enter their buckets in `(r, g, b)` lexicographic order, so the
    /// removal order of a fresh pool is always the same.
    pub fn full() -> Self {
        let mut counts = [0usize; LUMINANCE_LEVELS];
        for color in all_colors() {
            if let Some(count) = counts.get_mut(color.luminance() as usize) {
                *count += 1;
            }
        }

        let mut pool = Self::with_capacities(&counts);
        for color in all_colors() {
            pool.push(color);
        }
        pool
    }

    /// Build a pool over an arbitrary set of colors
    ///
    /// Colors keep their relative order inside each bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the same color appears more than once
    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> Result<Self> {
        let mut seen = bitvec![0; TOTAL_COLORS];
        let mut pool = Self::with_capacities(&[0; LUMINANCE_LEVELS]);

        for color in colors {
            let index = color.index() as usize;
            if seen.get(index).as_deref() == Some(&true) {
                return Err(SynthesisError::InvalidSourceData {
                    reason: format!("Color {color} appears more than once"),
                });
            }
            seen.set(index, true);
            pool.push(color);
        }

        Ok(pool)
    }

    fn with_capacities(counts: &[usize; LUMINANCE_LEVELS]) -> Self {
        let buckets = counts
            .iter()
            .map(|&count| Bucket {
                colors: Vec::with_capacity(count),
                head: 0,
            })
            .collect();

        Self {
            buckets,
            active: LuminanceBitset::new(),
            remaining: 0,
        }
    }

    fn push(&mut self, color: Color) {
        let key = color.luminance();
        if let Some(bucket) = self.buckets.get_mut(key as usize) {
            bucket.colors.push(color);
            self.active.insert(key);
            self.remaining += 1;
        }
    }

    /// Remove and return a color whose luminance is closest to `target`
    ///
    /// Ties between an equally distant darker and brighter key go to the
    /// darker key. Within a key, colors leave in insertion order. A key is
    /// dropped from the active set as soon as its last color is taken.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::PoolExhausted`] if the pool is empty
    pub fn nearest_and_remove(&mut self, target: u8) -> Result<Color> {
        let key = self
            .active
            .nearest(target)
            .ok_or(SynthesisError::PoolExhausted {
                target,
                pass: None,
                position: None,
            })?;

        let bucket = self
            .buckets
            .get_mut(key as usize)
            .ok_or_else(|| computation_error("nearest_and_remove", &"bucket out of range"))?;
        let color = bucket.pop_front().ok_or_else(|| {
            computation_error(
                "nearest_and_remove",
                &format!("active key {key} has an empty bucket"),
            )
        })?;

        if bucket.len() == 0 {
            self.active.remove(key);
        }
        self.remaining -= 1;

        Ok(color)
    }

    /// Luminance key that [`ColorPool::nearest_and_remove`] would draw from
    pub fn nearest_key(&self, target: u8) -> Option<u8> {
        self.active.nearest(target)
    }

    /// Remaining color count
    pub const fn size(&self) -> usize {
        self.remaining
    }

    /// Test if every color has been assigned
    pub const fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining colors with the given luminance
    pub fn bucket_len(&self, key: u8) -> usize {
        self.buckets.get(key as usize).map_or(0, Bucket::len)
    }

    /// Luminance keys that still hold colors, ascending
    pub fn active_keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.active.iter()
    }

    /// Remaining colors of every bucket in removal order, indexed by luminance
    pub fn buckets(&self) -> impl Iterator<Item = (u8, &[Color])> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(key, bucket)| (key as u8, bucket.remaining()))
    }

    /// Check that every color sits in the bucket matching its luminance
    pub fn is_consistent(&self) -> bool {
        let mut total = 0;
        for (key, colors) in self.buckets() {
            if colors.is_empty() == self.active.contains(key) {
                return false;
            }
            if colors
                .iter()
                .any(|color| luminance(color.r, color.g, color.b) != key)
            {
                return false;
            }
            total += colors.len();
        }
        total == self.remaining
    }
}
