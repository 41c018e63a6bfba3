use crate::math::LUMINANCE_LEVELS;
use bitvec::prelude::*;
use std::fmt;

/// Fixed 256-bit set of luminance keys that still hold colors
///
/// Provides O(1) membership updates and nearest-key queries bounded by the
/// number of luminance levels, independent of how many colors remain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LuminanceBitset {
    bits: BitArray<[u64; LUMINANCE_LEVELS / 64], Lsb0>,
}

impl Default for LuminanceBitset {
    fn default() -> Self {
        Self::new()
    }
}

impl LuminanceBitset {
    /// Create a bitset with no keys present
    pub const fn new() -> Self {
        Self {
            bits: BitArray::ZERO,
        }
    }

    /// Mark a key as active
    pub fn insert(&mut self, key: u8) {
        self.bits.set(key as usize, true);
    }

    /// Mark a key as exhausted
    pub fn remove(&mut self, key: u8) {
        self.bits.set(key as usize, false);
    }

    /// Test key membership
    pub fn contains(&self, key: u8) -> bool {
        self.bits.get(key as usize).as_deref() == Some(&true)
    }

    /// Test if no keys are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count active keys
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Active keys in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter_ones().map(|index| index as u8)
    }

    /// Closest active key to `target`
    ///
    /// An exact match wins outright. When the nearest key below and the
    /// nearest key above are equally distant, the lower key is returned.
    pub fn nearest(&self, target: u8) -> Option<u8> {
        if self.contains(target) {
            return Some(target);
        }

        let target = target as usize;
        let below = self.bits.get(..target).and_then(|bits| bits.last_one());
        let above = self
            .bits
            .get(target + 1..)
            .and_then(|bits| bits.first_one())
            .map(|offset| target + 1 + offset);

        let key = match (below, above) {
            (Some(lower), Some(upper)) => {
                if target - lower <= upper - target {
                    lower
                } else {
                    upper
                }
            }
            (Some(lower), None) => lower,
            (None, Some(upper)) => upper,
            (None, None) => return None,
        };

        Some(key as u8)
    }
}

impl fmt::Display for LuminanceBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LuminanceBitset({} keys: {:?})",
            self.count(),
            self.iter().collect::<Vec<_>>()
        )
    }
}
