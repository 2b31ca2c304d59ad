//! Height selection for new elements.
//!
//! A height is the highest lane an element occupies. It is drawn by counting
//! the trailing zero bits of a fresh random `u32`, so `P(height >= k)` is
//! about `2^-k`, then clipped to a cap that grows with `log2(len)`.

use rand_core::RngCore;

use crate::lane::LANES;

/// Tunable constants for the height cap.
///
/// `cap = max(min_cap, floor(log2(len)) + headroom)`, never above the top
/// lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightConfig {
    /// Lowest cap, used while the list is small.
    pub min_cap: usize,
    /// Lanes allowed above `log2(len)` once the list is large.
    pub headroom: usize,
}

impl Default for HeightConfig {
    fn default() -> Self {
        return HeightConfig {
            min_cap: 15,
            headroom: 5,
        };
    }
}

impl HeightConfig {
    /// Highest lane an element may be given when the list holds `len`
    /// elements.
    pub fn cap(&self, len: usize) -> usize {
        let scaled = match len.checked_ilog2() {
            Some(log) => (log as usize).saturating_add(self.headroom),
            None => 0,
        };
        return self.min_cap.max(scaled).min(LANES - 1);
    }

    /// Draw a height in `0..=cap(len)`.
    pub fn choose<R: RngCore>(&self, len: usize, rng: &mut R) -> usize {
        let zeros = rng.next_u32().trailing_zeros() as usize;
        return zeros.min(self.cap(len));
    }
}
