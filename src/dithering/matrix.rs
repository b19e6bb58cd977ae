use crate::{
    error::{HalftonerError, Result},
    utils::num::pow2_order,
};

/// A dispersed-dot (Bayer) threshold matrix, pre-normalized to (0, 1).
///
/// Built once per requested side and immutable thereafter. Lookup tiles the
/// matrix periodically over the full image extent using power-of-two masking.
#[derive(Debug, Clone)]
pub struct ThresholdMatrix {
    /// bit order of the matrix side.
    ///
    /// > side == 2^order == sqrt(thresholds.len())
    order: u32,
    /// bits of side set to 1, i.e. side - 1.
    ///
    /// Used for faster % computations on power of 2s.
    ///
    /// > x % 2^k === x & (2^k - 1)
    side_mask: usize,
    thresholds: Vec<f32>,
}

impl ThresholdMatrix {
    /// Build the matrix for a given side length.
    ///
    /// `side` must be a power of two >= 1; anything else is rejected here,
    /// never rounded.
    pub fn build(side: u32) -> Result<Self> {
        let Some(order) = pow2_order(side) else {
            return Err(HalftonerError::InvalidParameter(format!(
                "matrix size must be a power of two >= 1, got {}",
                side
            )));
        };

        let ranks = bayer_ranks(side);
        // (v + 0.5) / n^2 keeps every threshold strictly inside (0, 1),
        // so no pixel can always or never pass
        let cells = ranks.len() as f32;
        let thresholds = ranks.iter().map(|v| (*v as f32 + 0.5) / cells).collect();

        Ok(Self {
            order,
            side_mask: (side - 1) as usize,
            thresholds,
        })
    }

    #[inline]
    pub fn side(&self) -> u32 {
        1 << self.order
    }

    /// Threshold for a pixel coordinate, tiled periodically in both axes
    #[inline(always)]
    pub fn threshold(&self, x: usize, y: usize) -> f32 {
        self.thresholds[((y & self.side_mask) << self.order) + (x & self.side_mask)]
    }
}

/// Recursive Bayer rank construction, row-major.
///
/// Base case is the 1x1 matrix `[0]`; each doubling step arranges the
/// quadrants as `[[4S+0, 4S+2], [4S+3, 4S+1]]`. This exact offset assignment
/// is what gives the matrix its dispersed-dot ordering; a different
/// assignment produces a non-equivalent dither pattern.
pub(crate) fn bayer_ranks(side: u32) -> Vec<u32> {
    if side == 1 {
        return vec![0];
    }

    let half = (side / 2) as usize;
    let sub = bayer_ranks(side / 2);
    let side = side as usize;

    let mut ranks = vec![0u32; side * side];
    for y in 0..half {
        for x in 0..half {
            let seed = 4 * sub[y * half + x];
            ranks[y * side + x] = seed;
            ranks[y * side + x + half] = seed + 2;
            ranks[(y + half) * side + x] = seed + 3;
            ranks[(y + half) * side + x + half] = seed + 1;
        }
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_base_case() {
        assert_eq!(bayer_ranks(1), vec![0]);
    }

    #[test]
    fn test_smallest_nontrivial_matrix() {
        // direct check of the recursive formula at side 2
        assert_eq!(bayer_ranks(2), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_side_4_matrix() {
        // one more doubling step applied to [[0, 2], [3, 1]]
        #[rustfmt::skip]
        let expected = vec![
            0,  8,  2, 10,
            12, 4, 14,  6,
            3, 11,  1,  9,
            15, 7, 13,  5,
        ];
        assert_eq!(bayer_ranks(4), expected);
    }

    #[test]
    fn test_ranks_are_a_permutation() {
        for side in [1u32, 2, 4, 8, 16, 32] {
            let ranks = bayer_ranks(side);
            let sorted = ranks.iter().copied().sorted().collect_vec();
            let expected = (0..side * side).collect_vec();
            assert_eq!(sorted, expected, "side {}", side);
        }
    }

    #[test]
    fn test_normalized_thresholds_strictly_inside_unit_interval() {
        for side in [1u32, 2, 4, 8, 16] {
            let matrix = ThresholdMatrix::build(side).unwrap();
            for y in 0..side as usize {
                for x in 0..side as usize {
                    let t = matrix.threshold(x, y);
                    assert!(t > 0.0 && t < 1.0, "side {} ({}, {}) -> {}", side, x, y, t);
                }
            }
        }
    }

    #[test]
    fn test_threshold_lookup_tiles_periodically() {
        let matrix = ThresholdMatrix::build(4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(matrix.threshold(x, y), matrix.threshold(x + 4, y + 8));
            }
        }
    }

    #[test]
    fn test_rejects_invalid_sides() {
        for side in [0u32, 3, 5, 6, 7, 12, 100] {
            assert!(ThresholdMatrix::build(side).is_err(), "side {}", side);
        }
    }
}
