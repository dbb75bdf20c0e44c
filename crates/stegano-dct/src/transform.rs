//! Orthonormal 2D DCT over square blocks of a plane.
//!
//! Provides [`BlockTransform`] (forward and inverse DCT-II for one block) and
//! [`CoefficientGrid`] for the transformed blocks of a whole plane in
//! block-raster order. Within each block the coefficients are in natural
//! (row-major) order, i.e. index = vertical frequency * size + horizontal frequency.
//!
//! No quantization happens here, the inverse is exact up to floating point
//! rounding.

use crate::carrier::Plane;

/// Separable orthonormal DCT-II for `size × size` blocks.
#[derive(Debug, Clone)]
pub struct BlockTransform {
    size: usize,
    /// `cosine[u * size + x] = cos((2x + 1) * u * PI / (2 * size))`
    cosine: Vec<f64>,
    /// Normalization: C(0) = sqrt(1/size), C(u>0) = sqrt(2/size).
    norm: Vec<f64>,
}

impl BlockTransform {
    pub fn new(size: usize) -> Self {
        let n = size as f64;
        let mut cosine = Vec::with_capacity(size * size);
        for u in 0..size {
            for x in 0..size {
                cosine.push(
                    ((2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / (2.0 * n)).cos(),
                );
            }
        }
        let mut norm = vec![(2.0 / n).sqrt(); size];
        if let Some(dc) = norm.first_mut() {
            *dc = (1.0 / n).sqrt();
        }

        Self { size, cosine, norm }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of samples (and coefficients) per block.
    pub fn block_len(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    fn cos(&self, u: usize, x: usize) -> f64 {
        self.cosine[u * self.size + x]
    }

    /// Spatial samples (row-major) → coefficients (row-major).
    pub fn forward(&self, samples: &[f64]) -> Vec<f64> {
        let n = self.size;
        debug_assert_eq!(samples.len(), n * n);

        // rows first
        let mut temp = vec![0.0f64; n * n];
        for row in 0..n {
            for u in 0..n {
                let mut sum = 0.0;
                for x in 0..n {
                    sum += samples[row * n + x] * self.cos(u, x);
                }
                temp[row * n + u] = self.norm[u] * sum;
            }
        }

        // then columns
        let mut coeffs = vec![0.0f64; n * n];
        for col in 0..n {
            for v in 0..n {
                let mut sum = 0.0;
                for y in 0..n {
                    sum += temp[y * n + col] * self.cos(v, y);
                }
                coeffs[v * n + col] = self.norm[v] * sum;
            }
        }

        coeffs
    }

    /// Coefficients (row-major) → spatial samples (row-major).
    pub fn inverse(&self, coeffs: &[f64]) -> Vec<f64> {
        let n = self.size;
        debug_assert_eq!(coeffs.len(), n * n);

        // columns first
        let mut temp = vec![0.0f64; n * n];
        for col in 0..n {
            for y in 0..n {
                let mut sum = 0.0;
                for v in 0..n {
                    sum += self.norm[v] * coeffs[v * n + col] * self.cos(v, y);
                }
                temp[y * n + col] = sum;
            }
        }

        // then rows
        let mut samples = vec![0.0f64; n * n];
        for row in 0..n {
            for x in 0..n {
                let mut sum = 0.0;
                for u in 0..n {
                    sum += self.norm[u] * temp[row * n + u] * self.cos(u, x);
                }
                samples[row * n + x] = sum;
            }
        }

        samples
    }
}

/// Transformed blocks of one plane.
///
/// Only full blocks are covered, remainder rows and columns of the plane are
/// neither transformed nor written back.
#[derive(Debug, Clone)]
pub struct CoefficientGrid {
    block_size: usize,
    blocks_wide: usize,
    blocks_tall: usize,
    /// Flat storage: blocks_tall * blocks_wide * block_size² coefficients.
    coeffs: Vec<f64>,
}

impl CoefficientGrid {
    /// Forward transform every full block of `plane`.
    pub fn forward(plane: &Plane, transform: &BlockTransform) -> Self {
        let n = transform.size();
        let blocks_wide = plane.width() / n;
        let blocks_tall = plane.height() / n;

        let mut coeffs = Vec::with_capacity(blocks_wide * blocks_tall * n * n);
        for br in 0..blocks_tall {
            for bc in 0..blocks_wide {
                coeffs.extend(transform.forward(&plane.read_block(br, bc, n)));
            }
        }

        Self {
            block_size: n,
            blocks_wide,
            blocks_tall,
            coeffs,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks horizontally.
    pub fn blocks_wide(&self) -> usize {
        self.blocks_wide
    }

    /// Number of blocks vertically.
    pub fn blocks_tall(&self) -> usize {
        self.blocks_tall
    }

    /// Total number of blocks.
    pub fn total_blocks(&self) -> usize {
        self.blocks_wide * self.blocks_tall
    }

    /// Number of AC coefficients over all blocks.
    pub fn ac_slots(&self) -> usize {
        self.total_blocks() * (self.block_size * self.block_size - 1)
    }

    /// Block row, block column and within-block index of AC slot `slot`.
    ///
    /// Slots run through the blocks in raster order and skip each DC term.
    #[inline]
    pub fn locate(&self, slot: usize) -> (usize, usize, usize) {
        let ac_per_block = self.block_size * self.block_size - 1;
        let block = slot / ac_per_block;
        (
            block / self.blocks_wide,
            block % self.blocks_wide,
            1 + slot % ac_per_block,
        )
    }

    /// Get a reference to the coefficients of the block at (br, bc).
    pub fn block(&self, br: usize, bc: usize) -> &[f64] {
        let len = self.block_size * self.block_size;
        let start = (br * self.blocks_wide + bc) * len;
        &self.coeffs[start..start + len]
    }

    pub fn block_mut(&mut self, br: usize, bc: usize) -> &mut [f64] {
        let len = self.block_size * self.block_size;
        let start = (br * self.blocks_wide + bc) * len;
        &mut self.coeffs[start..start + len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured_block(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = fastrand::Rng::with_seed(seed);
        (0..n * n).map(|_| rng.f64() * 255.0).collect()
    }

    #[test]
    fn forward_then_inverse_restores_samples() {
        for n in [2, 4, 8, 16] {
            let t = BlockTransform::new(n);
            let block = textured_block(n, 7);
            let restored = t.inverse(&t.forward(&block));
            for (a, b) in block.iter().zip(&restored) {
                assert!((a - b).abs() < 1e-9, "size {n}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn flat_block_has_only_a_dc_term() {
        let t = BlockTransform::new(8);
        let coeffs = t.forward(&[16.0; 64]);

        // DC = sum / sqrt(64) = 16 * 64 / 8
        assert!((coeffs[0] - 128.0).abs() < 1e-9);
        for c in &coeffs[1..] {
            assert!(c.abs() < 1e-9);
        }
    }

    #[test]
    fn transform_preserves_energy() {
        let t = BlockTransform::new(8);
        let block = textured_block(8, 99);
        let coeffs = t.forward(&block);

        let spatial: f64 = block.iter().map(|s| s * s).sum();
        let spectral: f64 = coeffs.iter().map(|c| c * c).sum();
        assert!((spatial - spectral).abs() / spatial < 1e-12);
    }

    #[test]
    fn horizontal_frequency_is_the_column_index() {
        let t = BlockTransform::new(8);
        // samples vary along x only → energy in row 0 of the coefficients
        let block: Vec<f64> = (0..64).map(|i| ((i % 8) * 10) as f64).collect();
        let coeffs = t.forward(&block);

        assert!(coeffs[1].abs() > 1.0);
        assert!(coeffs[8].abs() < 1e-9);
    }

    #[test]
    fn altering_one_coefficient_leaves_the_others_intact() {
        let t = BlockTransform::new(8);
        let block: Vec<f64> = textured_block(8, 3).iter().map(|s| 64.0 + s / 2.0).collect();
        let mut coeffs = t.forward(&block);
        let original = coeffs.clone();
        coeffs[10] -= 1.0;

        let again = t.forward(&t.inverse(&coeffs));
        for k in 0..64 {
            let expected = if k == 10 { original[k] - 1.0 } else { original[k] };
            assert!((again[k] - expected).abs() < 1e-9, "index {k}");
        }
    }

    #[test]
    fn grid_ignores_partial_blocks_and_restores_in_place() {
        let mut rng = fastrand::Rng::with_seed(1);
        let plane = Plane::from_fn(20, 17, |_, _| 40.0 + rng.f64() * 150.0);
        let t = BlockTransform::new(8);
        let grid = CoefficientGrid::forward(&plane, &t);

        assert_eq!(grid.blocks_wide(), 2);
        assert_eq!(grid.blocks_tall(), 2);
        assert_eq!(grid.total_blocks(), 4);
        assert_eq!(grid.block(1, 1).len(), 64);

        let mut restored = Plane::new(20, 17);
        for br in 0..2 {
            for bc in 0..2 {
                restored.write_block(br, bc, 8, &t.inverse(grid.block(br, bc)));
            }
        }
        for y in 0..16 {
            for x in 0..16 {
                assert!((plane.get(x, y) - restored.get(x, y)).abs() < 1e-9);
            }
        }
        // remainder column and row are untouched
        assert_eq!(restored.get(19, 3), 0.0);
        assert_eq!(restored.get(3, 16), 0.0);
    }

    #[test]
    fn slots_skip_the_dc_terms() {
        let plane = Plane::new(24, 16);
        let grid = CoefficientGrid::forward(&plane, &BlockTransform::new(8));

        assert_eq!(grid.ac_slots(), 6 * 63);
        assert_eq!(grid.locate(0), (0, 0, 1));
        assert_eq!(grid.locate(62), (0, 0, 63));
        assert_eq!(grid.locate(63), (0, 1, 1));
        assert_eq!(grid.locate(3 * 63 + 5), (1, 0, 6));
    }

    #[test]
    fn blocks_can_be_replaced() {
        let plane = Plane::from_fn(16, 8, |x, _| x as f64);
        let mut grid = CoefficientGrid::forward(&plane, &BlockTransform::new(8));
        grid.block_mut(0, 1).fill(2.0);

        assert_eq!(grid.block(0, 1), &[2.0; 64][..]);
        assert_ne!(grid.block(0, 0)[0], 2.0);
    }
}
