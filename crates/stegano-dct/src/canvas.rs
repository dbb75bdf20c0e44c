//! The stego plane while a message is written into it.
//!
//! A [`Canvas`] keeps the plane, its coefficients and the reading of every
//! slot the walk has already passed. A coefficient is never changed in the
//! coefficient domain alone: its block is inverse transformed, brought into
//! 0–255, rounded to [`storable`] samples and transformed again, and the new
//! block is only taken if every reading held in it is unchanged. The
//! coefficients on the canvas are therefore exactly those extraction
//! computes, from memory as well as after an OpenEXR round trip.

use log::trace;

use crate::carrier::{storable, Plane, MAX_SAMPLE};
use crate::rule::{Reading, GUARD};
use crate::transform::{BlockTransform, CoefficientGrid};

/// Margin of the first attempt, moves only coefficients right at a boundary.
const NUDGE_MARGIN: f64 = GUARD / 4.0;

/// Margin of the attempts after a block failed to keep its readings.
const CLIP_MARGIN: f64 = 0.125;

const MAX_ATTEMPTS: usize = 32;

pub(crate) struct Canvas {
    transform: BlockTransform,
    threshold: f64,
    plane: Plane,
    grid: CoefficientGrid,
    /// Readings the walk relies on, per block in raster order.
    held: Vec<Vec<(usize, Reading)>>,
    retried: usize,
}

impl Canvas {
    /// `plane` has to hold [`storable`] samples only.
    pub fn new(plane: Plane, transform: BlockTransform, threshold: f64) -> Self {
        let grid = CoefficientGrid::forward(&plane, &transform);
        let held = vec![Vec::new(); grid.total_blocks()];
        Canvas {
            transform,
            threshold,
            plane,
            grid,
            held,
            retried: 0,
        }
    }

    pub fn grid(&self) -> &CoefficientGrid {
        &self.grid
    }

    /// Blocks that needed more than one attempt to keep their readings.
    pub fn retried(&self) -> usize {
        self.retried
    }

    /// Keep the current reading of coefficient `index` of block (br, bc)
    /// from now on.
    pub fn hold(&mut self, br: usize, bc: usize, index: usize) -> Reading {
        let reading = Reading::of(self.grid.block(br, bc)[index], self.threshold);
        let block = br * self.grid.blocks_wide() + bc;
        self.held[block].push((index, reading));
        reading
    }

    /// Set coefficient `index` of block (br, bc) to `value`, or to `0` when
    /// `value` cannot be reached without breaking a held reading, and hold
    /// the result.
    ///
    /// Returns `None` if the block cannot take either.
    pub fn rewrite(&mut self, br: usize, bc: usize, index: usize, value: f64) -> Option<Reading> {
        let shrunk = (value != 0.0).then_some(0.0);
        for target in std::iter::once(value).chain(shrunk) {
            if self.try_rewrite(br, bc, index, target) {
                return Some(self.hold(br, bc, index));
            }
        }
        None
    }

    fn try_rewrite(&mut self, br: usize, bc: usize, index: usize, value: f64) -> bool {
        let block = br * self.grid.blocks_wide() + bc;
        let mut wanted = self.held[block].clone();
        wanted.push((index, Reading::of(value, self.threshold)));

        let mut coeffs = self.grid.block(br, bc).to_vec();
        coeffs[index] = value;
        for attempt in 0..MAX_ATTEMPTS {
            let margin = if attempt == 0 {
                NUDGE_MARGIN
            } else {
                CLIP_MARGIN
            };
            for &(k, reading) in &wanted {
                coeffs[k] = reading.settle(coeffs[k], self.threshold, margin);
            }

            let samples = fit(self.transform.inverse(&coeffs));
            let actual = self.transform.forward(&samples);
            if wanted
                .iter()
                .all(|&(k, reading)| Reading::of(actual[k], self.threshold) == reading)
            {
                if attempt > 0 {
                    trace!("block ({br}, {bc}) settled after {} attempts", attempt + 1);
                    self.retried += 1;
                }
                self.plane.write_block(br, bc, self.transform.size(), &samples);
                self.grid.block_mut(br, bc).copy_from_slice(&actual);
                return true;
            }
            coeffs = actual;
        }

        trace!("block ({br}, {bc}) cannot take {value} at index {index}");
        false
    }

    pub fn into_plane(self) -> Plane {
        self.plane
    }
}

/// Bring block samples into 0–255 and round them to storable values.
///
/// A block whose spread fits is shifted as a whole, which only moves its DC
/// term. Wider blocks are centered and clipped.
fn fit(mut samples: Vec<f64>) -> Vec<f64> {
    let (low, high) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &s| {
            (low.min(s), high.max(s))
        });
    let shift = if low >= 0.0 && high <= MAX_SAMPLE {
        0.0
    } else if high - low > MAX_SAMPLE {
        (MAX_SAMPLE - high - low) / 2.0
    } else if low < 0.0 {
        -low
    } else {
        MAX_SAMPLE - high
    };

    for sample in &mut samples {
        *sample = storable((*sample + shift).clamp(0.0, MAX_SAMPLE));
    }
    samples
}
