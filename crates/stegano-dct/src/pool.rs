//! The coefficient pool: every AC coefficient of every full block, addressed
//! by a flat slot number.
//!
//! Slots are numbered in scan order: blocks left to right, top to bottom,
//! and inside a block by within-block index, skipping the DC term. The
//! traversal permutes slot numbers, the walk then skips every slot whose
//! value is not a candidate. The encoder keeps the reading of every slot it
//! has walked past, so the extracting side sees the very same candidates
//! except for those that shrank below the threshold.

use crate::permutation::Permutation;
use crate::rule;
use crate::transform::CoefficientGrid;

/// A single coefficient together with its address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientRecord {
    pub value: f64,
    pub block_row: usize,
    pub block_col: usize,
    /// Row-major index inside the block, never 0 (DC).
    pub index: usize,
}

/// Read-only view of the AC coefficients of a [`CoefficientGrid`].
#[derive(Debug, Clone, Copy)]
pub struct CoefficientPool<'g> {
    grid: &'g CoefficientGrid,
    threshold: f64,
}

impl<'g> CoefficientPool<'g> {
    pub fn new(grid: &'g CoefficientGrid, threshold: f64) -> Self {
        CoefficientPool { grid, threshold }
    }

    /// Number of AC slots, the domain of the traversal.
    pub fn slots(&self) -> usize {
        self.grid.ac_slots()
    }

    /// Coefficient and address of `slot`.
    pub fn record(&self, slot: usize) -> CoefficientRecord {
        let (block_row, block_col, index) = self.grid.locate(slot);
        CoefficientRecord {
            value: self.grid.block(block_row, block_col)[index],
            block_row,
            block_col,
            index,
        }
    }

    /// All candidates in scan order.
    pub fn candidates(&self) -> impl Iterator<Item = CoefficientRecord> + '_ {
        (0..self.slots())
            .map(|slot| self.record(slot))
            .filter(|record| rule::is_candidate(record.value, self.threshold))
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates().count()
    }

    /// Number of bits the pool can carry whatever their values are.
    ///
    /// Counts only candidates that stay candidates after a decrement, so a
    /// message of at most this many bits always finds a home.
    pub fn capacity_bits(&self) -> usize {
        self.candidates()
            .filter(|record| rule::is_shrink_proof(record.value, self.threshold))
            .count()
    }

    /// Candidates in the visiting order of `permutation`.
    pub fn walk<'a>(&'a self, permutation: &'a Permutation) -> Walk<'a, 'g> {
        debug_assert_eq!(permutation.len(), self.slots());
        Walk {
            pool: self,
            permutation,
            step: 0,
        }
    }
}

/// Iterator over the candidate slots of a pool in permuted order.
pub struct Walk<'a, 'g> {
    pool: &'a CoefficientPool<'g>,
    permutation: &'a Permutation,
    step: usize,
}

impl Iterator for Walk<'_, '_> {
    type Item = CoefficientRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < self.permutation.len() {
            let record = self.pool.record(self.permutation.visit(self.step));
            self.step += 1;

            if rule::is_candidate(record.value, self.pool.threshold) {
                return Some(record);
            }
        }
        None
    }
}
