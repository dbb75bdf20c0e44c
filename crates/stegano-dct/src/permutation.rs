//! Password seeded permutation of the coefficient walk.
//!
//! The permutation spreads the message over the whole carrier plane. It is
//! never stored: both sides derive it from the password and the number of
//! coefficient slots, so any change to either gives a different walk.

use std::fmt;

use fastrand::Rng;
use sha2::{Digest, Sha256};

use crate::error::{Result, SteganoError};

/// Deterministic 32 bit seed derived from a password.
///
/// This is not a key derivation function, it only selects a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasswordSeed(u32);

impl PasswordSeed {
    /// The first 8 hex digits of the SHA-256 digest of `password`.
    pub fn derive(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        PasswordSeed(u32::from_be_bytes([
            digest[0], digest[1], digest[2], digest[3],
        ]))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    fn rng(self) -> Rng {
        Rng::with_seed(u64::from(self.0))
    }
}

impl From<u32> for PasswordSeed {
    fn from(value: u32) -> Self {
        PasswordSeed(value)
    }
}

impl fmt::Display for PasswordSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Fisher-Yates shuffle driven by `rng`.
fn fisher_yates<T>(rng: &mut Rng, data: &mut [T]) {
    for i in (1..data.len()).rev() {
        let j = rng.usize(0..=i);
        data.swap(i, j);
    }
}

/// Shuffle `data` itself with the walk of `seed`.
///
/// Visits the elements in the same order as [`Permutation::from_seed`] applied
/// to a slice of the same length.
pub fn shuffle_in_place<T>(seed: PasswordSeed, data: &mut [T]) {
    fisher_yates(&mut seed.rng(), data);
}

/// Pseudo-random bijection on `0..len`.
///
/// `order[k]` is the slot visited at step `k`, `position[slot]` is the step
/// at which `slot` is visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
    position: Vec<usize>,
}

impl Permutation {
    /// Create a permutation of `0..length` from a seed.
    pub fn from_seed(seed: PasswordSeed, length: usize) -> Self {
        let mut order: Vec<usize> = (0..length).collect();
        shuffle_in_place(seed, &mut order);
        Self::with_order(order)
    }

    /// Create an identity permutation (no shuffling).
    pub fn identity(length: usize) -> Self {
        Self::with_order((0..length).collect())
    }

    /// Use an explicit visiting order, for example one that was stored
    /// alongside the carrier.
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let mut seen = vec![false; order.len()];
        for &slot in &order {
            match seen.get_mut(slot) {
                Some(s) if !*s => *s = true,
                _ => {
                    return Err(SteganoError::invalid_input(format!(
                        "order is not a permutation of 0..{} (slot {slot})",
                        order.len()
                    )))
                }
            }
        }
        Ok(Self::with_order(order))
    }

    fn with_order(order: Vec<usize>) -> Self {
        let mut position = vec![0usize; order.len()];
        for (step, &slot) in order.iter().enumerate() {
            position[slot] = step;
        }
        Permutation { order, position }
    }

    /// The slot visited at `step`.
    #[inline]
    pub fn visit(&self, step: usize) -> usize {
        self.order[step]
    }

    /// The step at which `slot` is visited.
    #[inline]
    pub fn position_of(&self, slot: usize) -> usize {
        self.position[slot]
    }

    /// Slots in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    /// The visiting order as a slice.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Elements of `data` in visiting order.
    pub fn shuffle<T: Clone>(&self, data: &[T]) -> Vec<T> {
        assert_eq!(data.len(), self.len());
        self.order.iter().map(|&slot| data[slot].clone()).collect()
    }

    /// Restore the original order of data produced by [`Permutation::shuffle`].
    pub fn unshuffle<T: Clone>(&self, data: &[T]) -> Vec<T> {
        assert_eq!(data.len(), self.len());
        self.position.iter().map(|&step| data[step].clone()).collect()
    }
}
