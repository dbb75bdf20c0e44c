//! Strategies that decide the order in which coefficient slots are visited.
//!
//! The self-contained mode re-derives the walk from the password alone
//! ([`PasswordTraversal`]). A walk that is kept next to the carrier, for
//! instance in a separate key file, plugs in through [`KeyedTraversal`].
//! Encoder and decoder share the block transform, the coefficient pool and
//! the per-coefficient rules with either strategy.

use crate::error::{Result, SteganoError};
use crate::permutation::{PasswordSeed, Permutation};

/// Produces the visiting order for a given number of slots.
pub trait Traversal {
    fn permutation(&self, slots: usize) -> Result<Permutation>;
}

/// Walk derived from a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordTraversal {
    seed: PasswordSeed,
}

impl PasswordTraversal {
    pub fn new(password: &str) -> Self {
        Self {
            seed: PasswordSeed::derive(password),
        }
    }

    pub fn seed(&self) -> PasswordSeed {
        self.seed
    }
}

impl From<PasswordSeed> for PasswordTraversal {
    fn from(seed: PasswordSeed) -> Self {
        Self { seed }
    }
}

impl Traversal for PasswordTraversal {
    fn permutation(&self, slots: usize) -> Result<Permutation> {
        Ok(Permutation::from_seed(self.seed, slots))
    }
}

/// Walk given explicitly by the caller.
///
/// Only valid for carriers with exactly as many slots as the permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedTraversal {
    permutation: Permutation,
}

impl KeyedTraversal {
    pub fn new(permutation: Permutation) -> Self {
        Self { permutation }
    }
}

impl Traversal for KeyedTraversal {
    fn permutation(&self, slots: usize) -> Result<Permutation> {
        if self.permutation.len() != slots {
            return Err(SteganoError::invalid_input(format!(
                "stored walk covers {} slots but the carrier has {slots}",
                self.permutation.len()
            )));
        }
        Ok(self.permutation.clone())
    }
}

impl<T: Traversal + ?Sized> Traversal for &T {
    fn permutation(&self, slots: usize) -> Result<Permutation> {
        (**self).permutation(slots)
    }
}
