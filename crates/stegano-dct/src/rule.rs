//! Per-coefficient embedding and extraction rules.
//!
//! A coefficient carries one bit in the parity of its truncated magnitude.
//! Embedding only ever moves a magnitude towards zero by one unit; a
//! magnitude that would drop to or below zero collapses to `0` (F5
//! shrinkage).

/// Width of the band just below every decision boundary that still reads as
/// the upper side.
///
/// Wider than the rounding of both the inverse/forward transform pair and
/// the 32 bit float storage of samples, so exact coefficients like `2.0` or
/// `0.0` keep their reading.
pub const GUARD: f64 = 1e-3;

/// Truncated magnitude of a coefficient.
#[inline]
pub fn magnitude(coeff: f64) -> u64 {
    (coeff.abs() + GUARD).floor() as u64
}

/// Whether a coefficient takes part in the walk.
#[inline]
pub fn is_candidate(coeff: f64, threshold: f64) -> bool {
    coeff.abs() > threshold + GUARD
}

/// Whether a candidate is guaranteed to remain one whatever bit it receives.
///
/// Only these count towards the capacity, weaker candidates may shrink and
/// hand their bit on to the next candidate.
#[inline]
pub fn is_shrink_proof(coeff: f64, threshold: f64) -> bool {
    is_candidate(coeff, threshold) && is_candidate((coeff.abs() - 1.0).max(0.0), threshold)
}

/// Write `bit` into `coeff`.
///
/// - `0` stays `0`, it cannot carry a one.
/// - matching parity leaves the coefficient unchanged.
/// - otherwise the magnitude is decremented by one, keeping the sign. A
///   magnitude of one or less has nothing left after the decrement and
///   shrinks to `0`.
///
/// The decrement applies to the real magnitude, `1.6` becomes `0.6` and not
/// `0`. Whether the result is still a candidate is up to the threshold.
pub fn embed_bit(coeff: f64, bit: bool) -> f64 {
    if coeff == 0.0 || extract_bit(coeff) == bit {
        return coeff;
    }
    let reduced = coeff.abs() - 1.0;
    if reduced <= 0.0 {
        return 0.0;
    }
    coeff.signum() * reduced
}

/// Read the bit carried by `coeff`; `0` reads as `false`.
#[inline]
pub fn extract_bit(coeff: f64) -> bool {
    magnitude(coeff) % 2 == 1
}

/// Everything the walk learns from one coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// Not a candidate, the walk passes over it.
    Skipped,
    Candidate { negative: bool, magnitude: u64 },
}

impl Reading {
    pub fn of(coeff: f64, threshold: f64) -> Self {
        if is_candidate(coeff, threshold) {
            Reading::Candidate {
                negative: coeff < 0.0,
                magnitude: magnitude(coeff),
            }
        } else {
            Reading::Skipped
        }
    }

    /// Closest value to `coeff` that reads as `self` and stays at least
    /// `margin` away from the values that do not.
    ///
    /// Ranges narrower than `2 * margin` give their midpoint.
    pub fn settle(self, coeff: f64, threshold: f64, margin: f64) -> f64 {
        match self {
            Reading::Skipped => {
                let bound = threshold + GUARD - margin;
                if bound <= 0.0 {
                    0.0
                } else {
                    coeff.clamp(-bound, bound)
                }
            }
            Reading::Candidate {
                negative,
                magnitude,
            } => {
                let low = (magnitude as f64 - GUARD).max(threshold + GUARD);
                let high = magnitude as f64 + 1.0 - GUARD;
                let settled = if high - low <= 2.0 * margin {
                    (low + high) / 2.0
                } else {
                    coeff.abs().clamp(low + margin, high - margin)
                };
                if negative {
                    -settled
                } else {
                    settled
                }
            }
        }
    }
}
