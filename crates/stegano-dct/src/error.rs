//! Error types for embedding and extraction.

use std::fmt;
use thiserror::Error;

/// Result type alias for all operations of this crate.
pub type Result<T> = std::result::Result<T, SteganoError>;

/// Errors that can occur while hiding or unveiling a message.
///
/// Extraction itself never fails on a wrong password or an image without a
/// message, it yields an empty string instead. Only the structural problems
/// below are reported, and always before any carrier sample is touched.
#[derive(Error)]
pub enum SteganoError {
    /// The carrier cannot be normalized to three channels, or an option is out of range.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The message to hide has zero length.
    #[error("message must not be empty")]
    EmptyPayload,

    /// The carrier has fewer usable coefficients than the message needs bits.
    #[error("capacity exceeded: message requires {required} bits but only {available} available")]
    CapacityExceeded { required: usize, available: usize },

    /// A block is so close to black or white that no sample range can keep
    /// both the new bit and the bits already placed in it.
    #[error("block ({block_row}, {block_col}) is too saturated to carry the message")]
    SaturatedBlock { block_row: usize, block_col: usize },

    /// The output format would round away the hidden message.
    #[error("Output format is lossy and would destroy the message, use OpenEXR (.exr)")]
    LossyOutput,

    /// A message character does not fit into a single byte.
    #[error("character {character:?} at position {position} is not representable as a single byte")]
    UnsupportedCharacter { character: char, position: usize },

    /// Represents an unsupported carrier media, for example a text file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media, for example a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}

impl SteganoError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        SteganoError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl fmt::Debug for SteganoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use Display for Debug so unwrap() shows user-friendly messages
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_error_reports_both_counts() {
        let e = SteganoError::CapacityExceeded {
            required: 120,
            available: 64,
        };
        assert_eq!(
            e.to_string(),
            "capacity exceeded: message requires 120 bits but only 64 available"
        );
    }

    #[test]
    fn debug_uses_display() {
        let e = SteganoError::invalid_input("expected 3 channels, got 5");
        assert_eq!(format!("{e:?}"), "invalid input: expected 3 channels, got 5");
    }
}
