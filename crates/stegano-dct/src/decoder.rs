//! Extraction of a hidden text message.

use log::debug;

use crate::bitstream::{self, HEADER_BITS, MAX_MESSAGE_LEN};
use crate::carrier::Carrier;
use crate::error::Result;
use crate::options::CodecOptions;
use crate::pool::CoefficientPool;
use crate::rule;
use crate::transform::{BlockTransform, CoefficientGrid};
use crate::traversal::Traversal;

/// Upper bound on the number of bits read from a carrier.
///
/// Ends the walk on wrong passwords and carriers without a message.
pub const EXTRACTION_BIT_CAP: usize = 10_000;

/// Reads messages hidden by [`crate::DctEncoder`].
#[derive(Debug, Clone, Default)]
pub struct DctDecoder {
    options: CodecOptions,
}

impl DctDecoder {
    pub fn new(options: CodecOptions) -> Self {
        DctDecoder { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Recover the message from `stego`.
    ///
    /// A wrong password, different options or a carrier without a message
    /// give an empty (or meaningless) string, not an error. Errors are only
    /// returned for invalid options or a traversal that does not fit the
    /// carrier.
    pub fn extract<T: Traversal>(&self, stego: &Carrier, traversal: T) -> Result<String> {
        self.options.validate()?;

        let transform = BlockTransform::new(self.options.block_size);
        let grid = CoefficientGrid::forward(stego.plane(self.options.channel), &transform);
        let pool = CoefficientPool::new(&grid, self.options.threshold);
        let permutation = traversal.permutation(pool.slots())?;

        let mut bits = Vec::new();
        let mut expected: Option<usize> = None;
        for record in pool.walk(&permutation) {
            bits.push(rule::extract_bit(record.value));

            if bits.len() == HEADER_BITS {
                expected = bitstream::declared_len(&bits)
                    .filter(|len| (1..=MAX_MESSAGE_LEN).contains(len))
                    .map(bitstream::required_bits);
            }
            if expected.is_some_and(|needed| bits.len() >= needed)
                || bits.len() >= EXTRACTION_BIT_CAP
            {
                break;
            }
        }
        debug!(
            "read {} bits from {} candidates, declared length {:?}",
            bits.len(),
            pool.candidate_count(),
            bitstream::declared_len(&bits)
        );

        Ok(bitstream::decode(&bits))
    }
}
