//! Embedding of a text message into the block transform of one carrier plane.

use log::debug;

use crate::bitstream::{self, MAX_MESSAGE_LEN};
use crate::canvas::Canvas;
use crate::carrier::Carrier;
use crate::error::{Result, SteganoError};
use crate::options::CodecOptions;
use crate::pool::CoefficientPool;
use crate::rule::{self, Reading};
use crate::transform::{BlockTransform, CoefficientGrid};
use crate::traversal::Traversal;

/// Hides messages in carriers.
///
/// The encoder only ever touches the plane selected by
/// [`CodecOptions::channel`]. That plane comes back with every sample
/// rounded to the 32 bit float grid of the OpenEXR output, and otherwise
/// changed only in the blocks that received a modified coefficient.
#[derive(Debug, Clone, Default)]
pub struct DctEncoder {
    options: CodecOptions,
}

impl DctEncoder {
    pub fn new(options: CodecOptions) -> Self {
        DctEncoder { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Maximum number of characters `carrier` can take.
    pub fn capacity(&self, carrier: &Carrier) -> Result<usize> {
        self.options.validate()?;

        let transform = BlockTransform::new(self.options.block_size);
        let plane = carrier.plane(self.options.channel).to_storable();
        let grid = CoefficientGrid::forward(&plane, &transform);
        let pool = CoefficientPool::new(&grid, self.options.threshold);

        Ok(chars_for_bits(pool.capacity_bits()))
    }

    /// Hide `message` in a copy of `cover`, visiting coefficients in the order
    /// given by `traversal`.
    ///
    /// Fails before any sample is touched if the message is empty, contains
    /// characters outside U+0000–U+00FF, or needs more bits than the carrier
    /// offers. [`SteganoError::SaturatedBlock`] is returned for a block so
    /// close to black or white that it cannot take its bit even as a zero.
    pub fn embed<T: Traversal>(
        &self,
        cover: &Carrier,
        traversal: T,
        message: &str,
    ) -> Result<Carrier> {
        self.options.validate()?;
        let bits = bitstream::encode(message)?;

        let channel = self.options.channel;
        let threshold = self.options.threshold;
        let mut canvas = Canvas::new(
            cover.plane(channel).to_storable(),
            BlockTransform::new(self.options.block_size),
            threshold,
        );

        let pool = CoefficientPool::new(canvas.grid(), threshold);
        let slots = pool.slots();
        let available = pool
            .capacity_bits()
            .min(bitstream::required_bits(MAX_MESSAGE_LEN));
        debug!(
            "{} blocks, {slots} slots, {} candidates, capacity {available} bits",
            canvas.grid().total_blocks(),
            pool.candidate_count(),
        );
        if bits.len() > available {
            return Err(SteganoError::CapacityExceeded {
                required: bits.len(),
                available,
            });
        }

        let permutation = traversal.permutation(slots)?;

        let mut pending = bits.iter().copied().peekable();
        let mut visited = 0usize;
        let mut shrunk = 0usize;
        let mut rewritten = 0usize;

        for step in 0..permutation.len() {
            let Some(&bit) = pending.peek() else {
                break;
            };
            let (br, bc, index) = canvas.grid().locate(permutation.visit(step));
            let value = canvas.grid().block(br, bc)[index];
            if !rule::is_candidate(value, threshold) {
                // extraction passes over it as well, as long as it stays put
                canvas.hold(br, bc, index);
                continue;
            }
            visited += 1;

            let modified = rule::embed_bit(value, bit);
            let reading = if modified == value {
                canvas.hold(br, bc, index)
            } else {
                rewritten += 1;
                canvas
                    .rewrite(br, bc, index, modified)
                    .ok_or(SteganoError::SaturatedBlock {
                        block_row: br,
                        block_col: bc,
                    })?
            };

            match reading {
                Reading::Candidate { .. } => {
                    pending.next();
                }
                // invisible to extraction, the bit moves on to the next candidate
                Reading::Skipped => shrunk += 1,
            }
        }

        if pending.peek().is_some() {
            return Err(SteganoError::CapacityExceeded {
                required: bits.len(),
                available: visited - shrunk,
            });
        }
        debug!(
            "embedded {} bits: visited {visited} candidates, {rewritten} rewritten, {shrunk} shrank",
            bits.len()
        );
        debug!("{} blocks needed more than one attempt", canvas.retried());

        Ok(cover.with_plane(channel, canvas.into_plane()))
    }
}

/// Characters that fit into `bits`, limited to the message ceiling.
fn chars_for_bits(bits: usize) -> usize {
    (bits.saturating_sub(bitstream::HEADER_BITS) / 8).min(MAX_MESSAGE_LEN)
}
