use crate::error::{Result, SteganoError};

/// Default edge length of a transform block.
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Default magnitude a coefficient has to exceed to become a candidate.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Color channel of the carrier that takes the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Channel {
    Red,
    #[default]
    Green,
    Blue,
}

impl Channel {
    /// Position of the channel in an RGB pixel.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Codec configuration shared by embedding and extraction.
///
/// Both sides have to use identical options, a different block size or
/// threshold yields a different coefficient walk and the message is lost.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecOptions {
    /// Edge length of the square blocks the carrier plane is split into.
    /// Rows and columns that do not fill a whole block are left untouched.
    pub block_size: usize,

    /// A coefficient is a candidate iff its magnitude exceeds this value.
    pub threshold: f64,

    /// The plane that carries the message, the other two are copied verbatim.
    pub channel: Channel,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            threshold: DEFAULT_THRESHOLD,
            channel: Channel::default(),
        }
    }
}

impl CodecOptions {
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.block_size < 2 {
            return Err(SteganoError::invalid_input(format!(
                "block size must be at least 2, got {}",
                self.block_size
            )));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SteganoError::invalid_input(format!(
                "threshold must be a finite non-negative number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_embed_into_the_second_channel() {
        let opts = CodecOptions::default();
        assert_eq!(opts.block_size, 8);
        assert_eq!(opts.threshold, 0.5);
        assert_eq!(opts.channel.index(), 1);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_blocks_and_thresholds() {
        assert!(CodecOptions::default().with_block_size(1).validate().is_err());
        assert!(CodecOptions::default()
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(CodecOptions::default().with_threshold(-1.0).validate().is_err());
        assert!(CodecOptions::default()
            .with_block_size(16)
            .with_threshold(1.5)
            .validate()
            .is_ok());
    }
}
