use std::path::PathBuf;

use clap::Args;
use stegano_dct::{media, CodecOptions};

use crate::CliResult;

/// Reports how many characters an image can hide
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Cover image to inspect
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let carrier = media::load(&self.media)?;
        let capacity = stegano_dct::capacity(&carrier, &options)?;

        println!(
            "{}: {}x{}, up to {capacity} characters",
            self.media.display(),
            carrier.width(),
            carrier.height()
        );

        Ok(())
    }
}
