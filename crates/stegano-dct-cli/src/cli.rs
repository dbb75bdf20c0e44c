use clap::{Parser, Subcommand, ValueEnum};
use stegano_dct::options::{DEFAULT_BLOCK_SIZE, DEFAULT_THRESHOLD};
use stegano_dct::{Channel, CodecOptions};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Edge length of the square transform blocks
    #[arg(long, global = true, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Coefficients with a magnitude at or below this value are skipped
    #[arg(long, global = true, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Color channel that carries the message
    #[arg(long, global = true, value_enum, default_value_t = ChannelArg::Green)]
    pub channel: ChannelArg,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions::default()
            .with_block_size(self.block_size)
            .with_threshold(self.threshold)
            .with_channel(self.channel.into())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelArg {
    Red,
    Green,
    Blue,
}

impl From<ChannelArg> for Channel {
    fn from(value: ChannelArg) -> Self {
        match value {
            ChannelArg::Red => Channel::Red,
            ChannelArg::Green => Channel::Green,
            ChannelArg::Blue => Channel::Blue,
        }
    }
}

/// Prompt for a password on the terminal, `None` if the prompt fails.
pub fn ask_for_password(confirm: bool) -> Option<String> {
    let mut prompt = dialoguer::Password::new()
        .with_prompt("Password")
        .allow_empty_password(true);
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Error: the passwords don't match.");
    }

    prompt.interact().ok()
}
