use clap::Parser;
use stegano_dct::SteganoError;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = std::result::Result<T, SteganoError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let options = args.codec_options();

    match args.command {
        Commands::Hide(cmd) => cmd.run(options),
        Commands::Unveil(cmd) => cmd.run(options),
        Commands::Capacity(cmd) => cmd.run(options),
    }
}
