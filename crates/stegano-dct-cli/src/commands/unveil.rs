use std::path::PathBuf;

use clap::Args;
use stegano_dct::CodecOptions;

use crate::CliResult;

/// Unveils a text message from an image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Password the message was hidden with, prompted for if omitted
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Source image that contains the secret message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Also store the message in that file
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let password = if self.password.is_none() {
            crate::cli::ask_for_password(false)
        } else {
            self.password
        };

        let mut api = stegano_dct::api::unveil::prepare()
            .with_options(options)
            .from_secret_file(&self.media)
            .using_password(password);
        if let Some(output_file) = &self.output_file {
            api = api.into_output_file(output_file);
        }

        let message = api.execute()?;
        if message.is_empty() {
            log::warn!("no message found, check password and options");
        }
        println!("{message}");

        Ok(())
    }
}
