use std::path::PathBuf;

use clap::Args;
use stegano_dct::CodecOptions;

use crate::CliResult;

/// Hides a text message in a PNG, JPEG or OpenEXR image and writes an OpenEXR image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Password that selects where the message is hidden, prompted for if omitted
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Cover image, used readonly.
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as OpenEXR file (.exr), lossy formats are refused
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message", required = true)]
    pub message: String,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let password = if self.password.is_none() {
            crate::cli::ask_for_password(true)
        } else {
            self.password
        };

        let report = stegano_dct::api::hide::prepare()
            .with_options(options)
            .with_image(&self.media)
            .with_message(&self.message)
            .use_password(password)
            .with_output(&self.write_to_file)
            .execute()?;

        println!(
            "Hid {} of {} possible characters in {}",
            report.message_len,
            report.capacity,
            self.write_to_file.display()
        );
        match report.psnr {
            Some(psnr) => println!("PSNR: {psnr:.2} dB"),
            None => println!("PSNR: image unchanged"),
        }

        Ok(())
    }
}
