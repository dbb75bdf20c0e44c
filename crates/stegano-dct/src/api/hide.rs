use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::media::{self, MediaFormat, Persist};
use crate::traversal::PasswordTraversal;
use crate::{quality, CodecOptions, DctEncoder, SteganoError};

use super::Password;

pub fn prepare() -> HideApi {
    HideApi::default()
}

/// Outcome of a successful [`HideApi::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct HideReport {
    /// Characters hidden.
    pub message_len: usize,
    /// Characters the cover could have taken.
    pub capacity: usize,
    /// Distortion of the stego image, `None` if nothing had to change.
    pub psnr: Option<f64>,
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    /// The cover image, PNG, JPEG or OpenEXR
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the stego image is written to, has to be OpenEXR (`.exr`)
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the password
    pub fn with_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Set the password
    /// If `None` is passed, the empty password is used
    pub fn use_password<S: AsRef<str>>(mut self, password: Option<S>) -> Self {
        self.password = password.map(|s| s.as_ref().to_string()).into();
        self
    }

    pub fn execute(self) -> Result<HideReport, SteganoError> {
        let Some(message) = self.message else {
            return Err(SteganoError::MissingMessage);
        };
        let Some(image) = self.image else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(SteganoError::TargetNotSet);
        };
        if !MediaFormat::from_path(&output)?.is_lossless() {
            return Err(SteganoError::LossyOutput);
        }
        if !self.password.is_set() {
            warn!("no password set, the message is hidden with the empty password");
        }

        let cover = media::load(&image)?;
        let encoder = DctEncoder::new(self.options);
        let capacity = encoder.capacity(&cover)?;
        let stego = encoder.embed(
            &cover,
            PasswordTraversal::new(self.password.as_str()),
            &message,
        )?;
        let psnr = quality::psnr(&cover, &stego)?;
        debug!("hid {} characters in {image:?}, psnr {psnr:?}", message.chars().count());

        stego.save_as(&output)?;

        Ok(HideReport {
            message_len: message.chars().count(),
            capacity,
            psnr,
        })
    }
}
