use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::media;
use crate::traversal::PasswordTraversal;
use crate::{CodecOptions, DctDecoder, SteganoError};

use super::Password;

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_file: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options, they must match the ones used for hiding
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the secret image that contains the message to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// Additionally write the unveiled message to this file
    pub fn into_output_file(mut self, output_file: impl AsRef<Path>) -> Self {
        self.output_file = Some(output_file.as_ref().to_path_buf());
        self
    }

    /// Set the password the message was hidden with
    /// If `None` is passed, the empty password is used
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Execute the unveil process and return the message
    ///
    /// A wrong password or an image without a message yield an empty or
    /// garbled message, not an error.
    pub fn execute(self) -> Result<String, SteganoError> {
        let Some(secret_media) = self.secret_media else {
            return Err(SteganoError::CarrierNotSet);
        };

        let stego = media::load(&secret_media)?;
        let message = DctDecoder::new(self.options)
            .extract(&stego, PasswordTraversal::new(self.password.as_str()))?;
        debug!("unveiled {} characters from {secret_media:?}", message.chars().count());

        if let Some(output_file) = self.output_file {
            // one byte per character, the inverse of the hidden representation
            let bytes: Vec<u8> = message.chars().map(|c| c as u8).collect();
            fs::write(&output_file, bytes).map_err(|source| SteganoError::WriteError { source })?;
        }

        Ok(message)
    }
}
