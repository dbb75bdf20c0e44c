//! # Stegano DCT
//!
//! Hides a short text message in the block DCT coefficients of one color
//! channel of an image, and recovers it with the same password.
//!
//! The carrier plane is split into square blocks (8×8 by default) that are
//! transformed with an orthonormal DCT-II. Every AC coefficient whose
//! magnitude exceeds a threshold is a candidate; a password seeded
//! permutation decides the order in which the candidates receive the bits of
//! the length prefixed message. A bit is stored in the parity of the
//! truncated magnitude, which is only ever decremented (F5 style).
//!
//! Every modified block is checked the way extraction will see it, after
//! clipping to 0–255 and rounding to the 32 bit floats of the OpenEXR
//! output, so a message written to `.exr` reads back unchanged.
//!
//! There are 2 main structures:
//! - [`DctEncoder`] for writing a message into a [`Carrier`]
//! - [`DctDecoder`] for reading it back
//!
//! and the file based builders in [`api`].
//!
//! # Usage Examples
//!
//! ## Hide and unveil in memory
//!
//! ```rust
//! use stegano_dct::{Carrier, Plane};
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let mut plane = || Plane::from_fn(64, 64, |_, _| 48.0 + rng.f64() * 160.0);
//! let cover = Carrier::from_planes(plane(), plane(), plane()).unwrap();
//!
//! let stego = stegano_dct::embed(&cover, "SuperSecret42", "Hello, World!").unwrap();
//! assert_eq!(stegano_dct::extract(&stego, "SuperSecret42"), "Hello, World!");
//! ```
//!
//! ## Hide data inside an image file
//!
//! ```rust,no_run
//! stegano_dct::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_password("SuperSecret42")
//!     .with_image("cover.png")
//!     .with_output("image-with-secret.exr")
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```
//!
//! ## Unveil data from an image file
//!
//! ```rust,no_run
//! let message = stegano_dct::api::unveil::prepare()
//!     .from_secret_file("image-with-secret.exr")
//!     .using_password("SuperSecret42")
//!     .execute()
//!     .expect("Failed to unveil message from image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod bitstream;
mod canvas;
pub mod carrier;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod media;
pub mod options;
pub mod permutation;
pub mod pool;
pub mod quality;
pub mod rule;
pub mod transform;
pub mod traversal;

pub use crate::carrier::{Carrier, Plane};
pub use crate::decoder::{DctDecoder, EXTRACTION_BIT_CAP};
pub use crate::encoder::DctEncoder;
pub use crate::error::{Result, SteganoError};
pub use crate::options::{Channel, CodecOptions};
pub use crate::permutation::{PasswordSeed, Permutation};
pub use crate::traversal::{KeyedTraversal, PasswordTraversal, Traversal};

/// Hide `message` in a copy of `cover` with the default options.
pub fn embed(cover: &Carrier, password: &str, message: &str) -> Result<Carrier> {
    DctEncoder::default().embed(cover, PasswordTraversal::new(password), message)
}

/// Recover a message hidden with [`embed`].
///
/// Returns an empty string when nothing can be found, for example with a
/// wrong password.
pub fn extract(stego: &Carrier, password: &str) -> String {
    // default options are valid and a password walk always fits
    DctDecoder::default()
        .extract(stego, PasswordTraversal::new(password))
        .unwrap_or_default()
}

/// Maximum number of characters `carrier` can take with `options`.
pub fn capacity(carrier: &Carrier, options: &CodecOptions) -> Result<usize> {
    DctEncoder::new(options.clone()).capacity(carrier)
}
