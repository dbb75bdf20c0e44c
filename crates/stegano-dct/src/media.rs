//! Loading carriers from and persisting them to image files.
//!
//! Only OpenEXR keeps the floating point samples a hidden message depends on,
//! bit for bit for the [`storable`](crate::carrier::storable) samples the
//! encoder produces. PNG output is rounded to 8 bits and destroys the
//! message, it is supported for previews and logged as a warning;
//! [`crate::api::hide`] refuses it.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use log::{error, warn};

use crate::carrier::Carrier;
use crate::error::{Result, SteganoError};

/// File formats a carrier can be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Png,
    Jpeg,
    Exr,
}

impl MediaFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or(SteganoError::UnsupportedMedia)?;

        match ext.as_str() {
            "png" => Ok(MediaFormat::Png),
            "jpg" | "jpeg" => Ok(MediaFormat::Jpeg),
            "exr" => Ok(MediaFormat::Exr),
            _ => Err(SteganoError::UnsupportedMedia),
        }
    }

    /// Whether a carrier written in this format keeps its message.
    pub fn is_lossless(self) -> bool {
        matches!(self, MediaFormat::Exr)
    }

    fn image_format(self) -> ImageFormat {
        match self {
            MediaFormat::Png => ImageFormat::Png,
            MediaFormat::Jpeg => ImageFormat::Jpeg,
            MediaFormat::Exr => ImageFormat::OpenExr,
        }
    }
}

/// Read an image file and normalize it to a carrier.
pub fn load(path: &Path) -> Result<Carrier> {
    let format = MediaFormat::from_path(path)?;
    let image = image::open(path).map_err(|e| {
        error!("Error reading {format:?} image {path:?}: {e}");
        match e {
            image::ImageError::IoError(source) => SteganoError::ReadError { source },
            _ => SteganoError::InvalidImageMedia,
        }
    })?;

    Carrier::from_image(&image)
}

/// Types that can be written to a file.
pub trait Persist {
    fn save_as(&self, _: &Path) -> Result<()>;
}

impl Persist for Carrier {
    fn save_as(&self, file: &Path) -> Result<()> {
        let format = MediaFormat::from_path(file)?;
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            SteganoError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(f);
        save_to_writer(self, format, &mut writer)?;
        writer
            .flush()
            .map_err(|source| SteganoError::WriteError { source })
    }
}

/// Encode `carrier` in `format` into `writer`.
pub fn save_to_writer<W: Write + Seek>(
    carrier: &Carrier,
    format: MediaFormat,
    mut writer: W,
) -> Result<()> {
    let image = match format {
        MediaFormat::Exr => DynamicImage::ImageRgb32F(carrier.to_rgb32f()),
        MediaFormat::Png => {
            warn!("8 bit PNG output rounds the samples, the hidden message will likely be lost");
            DynamicImage::ImageRgb8(carrier.to_rgb8())
        }
        MediaFormat::Jpeg => return Err(SteganoError::UnsupportedMedia),
    };

    image
        .write_to(&mut writer, format.image_format())
        .map_err(|e| {
            error!("Error saving image: {e}");
            SteganoError::ImageEncodingError
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::Plane;
    use crate::options::Channel;
    use std::io::Cursor;

    fn carrier() -> Carrier {
        let mut rng = fastrand::Rng::with_seed(21);
        let mut plane = || Plane::from_fn(16, 8, |_, _| rng.u8(..) as f64);
        Carrier::from_planes(plane(), plane(), plane()).unwrap()
    }

    #[test]
    fn formats_are_detected_by_extension() {
        assert_eq!(
            MediaFormat::from_path(Path::new("a/b.PNG")).unwrap(),
            MediaFormat::Png
        );
        assert_eq!(
            MediaFormat::from_path(Path::new("c.jpeg")).unwrap(),
            MediaFormat::Jpeg
        );
        assert_eq!(
            MediaFormat::from_path(Path::new("d.exr")).unwrap(),
            MediaFormat::Exr
        );
        assert!(matches!(
            MediaFormat::from_path(Path::new("notes.txt")),
            Err(SteganoError::UnsupportedMedia)
        ));
        assert!(matches!(
            MediaFormat::from_path(Path::new("no_extension")),
            Err(SteganoError::UnsupportedMedia)
        ));
        assert!(MediaFormat::Exr.is_lossless());
        assert!(!MediaFormat::Png.is_lossless());
    }

    #[test]
    fn integer_samples_survive_png() {
        let carrier = carrier();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");

        carrier.save_as(&path).unwrap();
        assert_eq!(load(&path).unwrap(), carrier);
    }

    #[test]
    fn float_samples_survive_exr_within_f32_precision() {
        let carrier = carrier().with_plane(
            Channel::Green,
            Plane::from_fn(16, 8, |x, y| 10.25 + (x * y) as f64 / 3.0),
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stego.exr");

        carrier.save_as(&path).unwrap();
        let back = load(&path).unwrap();
        for (a, b) in carrier
            .plane(Channel::Green)
            .samples()
            .iter()
            .zip(back.plane(Channel::Green).samples())
        {
            assert!((a - b).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn storable_samples_survive_exr_exactly() {
        let mut rng = fastrand::Rng::with_seed(22);
        let plane = Plane::from_fn(16, 8, |_, _| rng.f64() * 255.0).to_storable();
        let carrier = carrier().with_plane(Channel::Green, plane);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stego.exr");

        carrier.save_as(&path).unwrap();
        let back = load(&path).unwrap();
        assert_eq!(back.plane(Channel::Green), carrier.plane(Channel::Green));
    }

    #[test]
    fn jpeg_is_input_only() {
        let result = save_to_writer(&carrier(), MediaFormat::Jpeg, Cursor::new(Vec::new()));
        assert!(matches!(result, Err(SteganoError::UnsupportedMedia)));
    }

    #[test]
    fn broken_files_are_invalid_media() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(load(&path), Err(SteganoError::InvalidImageMedia)));
    }

    #[test]
    fn missing_files_are_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("missing.png")),
            Err(SteganoError::ReadError { .. })
        ));
    }
}
