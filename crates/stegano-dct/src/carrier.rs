//! Floating point carrier images.
//!
//! A [`Carrier`] always holds exactly three planes (R, G, B) of `f64` samples in
//! the nominal range 0–255. Staying in floating point keeps every coefficient
//! that is not touched by embedding intact through the inverse and forward
//! transform pair, which extraction relies on.
//!
//! Stego planes hold [`storable`] samples only, values the 32 bit float
//! export reproduces bit for bit.

use image::{DynamicImage, Rgb, Rgb32FImage, RgbImage};

use crate::error::{Result, SteganoError};
use crate::options::Channel;

/// Largest valid sample value.
pub const MAX_SAMPLE: f64 = 255.0;

/// Background the alpha channel is composited onto (opaque white).
const BACKGROUND: f64 = MAX_SAMPLE;

/// Round `sample` to the closest value that survives [`Carrier::to_rgb32f`]
/// followed by [`Carrier::from_image`] unchanged.
///
/// Idempotent, maps 0 and 255 onto themselves.
#[inline]
pub fn storable(sample: f64) -> f64 {
    f64::from((sample / MAX_SAMPLE) as f32) * MAX_SAMPLE
}

/// A single channel of samples in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

impl Plane {
    /// A plane of the given size filled with zeros.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut samples = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.samples[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.samples[y * self.width + x] = value;
    }

    /// Raw read-only access to all samples, row-major.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// A copy with every sample rounded to a [`storable`] value.
    pub fn to_storable(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().copied().map(storable).collect(),
        }
    }

    /// Samples of the `size × size` block at (br, bc), row-major.
    pub fn read_block(&self, br: usize, bc: usize, size: usize) -> Vec<f64> {
        let mut block = Vec::with_capacity(size * size);
        for y in 0..size {
            let start = (br * size + y) * self.width + bc * size;
            block.extend_from_slice(&self.samples[start..start + size]);
        }
        block
    }

    /// Overwrite the `size × size` block at (br, bc) with `block`, row-major.
    pub fn write_block(&mut self, br: usize, bc: usize, size: usize, block: &[f64]) {
        debug_assert_eq!(block.len(), size * size);
        for (y, row) in block.chunks_exact(size).enumerate() {
            let start = (br * size + y) * self.width + bc * size;
            self.samples[start..start + size].copy_from_slice(row);
        }
    }
}

/// An image normalized to three channels of floating point samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Carrier {
    width: usize,
    height: usize,
    planes: [Plane; 3],
}

impl Carrier {
    /// Assemble a carrier from three planes of identical, non-zero size.
    pub fn from_planes(red: Plane, green: Plane, blue: Plane) -> Result<Self> {
        let (width, height) = (red.width, red.height);
        if width == 0 || height == 0 {
            return Err(SteganoError::invalid_input("image has no pixels"));
        }
        if [&green, &blue]
            .iter()
            .any(|p| p.width != width || p.height != height)
        {
            return Err(SteganoError::invalid_input(
                "channels differ in their dimensions",
            ));
        }

        Ok(Self {
            width,
            height,
            planes: [red, green, blue],
        })
    }

    /// Build a carrier from interleaved samples in the range 0–255.
    ///
    /// Accepted layouts are grey (1), grey + alpha (2), RGB (3) and RGBA (4).
    /// Alpha bearing layouts are composited onto an opaque white background.
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channels: usize,
        samples: &[f64],
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SteganoError::invalid_input("image has no pixels"));
        }
        if !(1..=4).contains(&channels) {
            return Err(SteganoError::invalid_input(format!(
                "cannot normalize {channels} channels to RGB"
            )));
        }
        if samples.len() != width * height * channels {
            return Err(SteganoError::invalid_input(format!(
                "expected {} samples for {width}x{height}x{channels}, got {}",
                width * height * channels,
                samples.len()
            )));
        }

        let mut planes = [
            Plane::new(width, height),
            Plane::new(width, height),
            Plane::new(width, height),
        ];
        for (i, pixel) in samples.chunks_exact(channels).enumerate() {
            let rgb = match *pixel {
                [l] => [l, l, l],
                [l, a] => [l, l, l].map(|c| over_background(c, a)),
                [r, g, b] => [r, g, b],
                [r, g, b, a] => [r, g, b].map(|c| over_background(c, a)),
                _ => unreachable!("chunks_exact yields {channels} samples"),
            };
            for (plane, value) in planes.iter_mut().zip(rgb) {
                plane.samples[i] = value;
            }
        }

        Ok(Self {
            width,
            height,
            planes,
        })
    }

    /// Normalize a decoded image to three channels.
    ///
    /// 8 bit images keep their exact integer samples, float images are scaled
    /// from the `image` crate's 0–1 convention to 0–255.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let samples: Vec<f64> = match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => image
                .to_rgba8()
                .into_raw()
                .into_iter()
                .map(f64::from)
                .collect(),
            _ => image
                .to_rgba32f()
                .into_raw()
                .into_iter()
                .map(|s| f64::from(s) * MAX_SAMPLE)
                .collect(),
        };

        Self::from_interleaved(width, height, 4, &samples)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn plane(&self, channel: Channel) -> &Plane {
        &self.planes[channel.index()]
    }

    /// A copy of this carrier with one plane replaced.
    pub(crate) fn with_plane(&self, channel: Channel, plane: Plane) -> Self {
        let mut planes = self.planes.clone();
        planes[channel.index()] = plane;
        Self {
            width: self.width,
            height: self.height,
            planes,
        }
    }

    /// Export as 32 bit float RGB image, samples scaled to 0–1.
    pub fn to_rgb32f(&self) -> Rgb32FImage {
        Rgb32FImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(self.pixel(x as usize, y as usize).map(|s| (s / MAX_SAMPLE) as f32))
        })
    }

    /// Export as 8 bit RGB image, samples rounded.
    ///
    /// Rounding disturbs the coefficients, a message hidden in a carrier
    /// usually does not survive this conversion.
    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(self
                .pixel(x as usize, y as usize)
                .map(|s| s.round().clamp(0.0, MAX_SAMPLE) as u8))
        })
    }

    fn pixel(&self, x: usize, y: usize) -> [f64; 3] {
        [
            self.planes[0].get(x, y),
            self.planes[1].get(x, y),
            self.planes[2].get(x, y),
        ]
    }
}

impl TryFrom<&DynamicImage> for Carrier {
    type Error = SteganoError;

    fn try_from(image: &DynamicImage) -> Result<Self> {
        Self::from_image(image)
    }
}

fn over_background(color: f64, alpha: f64) -> f64 {
    let a = (alpha / MAX_SAMPLE).clamp(0.0, 1.0);
    a * color + (1.0 - a) * BACKGROUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn rgb8_images_keep_exact_samples() {
        let img = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8, y as u8, 200]));
        let carrier = Carrier::from_image(&DynamicImage::ImageRgb8(img.clone())).unwrap();

        assert_eq!(carrier.width(), 4);
        assert_eq!(carrier.height(), 3);
        assert_eq!(carrier.plane(Channel::Red).get(3, 0), 3.0);
        assert_eq!(carrier.plane(Channel::Green).get(0, 2), 2.0);
        assert_eq!(carrier.plane(Channel::Blue).get(1, 1), 200.0);
        assert_eq!(carrier.to_rgb8(), img);
    }

    #[test]
    fn transparent_pixels_become_white() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([10, 20, 30, 0])
            } else {
                Rgba([10, 20, 30, 255])
            }
        });
        let carrier = Carrier::from_image(&DynamicImage::ImageRgba8(img)).unwrap();

        assert_eq!(carrier.plane(Channel::Red).get(0, 0), 255.0);
        assert_eq!(carrier.plane(Channel::Green).get(0, 0), 255.0);
        assert_eq!(carrier.plane(Channel::Red).get(1, 0), 10.0);
        assert_eq!(carrier.plane(Channel::Blue).get(1, 0), 30.0);
    }

    #[test]
    fn half_transparent_pixels_are_blended() {
        let carrier = Carrier::from_interleaved(1, 1, 4, &[0.0, 100.0, 255.0, 127.5]).unwrap();
        assert!((carrier.plane(Channel::Red).get(0, 0) - 127.5).abs() < 1e-9);
        assert!((carrier.plane(Channel::Green).get(0, 0) - 177.5).abs() < 1e-9);
        assert!((carrier.plane(Channel::Blue).get(0, 0) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn grey_images_are_replicated() {
        let img = GrayImage::from_fn(2, 2, |x, y| Luma([(x + 2 * y) as u8 * 10]));
        let carrier = Carrier::from_image(&DynamicImage::ImageLuma8(img)).unwrap();

        for channel in [Channel::Red, Channel::Green, Channel::Blue] {
            assert_eq!(carrier.plane(channel).get(1, 1), 30.0);
        }
    }

    #[test]
    fn unsupported_layouts_are_invalid_input() {
        assert!(matches!(
            Carrier::from_interleaved(1, 1, 5, &[0.0; 5]),
            Err(SteganoError::InvalidInput { .. })
        ));
        assert!(matches!(
            Carrier::from_interleaved(2, 2, 3, &[0.0; 11]),
            Err(SteganoError::InvalidInput { .. })
        ));
        assert!(matches!(
            Carrier::from_interleaved(0, 2, 3, &[]),
            Err(SteganoError::InvalidInput { .. })
        ));
    }

    #[test]
    fn planes_must_share_dimensions() {
        let result = Carrier::from_planes(Plane::new(2, 2), Plane::new(2, 2), Plane::new(3, 2));
        assert!(matches!(result, Err(SteganoError::InvalidInput { .. })));
    }

    #[test]
    fn float_export_is_scaled_to_unit_range() {
        let carrier = Carrier::from_interleaved(1, 1, 3, &[0.0, 127.5, 255.0]).unwrap();
        let img = carrier.to_rgb32f();
        assert_eq!(img.get_pixel(0, 0).0, [0.0, 0.5, 1.0]);

        let back = Carrier::from_image(&DynamicImage::ImageRgb32F(img)).unwrap();
        assert!((back.plane(Channel::Green).get(0, 0) - 127.5).abs() < 1e-4);
    }

    #[test]
    fn storable_samples_survive_the_float_export_exactly() {
        let mut rng = fastrand::Rng::with_seed(5);
        let plane = Plane::from_fn(16, 16, |_, _| rng.f64() * 255.0);
        let storable_plane = plane.to_storable();
        let carrier = Carrier::from_planes(
            storable_plane.clone(),
            storable_plane.clone(),
            storable_plane.clone(),
        )
        .unwrap();

        let back = Carrier::from_image(&DynamicImage::ImageRgb32F(carrier.to_rgb32f())).unwrap();
        assert_eq!(back, carrier);
        assert_eq!(storable_plane.to_storable(), storable_plane);
        for (a, b) in plane.samples().iter().zip(storable_plane.samples()) {
            assert!((a - b).abs() < 1e-5, "{a} vs {b}");
        }
        assert_eq!(storable(0.0), 0.0);
        assert_eq!(storable(MAX_SAMPLE), MAX_SAMPLE);
    }

    #[test]
    fn blocks_are_read_and_written_in_place() {
        let mut plane = Plane::from_fn(12, 9, |x, y| (y * 12 + x) as f64);
        let block = plane.read_block(1, 2, 4);
        assert_eq!(block[0], plane.get(8, 4));
        assert_eq!(block[15], plane.get(11, 7));

        plane.write_block(1, 2, 4, &[-1.0; 16]);
        assert_eq!(plane.get(8, 4), -1.0);
        assert_eq!(plane.get(11, 7), -1.0);
        assert_eq!(plane.get(7, 4), 55.0);
        assert_eq!(plane.get(8, 8), 104.0);
    }
}
