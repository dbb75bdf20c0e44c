use stegano_dct::{Carrier, Plane};

/// A noisy cover image with samples in 48..208, far enough from 0 and 255
/// that embedding never has to clip.
pub fn textured_cover(width: usize, height: usize, seed: u64) -> Carrier {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut plane = || Plane::from_fn(width, height, |_, _| rng.u8(48..208) as f64);
    Carrier::from_planes(plane(), plane(), plane()).unwrap()
}

/// Noise over the whole 0..=255 range, with a black band at the top, a white
/// band on the left and single black and white pixels sprinkled in.
pub fn full_range_cover(width: usize, height: usize, seed: u64) -> Carrier {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut plane = || {
        Plane::from_fn(width, height, |x, y| {
            if y < height / 8 {
                0.0
            } else if x < width / 8 {
                255.0
            } else {
                match rng.u8(..) {
                    0..=15 => 0.0,
                    240..=255 => 255.0,
                    _ => rng.u8(..) as f64,
                }
            }
        })
    };
    Carrier::from_planes(plane(), plane(), plane()).unwrap()
}

pub fn ascii_message(len: usize, seed: u64) -> String {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.u8(0x20..0x7f) as char).collect()
}
