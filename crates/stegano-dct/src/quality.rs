//! Distortion metrics between a cover and its stego carrier.

use crate::carrier::{Carrier, MAX_SAMPLE};
use crate::error::{Result, SteganoError};
use crate::options::Channel;

const CHANNELS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

/// Mean squared error over all samples of all three channels.
pub fn mse(cover: &Carrier, stego: &Carrier) -> Result<f64> {
    if cover.width() != stego.width() || cover.height() != stego.height() {
        return Err(SteganoError::invalid_input(format!(
            "cannot compare {}x{} with {}x{}",
            cover.width(),
            cover.height(),
            stego.width(),
            stego.height()
        )));
    }

    let mut sum = 0.0;
    for channel in CHANNELS {
        sum += cover
            .plane(channel)
            .samples()
            .iter()
            .zip(stego.plane(channel).samples())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>();
    }

    Ok(sum / (cover.width() * cover.height() * CHANNELS.len()) as f64)
}

/// Peak signal-to-noise ratio in dB, `None` if the carriers are identical.
pub fn psnr(cover: &Carrier, stego: &Carrier) -> Result<Option<f64>> {
    let mse = mse(cover, stego)?;
    if mse == 0.0 {
        return Ok(None);
    }
    Ok(Some(10.0 * (MAX_SAMPLE * MAX_SAMPLE / mse).log10()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(value: f64) -> Carrier {
        Carrier::from_interleaved(2, 2, 1, &[value; 4]).unwrap()
    }

    #[test]
    fn identical_carriers_have_no_psnr() {
        let c = flat(100.0);
        assert_eq!(mse(&c, &c).unwrap(), 0.0);
        assert_eq!(psnr(&c, &c).unwrap(), None);
    }

    #[test]
    fn uniform_offset() {
        let (a, b) = (flat(100.0), flat(102.0));
        assert_eq!(mse(&a, &b).unwrap(), 4.0);

        let expected = 10.0 * (255.0f64 * 255.0 / 4.0).log10();
        assert!((psnr(&a, &b).unwrap().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn differing_sizes_are_rejected() {
        let a = flat(0.0);
        let b = Carrier::from_interleaved(1, 2, 1, &[0.0; 2]).unwrap();
        assert!(matches!(
            psnr(&a, &b),
            Err(SteganoError::InvalidInput { .. })
        ));
    }
}
