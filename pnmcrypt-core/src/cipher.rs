/// XOR stream cipher over the pixel matrix
use tracing::info;

use crate::image::RasterImage;
use crate::lfsr::Lfsr;

/// Bits drawn from the register for each sample
pub const WORD_BITS: u32 = 32;

/// XOR every sample, row-major, with the next 32-bit keystream word.
///
/// Running it again with a fresh register built from the same seed and tap
/// restores the original samples. For grayscale and color images the max
/// value becomes the largest sample as it will be written (low 16 bits).
pub fn encrypt_image(image: &mut RasterImage, lfsr: &mut Lfsr) {
    let track_max = image.variant().has_max_value();
    let mut max_value: u16 = 0;

    for (sample, word) in image.samples_mut().iter_mut().zip(lfsr.keystream(WORD_BITS)) {
        *sample ^= word;
        if track_max {
            max_value = max_value.max(*sample as u16);
        }
    }

    if track_max {
        image.set_max_value(u32::from(max_value));
    }

    info!("{} samples encrypted", image.samples().len());
}
