/// In-memory PNM raster: variant, dimensions and a flat sample buffer
use std::fmt;

use crate::error::ImageError;

/// The three ASCII PNM flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// P1, one 0/1 sample per pixel, no max value
    Bitmap,
    /// P2, one sample per pixel
    Grayscale,
    /// P3, interleaved R G B samples
    Color,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Bitmap, Variant::Grayscale, Variant::Color];

    pub fn from_magic(magic: &str) -> Option<Self> {
        match magic {
            "P1" => Some(Self::Bitmap),
            "P2" => Some(Self::Grayscale),
            "P3" => Some(Self::Color),
            _ => None,
        }
    }

    pub fn magic(self) -> &'static str {
        match self {
            Self::Bitmap => "P1",
            Self::Grayscale => "P2",
            Self::Color => "P3",
        }
    }

    /// File extension paired with this magic number
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bitmap => "pbm",
            Self::Grayscale => "pgm",
            Self::Color => "ppm",
        }
    }

    /// Samples per pixel
    pub fn channels(self) -> usize {
        match self {
            Self::Color => 3,
            Self::Bitmap | Self::Grayscale => 1,
        }
    }

    pub fn has_max_value(self) -> bool {
        !matches!(self, Self::Bitmap)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.magic())
    }
}

/// A parsed image.
///
/// Samples are stored row-major in one buffer; sample `(row, col)` lives at
/// `row * samples_per_row() + col`. `max_value` is `Some` exactly for
/// grayscale and color images. It is not enforced against the samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    variant: Variant,
    width: u32,
    height: u32,
    max_value: Option<u32>,
    samples: Vec<u32>,
}

impl RasterImage {
    pub fn new(
        variant: Variant,
        width: u32,
        height: u32,
        max_value: Option<u32>,
        samples: Vec<u32>,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroDimension { width, height });
        }
        match (variant.has_max_value(), max_value) {
            (true, None) => return Err(ImageError::MissingMaxValue(variant.magic())),
            (false, Some(_)) => return Err(ImageError::UnexpectedMaxValue(variant.magic())),
            _ => {}
        }

        let expected = sample_count(variant, width, height);
        if samples.len() != expected {
            return Err(ImageError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self::from_parts(variant, width, height, max_value, samples))
    }

    /// Assemble without checks; the codec has already validated the shape
    pub(crate) fn from_parts(
        variant: Variant,
        width: u32,
        height: u32,
        max_value: Option<u32>,
        samples: Vec<u32>,
    ) -> Self {
        Self {
            variant,
            width,
            height,
            max_value,
            samples,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_value(&self) -> Option<u32> {
        self.max_value
    }

    pub(crate) fn set_max_value(&mut self, max_value: u32) {
        if self.variant.has_max_value() {
            self.max_value = Some(max_value);
        }
    }

    /// `width` for bitmap/grayscale, `3 * width` for color
    pub fn samples_per_row(&self) -> usize {
        self.width as usize * self.variant.channels()
    }

    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u32] {
        &mut self.samples
    }

    pub fn row(&self, row: usize) -> Option<&[u32]> {
        let stride = self.samples_per_row();
        let start = row.checked_mul(stride)?;
        self.samples.get(start..start.checked_add(stride)?)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.samples.chunks_exact(self.samples_per_row())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.row(row)?.get(col).copied()
    }
}

/// Number of samples an image of this shape holds, saturating on overflow
pub(crate) fn sample_count(variant: Variant, width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(variant.channels())
        .saturating_mul(height as usize)
}
