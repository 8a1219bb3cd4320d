/// ASCII PNM (P1/P2/P3) parsing and serialization
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{ContentError, LoadError, WriteError};
use crate::filename::{check_file_name, file_extension};
use crate::image::{RasterImage, Variant, sample_count};

/// Longest magic token read from line 1
const MAGIC_LEN: usize = 2;

/// Load an image from disk.
///
/// The extension of the file name must exist and agree with the magic
/// number found inside the file.
pub fn load_pnm(path: impl AsRef<Path>) -> Result<RasterImage, LoadError> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file_extension(&name)?;

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match parse_pnm(&bytes, extension) {
        Ok(image) => {
            info!(
                path = %path.display(),
                "image loaded: {} {}x{}",
                image.variant(),
                image.width(),
                image.height()
            );
            Ok(image)
        }
        Err(e) => {
            warn!(path = %path.display(), "unable to load image: {e}");
            Err(e)
        }
    }
}

/// Parse PNM text.
///
/// `extension` is the hint derived from the file name ("pbm", "pgm" or
/// "ppm"); it is checked against the magic number before any pixel is read.
/// Either the whole image is returned or nothing.
pub fn parse_pnm(input: &[u8], extension: &str) -> Result<RasterImage, LoadError> {
    let mut parser = PnmParser::new(input);

    parser.skip_to_data()?;
    if parser.line > 1 {
        return Err(ContentError::MagicNotOnFirstLine.into());
    }
    let magic = parser.read_magic();
    let variant = Variant::from_magic(&magic).ok_or(ContentError::UnknownMagic(magic))?;

    if extension != variant.extension() {
        return Err(LoadError::ExtensionMismatch {
            extension: extension.to_string(),
            magic: variant.magic(),
        });
    }
    debug!("magic number {variant}");

    parser.skip_to_data()?;
    let width = parser.read_u32();
    let height = match width {
        Some(_) => parser.skip_to_data().ok().and_then(|()| parser.read_u32()),
        None => None,
    };
    let (Some(width), Some(height)) = (width, height) else {
        return Err(ContentError::MissingDimensions { line: parser.line }.into());
    };
    if width == 0 || height == 0 {
        return Err(ContentError::InvalidDimensions { width, height }.into());
    }
    debug!("dimensions {width}x{height}");

    let max_value = if variant.has_max_value() {
        parser.skip_to_data()?;
        let max = parser
            .read_u32()
            .ok_or(ContentError::MissingMaxValue { line: parser.line })?;
        debug!("max sample value {max}");
        Some(max)
    } else {
        None
    };

    let samples = parser.read_samples(variant, width, height)?;

    Ok(RasterImage::from_parts(
        variant, width, height, max_value, samples,
    ))
}

/// Serialize an image to PNM text.
///
/// Every sample is truncated to 16 bits on output.
pub fn encode_pnm(image: &RasterImage) -> String {
    let mut output = String::new();

    output.push_str(image.variant().magic());
    output.push('\n');

    output.push_str(&format!("{} {}\n", image.width(), image.height()));

    if let Some(max) = image.max_value() {
        output.push_str(&max.to_string());
        output.push('\n');
    }

    for row in image.rows() {
        for (i, &sample) in row.iter().enumerate() {
            if i > 0 {
                output.push(' ');
            }
            output.push_str(&(sample as u16).to_string());
        }
        output.push('\n');
    }

    output
}

/// Serialize an image into any writer
pub fn write_pnm_to<W: Write>(image: &RasterImage, mut out: W) -> io::Result<()> {
    out.write_all(encode_pnm(image).as_bytes())?;
    out.flush()
}

/// Write an image into the working directory under `name`
pub fn write_pnm(image: &RasterImage, name: &str) -> Result<(), WriteError> {
    write_pnm_in(image, Path::new("."), name)
}

/// Write an image into `dir` under `name`.
///
/// `name` must pass [`check_file_name`]; nothing is touched on disk when it
/// does not.
pub fn write_pnm_in(image: &RasterImage, dir: &Path, name: &str) -> Result<(), WriteError> {
    if let Err(e) = check_file_name(name) {
        warn!("refusing output file name: {e}");
        return Err(e.into());
    }

    let path = dir.join(name);
    fs::write(&path, encode_pnm(image)).map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "image stored");
    Ok(())
}

/// Cursor over the raw bytes, tracking the current line for diagnostics
struct PnmParser<'a> {
    input: &'a [u8],
    pos: usize,
    line: u32,
}

impl<'a> PnmParser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    /// Move to the next visible byte outside a comment.
    ///
    /// `#` discards everything up to and including the end of the line.
    fn skip_to_data(&mut self) -> Result<(), ContentError> {
        loop {
            loop {
                let Some(b) = self.peek() else {
                    return Err(ContentError::NoMoreData { line: self.line });
                };
                if b == b'\n' || b == b'\r' {
                    self.line += 1;
                }
                if b.is_ascii_graphic() {
                    break;
                }
                self.pos += 1;
            }

            if self.peek() != Some(b'#') {
                return Ok(());
            }

            loop {
                let Some(b) = self.next() else {
                    return Err(ContentError::NoMoreData { line: self.line });
                };
                if b == b'\n' || b == b'\r' {
                    self.line += 1;
                    break;
                }
            }
        }
    }

    /// Up to [`MAGIC_LEN`] bytes, stopping at a comment
    fn read_magic(&mut self) -> String {
        let start = self.pos;
        while self.pos - start < MAGIC_LEN {
            match self.peek() {
                Some(b) if b != b'#' => self.pos += 1,
                _ => break,
            }
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    /// Unsigned decimal integer; `None` when no digit is present or it overflows
    fn read_u32(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.input[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }

    /// Fill the pixel matrix row-major
    fn read_samples(
        &mut self,
        variant: Variant,
        width: u32,
        height: u32,
    ) -> Result<Vec<u32>, LoadError> {
        let per_row = (width as usize).saturating_mul(variant.channels());
        let total = sample_count(variant, width, height);

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(total)
            .map_err(|_| LoadError::Allocation { samples: total })?;

        for row in 1..=height as usize {
            for col in 1..=per_row {
                if self.skip_to_data().is_err() {
                    return Err(ContentError::MissingPixel {
                        row,
                        col,
                        line: self.line,
                    }
                    .into());
                }
                let Some(value) = self.read_u32() else {
                    return Err(ContentError::InvalidPixel {
                        row,
                        col,
                        line: self.line,
                    }
                    .into());
                };
                samples.push(value);
            }
        }

        Ok(samples)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }
}
