//! Error types for the pnmcrypt library.
//!
//! Every fallible operation returns one of these to its immediate caller.
//! Nothing in the library aborts the process.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons an [`Lfsr`](crate::Lfsr) cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LfsrError {
    #[error("seed is empty")]
    EmptySeed,

    #[error("tap {tap} out of bounds for a register of {len} bits")]
    TapOutOfRange { tap: usize, len: usize },

    #[error("[{ch}] at index {index} isn't allowed in a seed, only 1's and 0's are")]
    InvalidSeedChar { ch: char, index: usize },
}

/// Password character outside the seed alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("character [{ch}] at index {index} isn't allowed in a password")]
    InvalidChar { ch: char, index: usize },
}

/// Rejected file names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("file name [{0}] does not contain an extension")]
    MissingExtension(String),

    #[error("file name [{0}] contains more than one [.]")]
    TooManyDots(String),

    #[error("file name [{name}] contains the forbidden character [{ch}]")]
    ForbiddenChar { name: String, ch: char },
}

/// Malformed image content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("unexpected end of data around line {line}")]
    NoMoreData { line: u32 },

    #[error("the file has to begin with the magic number at line 1")]
    MagicNotOnFirstLine,

    #[error("unknown magic number [{0}]")]
    UnknownMagic(String),

    #[error("unable to read the number of columns and lines (line {line})")]
    MissingDimensions { line: u32 },

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unable to read the max sample value (line {line})")]
    MissingMaxValue { line: u32 },

    #[error("no more pixels to read at [{row}, {col}], around line {line}")]
    MissingPixel { row: usize, col: usize, line: u32 },

    #[error("no number to read at [{row}, {col}], around line {line}")]
    InvalidPixel { row: usize, col: usize, line: u32 },
}

/// Coarse categories of [`LoadError`] exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Opening, reading or allocating failed.
    Resource,
    /// Missing extension or extension/magic mismatch.
    Naming,
    /// Malformed file content.
    Content,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read [{}]", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to allocate {samples} samples for the image")]
    Allocation { samples: usize },

    #[error(transparent)]
    Name(#[from] NameError),

    #[error("file extension [{extension}] does not match the magic number [{magic}]")]
    ExtensionMismatch {
        extension: String,
        magic: &'static str,
    },

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::Io { .. } | Self::Allocation { .. } => LoadErrorKind::Resource,
            Self::Name(_) | Self::ExtensionMismatch { .. } => LoadErrorKind::Naming,
            Self::Content(_) => LoadErrorKind::Content,
        }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("invalid output file name")]
    InvalidName(#[from] NameError),

    #[error("unable to write [{}]", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Shape violations when assembling a [`RasterImage`](crate::RasterImage) by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("expected {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },

    #[error("{0} images carry no max sample value")]
    UnexpectedMaxValue(&'static str),

    #[error("{0} images need a max sample value")]
    MissingMaxValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_kinds() {
        let io = LoadError::Io {
            path: PathBuf::from("missing.ppm"),
            source: io::Error::new(io::ErrorKind::NotFound, "nope"),
        };
        assert_eq!(io.kind(), LoadErrorKind::Resource);
        assert_eq!(
            LoadError::Allocation { samples: 1 }.kind(),
            LoadErrorKind::Resource
        );
        assert_eq!(
            LoadError::from(NameError::MissingExtension("img".into())).kind(),
            LoadErrorKind::Naming
        );
        let mismatch = LoadError::ExtensionMismatch {
            extension: "pgm".into(),
            magic: "P1",
        };
        assert_eq!(mismatch.kind(), LoadErrorKind::Naming);
        assert_eq!(
            LoadError::from(ContentError::MagicNotOnFirstLine).kind(),
            LoadErrorKind::Content
        );
    }

    #[test]
    fn test_display_messages() {
        let err = LfsrError::TapOutOfRange { tap: 8000, len: 11 };
        assert_eq!(
            err.to_string(),
            "tap 8000 out of bounds for a register of 11 bits"
        );

        let err = ContentError::MissingPixel {
            row: 2,
            col: 3,
            line: 5,
        };
        assert_eq!(
            err.to_string(),
            "no more pixels to read at [2, 3], around line 5"
        );

        let err = LoadError::ExtensionMismatch {
            extension: "pgm".into(),
            magic: "P1",
        };
        assert_eq!(
            err.to_string(),
            "file extension [pgm] does not match the magic number [P1]"
        );
    }
}
