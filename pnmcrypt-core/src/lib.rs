//! core functionality for encrypting and decrypting
//! ASCII PNM images with an LFSR keystream
//!
//! # Modules
//!
//! - `lfsr`: single-tap linear-feedback shift register
//! - `image`: in-memory raster image
//! - `codec`: P1/P2/P3 text format parsing and writing
//! - `cipher`: XOR of the pixel matrix with the keystream
//! - `seed`: password to seed bit-string conversion
//! - `filename`: file name and extension checks

pub mod cipher;
pub mod codec;
pub mod error;
pub mod filename;
pub mod image;
pub mod lfsr;
pub mod seed;

// Re-export commonly used items
pub use cipher::{WORD_BITS, encrypt_image};
pub use codec::{encode_pnm, load_pnm, parse_pnm, write_pnm, write_pnm_in, write_pnm_to};
pub use error::{
    ContentError, ImageError, LfsrError, LoadError, LoadErrorKind, NameError, SeedError,
    WriteError,
};
pub use filename::{check_file_name, file_extension};
pub use image::{RasterImage, Variant};
pub use lfsr::{Keystream, Lfsr};
pub use seed::password_to_seed;
