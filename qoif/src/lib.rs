//! This crate implements an encoder for the
//! [QOI image format](https://qoiformat.org).
//!
//! The two primary exports are the `encode_image` and `encode_file`
//! functions. Both take an already decoded image as a flat buffer of
//! row-major RGBA bytes, four per pixel, along with the image's dimensions.
//! `encode_image` returns the complete QOI stream in memory, `encode_file`
//! writes it to a path.
//!
//! To keep this crate simple, it does not decode other image formats. To
//! encode an image, it will first need to be decoded using another method.
//! Use [Encoder] to change how the end of the image is encoded, see
//! [SentinelChunk].
//!
//! # In-memory encode example
//!
//! ```rust
//! use qoif::{encode_image, Colorspace};
//!
//! // A 1x1 representation of an image's pixel data made up of an opaque black pixel.
//! let image_source = vec![0, 0, 0, 255];
//!
//! match encode_image(&image_source, 1, 1, Colorspace::Srgb) {
//!   Ok(image_destination) => {
//!     // `image_destination` contains the encoded QOI image bytes.
//!     assert_eq!(&image_destination[..4], b"qoif");
//!   }
//!   Err(e) => {
//!     // See `error.rs` for all possible errors.
//!     panic!("{}", e);
//!   }
//! }
//! ```
//!
//! # File encode example
//!
//! ```rust,no_run
//! use qoif::{encode_file, Colorspace};
//!
//! // A 2x1 image made up of a red and a transparent pixel.
//! let image_source = [255, 0, 0, 255, 0, 0, 0, 0];
//!
//! if let Err(e) = encode_file("./image.qoi", &image_source, 2, 1, Colorspace::Srgb) {
//!   eprintln!("error: {} - {}", e.code(), e);
//! }
//! ```

pub use crate::encode::{encode_file, encode_image, Encoder, SentinelChunk};
pub use crate::error::Error;
pub use crate::meta::{
  Channels, Colorspace, Header, QOI_BYTES_END, QOI_BYTES_MAGIC, QOI_CACHE_SIZE, QOI_HEADER_LEN,
  QOI_MAX_RUN,
};

mod buffer;
mod encode;
mod error;
mod file;
mod meta;
mod op;
mod pixel;
mod state;
