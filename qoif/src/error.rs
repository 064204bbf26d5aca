use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An enumeration of all error values this crate may produce.
#[derive(Debug, Error)]
pub enum Error {
  /// Growing the buffer holding the encoded image failed.
  #[error("failed to allocate {requested} bytes for the encoded image")]
  Allocation {
    requested: usize,
    #[source]
    source: TryReserveError,
  },

  /// Creating, writing, or closing the destination file failed.
  #[error("failed to write encoded image to `{}`", .path.display())]
  FileWrite {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to derive a supported colorspace from a byte.
  #[error("invalid image colorspace {0}, expected 0 for sRGB or 1 for linear")]
  InvalidColorspace(u8),

  /// The image's byte size does not fit in memory on this platform.
  #[error("image dimensions {width}x{height} are too large")]
  DimensionsOverflow { width: u32, height: u32 },

  /// The pixel buffer is not exactly `width * height * 4` bytes.
  #[error(
    "expected {expected} bytes of RGBA pixel data for a {width}x{height} image, received {actual}"
  )]
  PixelDataLength {
    width: u32,
    height: u32,
    expected: usize,
    actual: usize,
  },
}

impl Error {
  /// Numeric code for the error: `1` for allocation failures, `2` for file
  /// writing failures, and `3` for invalid input.
  pub fn code(&self) -> u32 {
    match self {
      Error::Allocation { .. } => 1,
      Error::FileWrite { .. } => 2,
      Error::InvalidColorspace(..)
      | Error::DimensionsOverflow { .. }
      | Error::PixelDataLength { .. } => 3,
    }
  }
}

#[cfg(test)]
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Error::Allocation { requested: a, .. }, Error::Allocation { requested: b, .. }) => a == b,
      (Error::FileWrite { path: a, .. }, Error::FileWrite { path: b, .. }) => a == b,
      (Error::InvalidColorspace(a), Error::InvalidColorspace(b)) => a == b,
      (
        Error::DimensionsOverflow { width: wa, height: ha },
        Error::DimensionsOverflow { width: wb, height: hb },
      ) => wa == wb && ha == hb,
      (
        Error::PixelDataLength { expected: ea, actual: aa, .. },
        Error::PixelDataLength { expected: eb, actual: ab, .. },
      ) => ea == eb && aa == ab,
      _ => false,
    }
  }
}
