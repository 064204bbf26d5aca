use crate::error::Error;

pub const QOI_BYTES_END: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
pub const QOI_BYTES_MAGIC: &[u8; 4] = b"qoif";
pub const QOI_CACHE_SIZE: usize = 64;
pub const QOI_HEADER_LEN: usize = 14;
pub const QOI_MAX_RUN: u8 = 62;

/// The fixed 14 byte header that starts every QOI image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
  /// Whether any pixel of the image carries transparency, see [Channels].
  /// This is informative only and does not change how pixels are encoded.
  pub channels: Channels,
  /// The image's colorspace, see [Colorspace].
  pub colorspace: Colorspace,
  /// The image's height.
  pub height: u32,
  /// The image's width.
  pub width: u32,
}

impl Header {
  /// Returns the total number of pixels that make up the image.
  pub fn num_pixels(&self) -> u64 {
    self.width as u64 * self.height as u64
  }

  /// Serializes the header: magic, big-endian width and height, channels and
  /// colorspace.
  pub fn to_bytes(&self) -> [u8; QOI_HEADER_LEN] {
    let mut bytes = [0; QOI_HEADER_LEN];

    bytes[..4].copy_from_slice(QOI_BYTES_MAGIC);
    bytes[4..8].copy_from_slice(&self.width.to_be_bytes());
    bytes[8..12].copy_from_slice(&self.height.to_be_bytes());
    bytes[12] = self.channels as u8;
    bytes[13] = self.colorspace as u8;

    bytes
  }
}

/// The channel count advertised in the header. `Rgb` when every pixel is
/// fully opaque, otherwise `Rgba`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Channels {
  Rgb = 3,
  Rgba = 4,
}

/// How an image's color channels should be interpreted. The encoder passes
/// this through to the header untouched.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Colorspace {
  /// sRGB color channels with a linear alpha channel.
  #[default]
  Srgb = 0,
  /// All channels linear.
  Linear = 1,
}

/// A `TryFrom` implemenation for converting any `u8` into a `Colorspace`.
/// `1` maps to `Colorspace::Linear`, and `0` maps to `Colorspace::Srgb`. All
/// other `u8` values are invalid.
impl TryFrom<u8> for Colorspace {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      0 => Ok(Colorspace::Srgb),
      1 => Ok(Colorspace::Linear),
      _ => Err(Error::InvalidColorspace(byte)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_header_bytes() {
    let header = Header {
      width: 800,
      height: 0x01020304,
      channels: Channels::Rgba,
      colorspace: Colorspace::Linear,
    };

    assert_eq!(
      header.to_bytes(),
      [b'q', b'o', b'i', b'f', 0, 0, 0x03, 0x20, 1, 2, 3, 4, 4, 1]
    );
  }

  #[test]
  fn test_num_pixels_does_not_overflow() {
    let header = Header {
      width: u32::MAX,
      height: u32::MAX,
      channels: Channels::Rgb,
      colorspace: Colorspace::Srgb,
    };

    assert_eq!(header.num_pixels(), u32::MAX as u64 * u32::MAX as u64);
  }

  #[test]
  fn test_colorspace_from_byte() {
    assert_eq!(Colorspace::try_from(0), Ok(Colorspace::Srgb));
    assert_eq!(Colorspace::try_from(1), Ok(Colorspace::Linear));
    assert_eq!(Colorspace::try_from(2), Err(Error::InvalidColorspace(2)));
  }
}
