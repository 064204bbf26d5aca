use crate::meta::QOI_CACHE_SIZE;

// An enumeration of the possible pixel "diffs", each with its bias applied so
// the values can be packed straight into a chunk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelDiff {
  // A `QOI_OP_DIFF` diff, each channel biased by +2.
  Color(u8, u8, u8),
  // A `QOI_OP_LUMA` diff, green biased by +32, red-green and blue-green
  // biased by +8.
  Luma(u8, u8, u8),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pixel {
  // Red channel value.
  pub r: u8,
  // Green channel value.
  pub g: u8,
  // Blue channel value.
  pub b: u8,
  // Alpha channel value.
  pub a: u8,
}

// The pixel assumed to precede the first pixel of every image.
impl Default for Pixel {
  fn default() -> Self {
    Self { r: 0, g: 0, b: 0, a: 255 }
  }
}

impl Pixel {
  pub const ZERO: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

  // Builds a pixel from a 4 byte RGBA chunk of a pixel buffer.
  pub fn from_rgba(chunk: &[u8]) -> Self {
    Self { r: chunk[0], g: chunk[1], b: chunk[2], a: chunk[3] }
  }

  pub fn is_opaque(&self) -> bool {
    self.a == u8::MAX
  }

  // Attempts to produce a `PixelDiff` against the provided `other` pixel.
  // Returns `Some(PixelDiff)` when there is a diff within range, otherwise
  // `None` is returned. Alpha is never delta encoded, so pixels with
  // different alpha values never produce a diff.
  pub fn diff(&self, other: &Pixel) -> Option<PixelDiff> {
    if self.a != other.a {
      return None;
    }

    let diff_r = self.r.wrapping_sub(other.r);
    let diff_g = self.g.wrapping_sub(other.g);
    let diff_b = self.b.wrapping_sub(other.b);

    let color_r = diff_r.wrapping_add(2);
    let color_g = diff_g.wrapping_add(2);
    let color_b = diff_b.wrapping_add(2);

    if color_r < 4 && color_g < 4 && color_b < 4 {
      return Some(PixelDiff::Color(color_r, color_g, color_b));
    }

    let luma_g = diff_g.wrapping_add(32);
    let luma_rg = diff_r.wrapping_sub(diff_g).wrapping_add(8);
    let luma_bg = diff_b.wrapping_sub(diff_g).wrapping_add(8);

    if luma_g < 64 && luma_rg < 16 && luma_bg < 16 {
      return Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg));
    }

    None
  }

  // QOI color hash, reduced to a slot of the color cache. Not implemented via
  // the `Hash` trait since it is only meaningful as a cache position.
  pub fn cache_index(&self) -> usize {
    let r = self.r as usize;
    let g = self.g as usize;
    let b = self.b as usize;
    let a = self.a as usize;

    (r * 3 + g * 5 + b * 7 + a * 11) % QOI_CACHE_SIZE
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cache_index() {
    assert_eq!(Pixel { r: 101, g: 102, b: 103, a: 104 }.cache_index(), 54);
    assert_eq!(Pixel::default().cache_index(), 53);
    assert_eq!(Pixel::ZERO.cache_index(), 0);
    assert_eq!(Pixel { r: 255, g: 255, b: 255, a: 255 }.cache_index(), 38);
  }

  #[test]
  fn test_color_diff_bounds() {
    let prev = Pixel { r: 100, g: 100, b: 100, a: 255 };

    assert_eq!(
      Pixel { r: 98, g: 101, b: 100, a: 255 }.diff(&prev),
      Some(PixelDiff::Color(0, 3, 2))
    );
    assert_eq!(
      Pixel { r: 102, g: 100, b: 100, a: 255 }.diff(&prev),
      Some(PixelDiff::Luma(32, 10, 8))
    );
  }

  #[test]
  fn test_color_diff_wraps() {
    let prev = Pixel { r: 255, g: 0, b: 0, a: 255 };
    let pixel = Pixel { r: 0, g: 254, b: 1, a: 255 };

    // 0 - 255 wraps to +1, 254 - 0 wraps to -2.
    assert_eq!(pixel.diff(&prev), Some(PixelDiff::Color(3, 0, 3)));
  }

  #[test]
  fn test_luma_diff_bounds() {
    let prev = Pixel { r: 100, g: 100, b: 100, a: 255 };

    assert_eq!(
      Pixel { r: 60, g: 68, b: 75, a: 255 }.diff(&prev),
      Some(PixelDiff::Luma(0, 0, 15))
    );
    assert_eq!(
      Pixel { r: 138, g: 131, b: 131, a: 255 }.diff(&prev),
      Some(PixelDiff::Luma(63, 15, 8))
    );
    assert_eq!(Pixel { r: 139, g: 131, b: 131, a: 255 }.diff(&prev), None);
    assert_eq!(Pixel { r: 100, g: 132, b: 100, a: 255 }.diff(&prev), None);
  }

  #[test]
  fn test_diff_requires_equal_alpha() {
    let prev = Pixel { r: 100, g: 100, b: 100, a: 255 };

    assert_eq!(Pixel { r: 100, g: 100, b: 100, a: 254 }.diff(&prev), None);
  }
}
