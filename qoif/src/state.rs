use crate::meta::QOI_CACHE_SIZE;
use crate::pixel::Pixel;

// The running state maintained while encoding a single image.
pub struct State {
  // A direct-mapped cache of previously committed pixels, indexed by
  // `Pixel::cache_index`. Collisions overwrite.
  pub cache: [Pixel; QOI_CACHE_SIZE],
  // The last pixel committed to the output.
  pub prev_pixel: Pixel,
  // Number of pixels equal to `prev_pixel` that are not yet written out.
  pub run_count: u64,
}

impl State {
  pub fn new() -> Self {
    let prev_pixel = Pixel::default();
    let mut cache = [Pixel::ZERO; QOI_CACHE_SIZE];

    // Keep the cache consistent with the assumed pixel before the image.
    cache[prev_pixel.cache_index()] = prev_pixel;

    Self { cache, prev_pixel, run_count: 0 }
  }

  // Returns the cache slot of the given pixel if that slot currently holds
  // exactly this pixel.
  pub fn cache_lookup(&self, pixel: Pixel) -> Option<u8> {
    let index = pixel.cache_index();

    if self.cache[index] == pixel {
      return Some(index as u8);
    }

    None
  }

  // Records the given pixel as the last one written, overwriting whatever
  // was cached at its slot.
  pub fn commit(&mut self, pixel: Pixel) {
    self.cache[pixel.cache_index()] = pixel;
    self.prev_pixel = pixel;
  }
}
