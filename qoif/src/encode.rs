use std::path::Path;

use log::debug;

use crate::buffer::{ChunkBuffer, INITIAL_CHUNK_CAPACITY};
use crate::error::Error;
use crate::file::write_file;
use crate::meta::{Channels, Colorspace, Header, QOI_MAX_RUN};
use crate::op::Op;
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Encodes a flat buffer of row-major RGBA pixels into a complete QOI image
/// using the default [Encoder] settings.
///
/// `pixels` must hold exactly `width * height * 4` bytes. The header's
/// channel count is `3` when every pixel is fully opaque and `4` otherwise.
pub fn encode_image(
  pixels: &[u8],
  width: u32,
  height: u32,
  colorspace: Colorspace,
) -> Result<Vec<u8>, Error> {
  Encoder::new(colorspace).encode(pixels, width, height)
}

/// Encodes a flat buffer of row-major RGBA pixels and writes the resulting
/// QOI image to `path` using the default [Encoder] settings.
pub fn encode_file<P: AsRef<Path>>(
  path: P,
  pixels: &[u8],
  width: u32,
  height: u32,
  colorspace: Colorspace,
) -> Result<(), Error> {
  Encoder::new(colorspace).encode_to_file(path, pixels, width, height)
}

/// What the encoder does at the end of the pixel data when no run is left to
/// flush.
///
/// The reference encoder always runs one extra, fictitious `(0, 0, 0, 0)`
/// pixel through chunk selection after the last real pixel. That pixel flushes
/// any pending run, and otherwise produces one surplus chunk (usually an index
/// into slot 0) that decoders ignore since it lies past the last pixel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SentinelChunk {
  /// Write the surplus chunk, producing byte-identical output to the
  /// reference encoder.
  #[default]
  Emit,
  /// Only flush a pending run, never write the surplus chunk.
  Suppress,
}

/// Encoder settings.
///
/// ```rust
/// use qoif::{Colorspace, Encoder, SentinelChunk};
///
/// // A 1x2 image: an opaque red pixel above a half transparent one.
/// let pixels = [255, 0, 0, 255, 255, 0, 0, 128];
///
/// let encoded = Encoder::new(Colorspace::Srgb)
///   .sentinel_chunk(SentinelChunk::Suppress)
///   .encode(&pixels, 1, 2)
///   .expect("Failed to encode image");
///
/// assert_eq!(&encoded[..4], b"qoif");
/// assert_eq!(encoded[12], 4);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Encoder {
  colorspace: Colorspace,
  sentinel_chunk: SentinelChunk,
}

impl Encoder {
  pub fn new(colorspace: Colorspace) -> Self {
    Self { colorspace, sentinel_chunk: SentinelChunk::default() }
  }

  /// Sets the end of image behavior, see [SentinelChunk].
  pub fn sentinel_chunk(mut self, sentinel_chunk: SentinelChunk) -> Self {
    self.sentinel_chunk = sentinel_chunk;
    self
  }

  /// Encodes a flat buffer of `width * height` row-major RGBA pixels into a
  /// complete QOI image: header, chunks, and end marker.
  pub fn encode(&self, pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, Error> {
    check_pixel_data(pixels, width, height)?;

    let mut state = State::new();
    let mut buffer = ChunkBuffer::with_capacity(INITIAL_CHUNK_CAPACITY)?;
    let mut stats = ChunkStats::default();
    let mut has_alpha = false;

    for chunk in pixels.chunks_exact(4) {
      let pixel = Pixel::from_rgba(chunk);

      encode_pixel(&mut state, pixel, &mut buffer, &mut stats)?;
      has_alpha |= !pixel.is_opaque();
    }

    if state.run_count > 0 {
      flush_run(&mut state, &mut buffer, &mut stats)?;
    } else if self.sentinel_chunk == SentinelChunk::Emit {
      // Only the chunk is written, the running state is left untouched.
      select_op(&state, Pixel::ZERO).write_to(&mut buffer)?;
      stats.sentinel = true;
    }

    let header = Header {
      width,
      height,
      channels: if has_alpha { Channels::Rgba } else { Channels::Rgb },
      colorspace: self.colorspace,
    };

    debug!(
      "encoded {}x{} image with {} channels into {} chunk bytes: {}",
      width,
      height,
      header.channels as u8,
      buffer.chunk_len(),
      stats,
    );

    buffer.finish(&header)
  }

  /// Encodes the pixels like [Encoder::encode] and writes the QOI image to
  /// `path`, replacing any existing file.
  pub fn encode_to_file<P: AsRef<Path>>(
    &self,
    path: P,
    pixels: &[u8],
    width: u32,
    height: u32,
  ) -> Result<(), Error> {
    let bytes = self.encode(pixels, width, height)?;
    write_file(path.as_ref(), &bytes)
  }
}

// Ensures the pixel buffer holds exactly `width * height` RGBA pixels.
fn check_pixel_data(pixels: &[u8], width: u32, height: u32) -> Result<(), Error> {
  let expected = (width as usize)
    .checked_mul(height as usize)
    .and_then(|num_pixels| num_pixels.checked_mul(4))
    .ok_or(Error::DimensionsOverflow { width, height })?;

  if pixels.len() != expected {
    return Err(Error::PixelDataLength { width, height, expected, actual: pixels.len() });
  }

  Ok(())
}

// Attempts to encode the provided pixel using the QOI OP encoding scheme and
// provided `state`. Pixels equal to the previous one only extend the pending
// run, anything else first flushes that run and then is written as a single
// chunk.
fn encode_pixel(
  state: &mut State,
  pixel: Pixel,
  buffer: &mut ChunkBuffer,
  stats: &mut ChunkStats,
) -> Result<(), Error> {
  if pixel == state.prev_pixel {
    state.run_count += 1;
    return Ok(());
  }

  flush_run(state, buffer, stats)?;

  let op = select_op(state, pixel);
  op.write_to(buffer)?;
  stats.record(op);
  state.commit(pixel);

  Ok(())
}

// Writes the pending run as a sequence of `Op::Run` chunks of at most
// `QOI_MAX_RUN` pixels each, the last one holding the remainder.
fn flush_run(
  state: &mut State,
  buffer: &mut ChunkBuffer,
  stats: &mut ChunkStats,
) -> Result<(), Error> {
  while state.run_count > 0 {
    let run_count = state.run_count.min(QOI_MAX_RUN as u64) as u8;
    let op = Op::Run(run_count);

    op.write_to(buffer)?;
    stats.record(op);
    state.run_count -= run_count as u64;
  }

  Ok(())
}

// Picks the cheapest chunk for a pixel that does not continue a run.
fn select_op(state: &State, pixel: Pixel) -> Op {
  if let Some(index) = state.cache_lookup(pixel) {
    return Op::Index(index);
  }

  if pixel.a != state.prev_pixel.a {
    return Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a);
  }

  match pixel.diff(&state.prev_pixel) {
    Some(PixelDiff::Color(diff_r, diff_g, diff_b)) => Op::Color(diff_r, diff_g, diff_b),
    Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg)) => Op::Luma(luma_g, luma_rg, luma_bg),
    None => Op::Rgb(pixel.r, pixel.g, pixel.b),
  }
}

// Per-kind chunk counts of a single encode, for logging.
#[derive(Debug, Default)]
struct ChunkStats {
  color: u64,
  index: u64,
  luma: u64,
  rgb: u64,
  rgba: u64,
  run: u64,
  run_pixels: u64,
  sentinel: bool,
}

impl ChunkStats {
  fn record(&mut self, op: Op) {
    match op {
      Op::Color(..) => self.color += 1,
      Op::Index(..) => self.index += 1,
      Op::Luma(..) => self.luma += 1,
      Op::Rgb(..) => self.rgb += 1,
      Op::Rgba(..) => self.rgba += 1,
      Op::Run(..) => {
        self.run += 1;
        self.run_pixels += op.num_pixels();
      }
    }
  }
}

impl std::fmt::Display for ChunkStats {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} index, {} diff, {} luma, {} rgb, {} rgba, {} run ({} pixels), sentinel chunk: {}",
      self.index,
      self.color,
      self.luma,
      self.rgb,
      self.rgba,
      self.run,
      self.run_pixels,
      self.sentinel,
    )
  }
}
