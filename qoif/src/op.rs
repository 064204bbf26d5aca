use crate::buffer::ChunkBuffer;
use crate::error::Error;

// An enumeration of each possible QOI encoding "chunk", or Op.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
  // `QOI_OP_DIFF`, contains the red, green, and blue color difference from the
  // previous pixel with a bias of +2.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 1 |  dr |  dg |  db  |
  //
  Color(u8, u8, u8),

  // `QOI_OP_INDEX`, index into the state's pixel cache.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 0 |      index       |
  //
  Index(u8),

  // `QOI_OP_LUMA`, contains the red, green, and blue luma difference from the
  // previous pixel. The green difference has a bias of +32, the red-green, and
  // blue-green difference has a bias of +8.
  //
  // | 7 6   5  4  3  2  1  0 | 7  6  5  4   3  2  1  0 |
  // |------------------------|-------------------------|
  // | 1 0 |       dg         |   dr - dg  |   db - dg  |
  //
  Luma(u8, u8, u8),

  // `QOI_OP_RGB`, contains the red, green, and blue values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|
  // | 1  1  1  1  1  1  1  0 |   r  |   g  |   b  |
  //
  Rgb(u8, u8, u8),

  // `QOI_OP_RGBA`, contains the red, green, blue, and alpha values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|------|
  // | 1  1  1  1  1  1  1  1 |   r  |   g  |   b  |   a  |
  //
  Rgba(u8, u8, u8, u8),

  // `QOI_OP_RUN`, contains the length of the run (1..=62) stored with a bias
  // of -1.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 1 1 |      run         |
  Run(u8),
}

impl Op {
  const TAG_COLOR: u8 = 0x40;
  const TAG_INDEX: u8 = 0x00;
  const TAG_LUMA: u8 = 0x80;
  const TAG_RGB: u8 = 0xfe;
  const TAG_RGBA: u8 = 0xff;
  const TAG_RUN: u8 = 0xc0;

  // Encodes the `Op` and appends its bytes to the given buffer.
  pub fn write_to(self, buffer: &mut ChunkBuffer) -> Result<(), Error> {
    match self {
      Op::Color(diff_r, diff_g, diff_b) => {
        buffer.push(&[Op::TAG_COLOR | (diff_r << 4) | (diff_g << 2) | diff_b])
      }
      Op::Index(index) => {
        buffer.push(&[Op::TAG_INDEX | index])
      }
      Op::Luma(luma_g, luma_rg, luma_bg) => {
        buffer.push(&[Op::TAG_LUMA | luma_g, (luma_rg << 4) | luma_bg])
      }
      Op::Rgb(r, g, b) => {
        buffer.push(&[Op::TAG_RGB, r, g, b])
      }
      Op::Rgba(r, g, b, a) => {
        buffer.push(&[Op::TAG_RGBA, r, g, b, a])
      }
      Op::Run(run_count) => {
        buffer.push(&[Op::TAG_RUN | (run_count - 1)])
      }
    }
  }

  // The number of pixels this chunk stands for.
  pub fn num_pixels(&self) -> u64 {
    match self {
      Op::Run(run_count) => *run_count as u64,
      _ => 1,
    }
  }
}
