//! A minimal QOI decoder used to check encoder output.

#![allow(dead_code)]

use qoif::{QOI_BYTES_END, QOI_BYTES_MAGIC, QOI_HEADER_LEN};

#[derive(Debug)]
pub struct Decoded {
  pub width: u32,
  pub height: u32,
  pub channels: u8,
  pub colorspace: u8,
  // RGBA bytes of the first `width * height` pixels.
  pub pixels: Vec<u8>,
  // Pixels represented by each chunk that contributed to `pixels`.
  pub chunk_pixels: Vec<u64>,
  // Chunk bytes left over between the last pixel and the end marker.
  pub trailing: Vec<u8>,
}

fn cache_index(px: [u8; 4]) -> usize {
  (px[0] as usize * 3 + px[1] as usize * 5 + px[2] as usize * 7 + px[3] as usize * 11) % 64
}

// Decodes a QOI stream, panicking on anything malformed.
pub fn decode(bytes: &[u8]) -> Decoded {
  assert!(bytes.len() >= QOI_HEADER_LEN + QOI_BYTES_END.len(), "stream too short");
  assert_eq!(&bytes[..4], QOI_BYTES_MAGIC, "bad magic");
  assert_eq!(&bytes[bytes.len() - QOI_BYTES_END.len()..], &QOI_BYTES_END, "bad end marker");

  let width = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
  let height = u32::from_be_bytes(bytes[8..12].try_into().unwrap());
  let chunks = &bytes[QOI_HEADER_LEN..bytes.len() - QOI_BYTES_END.len()];
  let num_pixels = width as u64 * height as u64;

  let mut cache = [[0u8; 4]; 64];
  let mut prev = [0, 0, 0, 255];
  let mut pixels = Vec::with_capacity(num_pixels as usize * 4);
  let mut chunk_pixels = Vec::new();
  let mut decoded = 0u64;
  let mut pos = 0;

  while decoded < num_pixels {
    assert!(pos < chunks.len(), "ran out of chunks after {} pixels", decoded);

    let byte = chunks[pos];
    let mut count = 1;
    let px = match byte {
      0xfe => {
        pos += 4;
        [chunks[pos - 3], chunks[pos - 2], chunks[pos - 1], prev[3]]
      }
      0xff => {
        pos += 5;
        [chunks[pos - 4], chunks[pos - 3], chunks[pos - 2], chunks[pos - 1]]
      }
      _ => match byte & 0xc0 {
        0x00 => {
          pos += 1;
          cache[(byte & 0x3f) as usize]
        }
        0x40 => {
          pos += 1;
          [
            prev[0].wrapping_add((byte >> 4 & 0x03).wrapping_sub(2)),
            prev[1].wrapping_add((byte >> 2 & 0x03).wrapping_sub(2)),
            prev[2].wrapping_add((byte & 0x03).wrapping_sub(2)),
            prev[3],
          ]
        }
        0x80 => {
          let next = chunks[pos + 1];
          pos += 2;
          let diff_g = (byte & 0x3f).wrapping_sub(32);
          [
            prev[0].wrapping_add(diff_g).wrapping_add((next >> 4).wrapping_sub(8)),
            prev[1].wrapping_add(diff_g),
            prev[2].wrapping_add(diff_g).wrapping_add((next & 0x0f).wrapping_sub(8)),
            prev[3],
          ]
        }
        _ => {
          pos += 1;
          count = (byte & 0x3f) as u64 + 1;
          prev
        }
      },
    };

    for _ in 0..count {
      pixels.extend_from_slice(&px);
    }

    cache[cache_index(px)] = px;
    prev = px;
    decoded += count;
    chunk_pixels.push(count);
  }

  Decoded {
    width,
    height,
    channels: bytes[12],
    colorspace: bytes[13],
    pixels,
    chunk_pixels,
    trailing: chunks[pos..].to_vec(),
  }
}

// Builds an RGBA image from arbitrary bytes, three bytes per pixel. The first
// byte picks how the pixel relates to the previous one so that every chunk
// kind shows up: repeats, small deltas, a tiny palette, alpha changes, and
// fully random pixels.
pub fn build_image(seed: &[u8], num_pixels: usize) -> Vec<u8> {
  const PALETTE: [[u8; 4]; 4] = [
    [0, 0, 0, 255],
    [255, 255, 255, 255],
    [200, 30, 30, 255],
    [0, 0, 0, 0],
  ];

  let mut pixels = Vec::with_capacity(num_pixels * 4);
  let mut prev = [0u8, 0, 0, 255];

  for i in 0..num_pixels {
    let pick = |offset: usize| seed.get((i * 3 + offset) % seed.len().max(1)).copied().unwrap_or(0);
    let (kind, x, y) = (pick(0), pick(1), pick(2));

    let px = match kind % 6 {
      0 | 1 => prev,
      2 => [
        prev[0].wrapping_add(x % 4).wrapping_sub(2),
        prev[1].wrapping_add(y % 64).wrapping_sub(32),
        prev[2].wrapping_add(x % 16).wrapping_sub(8),
        prev[3],
      ],
      3 => PALETTE[(x % 4) as usize],
      4 => [prev[0], prev[1], prev[2], y],
      _ => [x, y, x ^ y, if kind & 0x80 == 0 { 255 } else { x }],
    };

    pixels.extend_from_slice(&px);
    prev = px;
  }

  pixels
}
