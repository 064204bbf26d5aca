use log::trace;

use crate::error::Error;
use crate::meta::{Header, QOI_BYTES_END, QOI_HEADER_LEN};

// Number of chunk bytes the buffer can hold before its first reallocation.
pub const INITIAL_CHUNK_CAPACITY: usize = 1024;

// An append-only byte buffer holding an encoded image. Space for the header is
// reserved up front and filled in by `finish`, once the channel count is
// known. Every allocation goes through `try_reserve_exact` so running out of
// memory is reported as `Error::Allocation` instead of aborting.
pub struct ChunkBuffer {
  bytes: Vec<u8>,
}

impl ChunkBuffer {
  pub fn with_capacity(chunk_capacity: usize) -> Result<Self, Error> {
    let requested = QOI_HEADER_LEN.saturating_add(chunk_capacity);
    let mut bytes = Vec::new();

    bytes
      .try_reserve_exact(requested)
      .map_err(|source| Error::Allocation { requested, source })?;
    bytes.resize(QOI_HEADER_LEN, 0);

    Ok(Self { bytes })
  }

  // Appends the given bytes, doubling the allocation as many times as it takes
  // to fit them.
  pub fn push(&mut self, data: &[u8]) -> Result<(), Error> {
    let needed = self.bytes.len() + data.len();
    let capacity = self.bytes.capacity();

    if needed > capacity {
      let mut target = capacity.max(1);

      while target < needed {
        target = target.saturating_mul(2);
      }

      trace!("growing output buffer from {} to {} bytes", capacity, target);

      self
        .bytes
        .try_reserve_exact(target - self.bytes.len())
        .map_err(|source| Error::Allocation { requested: target, source })?;
    }

    self.bytes.extend_from_slice(data);

    Ok(())
  }

  // Number of chunk bytes written so far, excluding the reserved header.
  pub fn chunk_len(&self) -> usize {
    self.bytes.len() - QOI_HEADER_LEN
  }

  // Writes the header into the reserved space and appends the end marker,
  // returning the complete QOI stream.
  pub fn finish(mut self, header: &Header) -> Result<Vec<u8>, Error> {
    self.push(&QOI_BYTES_END)?;
    self.bytes[..QOI_HEADER_LEN].copy_from_slice(&header.to_bytes());

    Ok(self.bytes)
  }

  #[cfg(test)]
  pub fn into_chunks(self) -> Vec<u8> {
    self.bytes[QOI_HEADER_LEN..].to_vec()
  }
}
