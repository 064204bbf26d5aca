use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::info;

use crate::error::Error;

// Writes the encoded image to `path` in a single write, creating or truncating
// the file. The file is synced before returning so errors the OS would only
// report on close still surface as `Error::FileWrite`.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), Error> {
  let to_error = |source: io::Error| Error::FileWrite { path: path.to_path_buf(), source };

  let mut file = File::create(path).map_err(to_error)?;
  file.write_all(bytes).map_err(to_error)?;
  file.sync_all().map_err(to_error)?;

  info!("wrote {} bytes to {}", bytes.len(), path.display());

  Ok(())
}
