//! Converts a PNG image into a QOI image.
//!
//! # Usage
//!
//! ```sh
//! png2qoi input.png output.qoi
//! ```
//!
//! Decodes `input.png` to RGBA pixels and writes them to `output.qoi` as an
//! sRGB QOI image.
//!
//! ```sh
//! png2qoi --colorspace linear --minimal -vv input.png output.qoi
//! ```
//!
//! Marks the image as linear, leaves out the surplus chunk the reference
//! encoder writes after the last pixel, and logs encoder statistics.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use image::ImageReader;
use log::{debug, LevelFilter};
use qoif::{Colorspace, Encoder, SentinelChunk};

#[derive(Debug, Parser)]
#[command(name = "png2qoi", version, about = "Converts a PNG image into a QOI image")]
struct Cli {
  /// PNG image to convert.
  input: PathBuf,

  /// Destination of the QOI image. Replaced if it already exists.
  output: PathBuf,

  /// Colorspace recorded in the QOI header.
  #[arg(long, value_enum, default_value_t = ColorspaceArg::Srgb)]
  colorspace: ColorspaceArg,

  /// Don't write the extra chunk the reference encoder emits after the last
  /// pixel.
  #[arg(long)]
  minimal: bool,

  /// Log more, repeat for more detail.
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum ColorspaceArg {
  /// sRGB with linear alpha.
  Srgb,
  /// All channels linear.
  Linear,
}

impl From<ColorspaceArg> for Colorspace {
  fn from(arg: ColorspaceArg) -> Self {
    match arg {
      ColorspaceArg::Srgb => Colorspace::Srgb,
      ColorspaceArg::Linear => Colorspace::Linear,
    }
  }
}

impl Cli {
  fn encoder(&self) -> Encoder {
    let sentinel_chunk = if self.minimal {
      SentinelChunk::Suppress
    } else {
      SentinelChunk::Emit
    };

    Encoder::new(self.colorspace.into()).sentinel_chunk(sentinel_chunk)
  }

  fn log_level(&self) -> LevelFilter {
    match self.verbose {
      0 => LevelFilter::Warn,
      1 => LevelFilter::Info,
      2 => LevelFilter::Debug,
      _ => LevelFilter::Trace,
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  env_logger::Builder::new()
    .filter_level(cli.log_level())
    .format_timestamp(None)
    .init();

  match convert(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      match e.downcast_ref::<qoif::Error>() {
        Some(qoi_err) => eprintln!("error: {} - {:#}", qoi_err.code(), e),
        None => eprintln!("error: {:#}", e),
      }

      ExitCode::FAILURE
    }
  }
}

fn convert(cli: &Cli) -> Result<()> {
  let image = ImageReader::open(&cli.input)
    .with_context(|| format!("failed to open `{}`", cli.input.display()))?
    .with_guessed_format()
    .with_context(|| format!("failed to read `{}`", cli.input.display()))?
    .decode()
    .with_context(|| format!("failed to decode `{}`", cli.input.display()))?
    .into_rgba8();

  let (width, height) = image.dimensions();
  debug!("decoded {} as a {}x{} image", cli.input.display(), width, height);

  cli
    .encoder()
    .encode_to_file(&cli.output, image.as_raw(), width, height)
    .with_context(|| format!("failed to convert `{}`", cli.input.display()))?;

  Ok(())
}
