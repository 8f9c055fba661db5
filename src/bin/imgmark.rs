//! imgmark CLI - embed and extract text watermarks in still images.
//!
//! A thin adapter over the `imgmark_rs` core: decodes/encodes the image
//! container via the `image` crate, drives `Watermark`, and maps I/O and
//! codec failures onto one process exit status. The core itself never
//! touches a file.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use image::ImageReader;
use thiserror::Error;

use imgmark_rs::{Parameters, Watermark, WatermarkError};

/// Embed and extract text watermarks in still images.
#[derive(Parser)]
#[command(name = "imgmark")]
#[command(author = "imgmark-rs contributors")]
#[command(version)]
#[command(about = "Blind DCT/Reed-Solomon text watermarking for still images", long_about = None)]
struct Cli {
    #[command(flatten)]
    params: ParamArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ParamArgs {
    /// Pixels per mark bit cell.
    #[arg(long, default_value_t = 10)]
    bit_box_size: usize,

    /// Reed-Solomon parity bytes (0 disables error correction).
    #[arg(long, default_value_t = 6)]
    parity_bytes: usize,

    /// Blend factor for the reconstructed luminance, in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    opacity: f64,

    /// Seed for the coefficient-scatter permutation. Must match at extract time.
    #[arg(long, default_value_t = 24)]
    seed_embedding: u64,

    /// Seed for the mark-bitmap permutation. Must match at extract time.
    #[arg(long, default_value_t = 19)]
    seed_watermark: u64,

    /// Dump the raw 128x128 mark bitmap alongside the output/input image
    /// and, on extract, report the Reed-Solomon corrected-byte count.
    #[arg(long)]
    debug: bool,
}

impl ParamArgs {
    fn parameters(&self) -> Result<Parameters, WatermarkError> {
        Parameters::new(
            self.bit_box_size,
            self.parity_bytes,
            self.opacity,
            self.seed_embedding,
            self.seed_watermark,
            self.debug,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Embed text into a cover image, writing the watermarked copy.
    Embed {
        /// Cover image path (any format the `image` crate can decode).
        #[arg(short, long)]
        input: PathBuf,

        /// Path for the watermarked output image.
        #[arg(short, long)]
        output: PathBuf,

        /// Text payload. Lower-cased, stripped of non-alphabet characters,
        /// truncated/padded to the configured capacity.
        #[arg(short, long)]
        text: String,
    },

    /// Extract a previously embedded text payload from an image.
    Extract {
        /// Watermarked image path.
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the bit/text capacity implied by the given parameters.
    Capacity,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Watermark(#[from] WatermarkError),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Appends `.mark.raw` to `path`'s file name, for the raw 128x128 mark
/// bitmap dump written when `--debug` is set.
fn mark_dump_path(path: &std::path::Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".mark.raw");
    path.with_file_name(name)
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let params = cli.params.parameters()?;
    let wm = Watermark::new(params);

    match cli.command {
        Commands::Embed { input, output, text } => {
            let mut image = ImageReader::open(&input)?.decode()?.into_rgb8();
            if cli.params.debug {
                let diagnostics = wm.embed_text_with_diagnostics(&mut image, &text)?;
                let dump_path = mark_dump_path(&output);
                fs::write(&dump_path, &diagnostics.mark)?;
                println!("wrote raw mark bitmap to {}", dump_path.display());
            } else {
                wm.embed_text(&mut image, &text)?;
            }
            image.save(&output)?;
            println!("embedded {} byte(s) of text into {}", text.len(), output.display());
        }
        Commands::Extract { input } => {
            let image = ImageReader::open(&input)?.decode()?.into_rgb8();
            if cli.params.debug {
                let (text, diagnostics) = wm.extract_text_with_diagnostics(&image)?;
                let dump_path = mark_dump_path(&input);
                fs::write(&dump_path, &diagnostics.mark)?;
                println!("wrote raw mark bitmap to {}", dump_path.display());
                println!("reed-solomon corrected {} byte(s)", diagnostics.corrected_bytes);
                println!("{text}");
            } else {
                let text = wm.extract_text(&image)?;
                println!("{text}");
            }
        }
        Commands::Capacity => {
            println!("max_bits_total = {}", wm.max_bits_total());
            println!("max_bits_data  = {}", wm.max_bits_data());
            println!("max_text_len   = {}", wm.max_text_len());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("imgmark: {e}");
            ExitCode::FAILURE
        }
    }
}
