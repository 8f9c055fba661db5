//! Error types surfaced by the watermark codec.

use thiserror::Error;

/// Errors produced by the core watermark pipeline.
///
/// The core never performs file or network I/O, so no variant here wraps
/// `std::io::Error` — that belongs to callers layered above the codec (see
/// the CLI's own error type).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatermarkError {
    /// A `Parameters` value produces a non-positive capacity, an
    /// out-of-range opacity, or a codeword that would not fit in a single
    /// GF(256) Reed-Solomon block.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The cover image, after padding to a multiple of 8 in each dimension,
    /// does not have enough 8x8 blocks to carry the 16384 mid-band
    /// coefficients the mark requires.
    #[error("cover image too small: need {needed} usable 8x8 blocks, have {available}")]
    CoverTooSmall { needed: usize, available: usize },

    /// Reed-Solomon decoding found more byte errors than `parity_bytes / 2`
    /// can correct.
    #[error("reed-solomon decode failed: too many corrupted bytes")]
    Uncorrectable,

    /// Internal-consistency guard on `BitBuffer` random access. Not
    /// reachable through the public orchestrators on well-formed
    /// configurations.
    #[error("bit index {index} out of range for buffer of size {size}")]
    BitsOutOfRange { index: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, WatermarkError>;
