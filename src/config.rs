//! Watermark configuration and its derived capacities.

use log::debug;

use crate::error::{Result, WatermarkError};

/// The maximum codeword size (data + parity) a single GF(256) Reed-Solomon
/// block can carry with the `reed-solomon` crate.
const MAX_RS_BLOCK_BYTES: usize = 255;

/// Immutable, validated watermark parameters.
///
/// `Parameters::new` computes and checks the derived capacities once; a
/// constructed `Parameters` is guaranteed to yield a non-negative
/// `max_bits_data` and a codeword that fits one RS block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub bit_box_size: usize,
    pub parity_bytes: usize,
    pub opacity: f64,
    pub seed_embedding: u64,
    pub seed_watermark: u64,
    pub debug: bool,

    cells: usize,
    max_bits_total: usize,
    max_bits_data: usize,
    max_text_len: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new(10, 6, 1.0, 24, 19, false).expect("default parameters are always valid")
    }
}

impl Parameters {
    /// The side length of the mark bitmap, fixed by the geometry of the
    /// embedding pipeline.
    pub const MARK_SIDE: usize = 128;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bit_box_size: usize,
        parity_bytes: usize,
        opacity: f64,
        seed_embedding: u64,
        seed_watermark: u64,
        debug: bool,
    ) -> Result<Self> {
        if bit_box_size == 0 || bit_box_size > Self::MARK_SIDE {
            return Err(WatermarkError::InvalidParameters(format!(
                "bit_box_size must be in 1..={}, got {bit_box_size}",
                Self::MARK_SIDE
            )));
        }
        if !(0.0..=1.0).contains(&opacity) {
            return Err(WatermarkError::InvalidParameters(format!(
                "opacity must be in [0, 1], got {opacity}"
            )));
        }

        let cells = Self::MARK_SIDE / bit_box_size;
        let max_bits_total = cells * cells;
        let parity_bits = 8 * parity_bytes;
        if parity_bits > max_bits_total {
            return Err(WatermarkError::InvalidParameters(format!(
                "parity_bytes {parity_bytes} leaves no room for data in {max_bits_total} total bits"
            )));
        }
        let max_bits_data = max_bits_total - parity_bits;
        if parity_bytes > 0 && max_bits_data % 8 != 0 {
            return Err(WatermarkError::InvalidParameters(format!(
                "max_bits_data {max_bits_data} is not byte-aligned, required for Reed-Solomon \
                 framing with parity_bytes > 0; choose a bit_box_size whose cells^2 is a \
                 multiple of 8"
            )));
        }
        let max_text_len = max_bits_data / 6;

        let codeword_bytes = max_bits_data / 8 + parity_bytes;
        if codeword_bytes > MAX_RS_BLOCK_BYTES {
            return Err(WatermarkError::InvalidParameters(format!(
                "codeword of {codeword_bytes} bytes exceeds the {MAX_RS_BLOCK_BYTES}-byte \
                 GF(256) Reed-Solomon block limit; increase bit_box_size or reduce parity_bytes"
            )));
        }

        debug!(
            "watermark parameters: b={bit_box_size} k={parity_bytes} cells={cells} \
             max_bits_total={max_bits_total} max_bits_data={max_bits_data} max_text_len={max_text_len}"
        );

        Ok(Self {
            bit_box_size,
            parity_bytes,
            opacity,
            seed_embedding,
            seed_watermark,
            debug,
            cells,
            max_bits_total,
            max_bits_data,
            max_text_len,
        })
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn max_bits_total(&self) -> usize {
        self.max_bits_total
    }

    pub fn max_bits_data(&self) -> usize {
        self.max_bits_data
    }

    pub fn max_text_len(&self) -> usize {
        self.max_text_len
    }
}
