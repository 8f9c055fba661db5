//! Systematic Reed-Solomon framing over GF(256).
//!
//! The field arithmetic itself is an external collaborator (`reed-solomon`
//! crate); this module only adapts the `BitBuffer` <-> byte-codeword
//! boundary and maps its failure mode onto `WatermarkError::Uncorrectable`.

use log::warn;
use reed_solomon::{Decoder, Encoder};

use crate::bits::BitBuffer;
use crate::error::{Result, WatermarkError};

/// Appends `parity_bytes` RS parity bytes to `bits`. `bits.size()` must be a
/// multiple of 8. A `parity_bytes` of zero is a passthrough.
pub fn rs_encode(bits: &BitBuffer, parity_bytes: usize) -> Result<BitBuffer> {
    let data = bits.to_bytes()?;
    if parity_bytes == 0 {
        return Ok(bits.clone());
    }
    let encoder = Encoder::new(parity_bytes);
    let codeword = encoder.encode(&data);
    Ok(BitBuffer::from_bytes(&codeword))
}

/// Corrects and strips `parity_bytes` RS parity bytes from `bits`, returning
/// the data portion. A `parity_bytes` of zero is a passthrough.
pub fn rs_decode(bits: &BitBuffer, parity_bytes: usize) -> Result<BitBuffer> {
    rs_decode_reporting(bits, parity_bytes).map(|(data, _corrected_bytes)| data)
}

/// Like [`rs_decode`], but also reports how many byte errors the decoder
/// corrected, so callers can surface that count (e.g. a `debug` flag).
/// `warn!`s when that count is non-zero.
pub fn rs_decode_reporting(bits: &BitBuffer, parity_bytes: usize) -> Result<(BitBuffer, usize)> {
    if parity_bytes == 0 {
        return Ok((bits.clone(), 0));
    }
    let codeword = bits.to_bytes()?;
    let decoder = Decoder::new(parity_bytes);
    let (corrected, corrected_bytes) = decoder.correct_err_count(&codeword, None).map_err(|_| {
        warn!("reed-solomon decode exceeded its correction capacity");
        WatermarkError::Uncorrectable
    })?;
    if corrected_bytes > 0 {
        warn!("reed-solomon corrected {corrected_bytes} byte error(s)");
    }
    Ok((BitBuffer::from_bytes(corrected.data()), corrected_bytes))
}
