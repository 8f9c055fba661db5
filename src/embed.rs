//! Embedder orchestration: payload bits -> mark -> scattered mid-band DCT
//! coefficients -> watermarked luminance blended back into the cover.

use crate::bits::BitBuffer;
use crate::config::Parameters;
use crate::dct;
use crate::error::Result;
use crate::image_surface::{self, ImageSurface, LuminancePlane};
use crate::mark;
use crate::permutation::Permutation;
use crate::quantizer;
use crate::rs;
use crate::zigzag;

/// The four mid-band 8x8 coefficient positions carrying one payload bit
/// each, as `(row, col)` into an 8x8 block addressed `coeffs[row*8+col]`.
/// This is the JPEG-robust anti-diagonal; do not change.
const MID_BAND: [(usize, usize); 4] = [(1, 4), (2, 3), (3, 2), (4, 1)];

/// Diagnostics surfaced alongside a completed embed when the caller wants
/// them, e.g. a `debug` CLI flag: the raw mark bitmap that was painted
/// (row-major, one byte per cell, 0 or 255) before scrambling and DCT.
pub struct EmbedDiagnostics {
    pub mark: Vec<u8>,
}

/// Embeds `payload`, truncated or zero-padded to `max_bits_data` bits,
/// into `image`'s luminance channel.
pub fn embed(image: &mut impl ImageSurface, payload: &BitBuffer, params: &Parameters) -> Result<()> {
    embed_with_diagnostics(image, payload, params).map(|_diagnostics| ())
}

/// Like [`embed`], but also returns the raw mark bitmap that was painted.
pub fn embed_with_diagnostics(
    image: &mut impl ImageSurface,
    payload: &BitBuffer,
    params: &Parameters,
) -> Result<EmbedDiagnostics> {
    // 1. Truncate/pad the payload to max_bits_data.
    let data = payload.resized(params.max_bits_data());

    // 2. RS-encode to a max_bits_total-bit codeword.
    let codeword = if params.parity_bytes > 0 {
        rs::rs_encode(&data, params.parity_bytes)?
    } else {
        data
    };

    // 3. Paint the mark bitmap.
    let mark_grid = mark::paint(&codeword, params);
    let diagnostics = EmbedDiagnostics {
        mark: mark_grid.iter().map(|&v| v as u8).collect(),
    };

    // 4. Scramble the mark with pi_mark.
    let pi_mark = Permutation::generate(params.seed_watermark, mark_grid.len());
    let scrambled_mark = pi_mark.apply(&mark_grid);

    // 5. 4x4 DCT + quantize each block of the scrambled mark.
    let side = Parameters::MARK_SIDE;
    let mut quantized = vec![0i32; side * side];
    for by in (0..side).step_by(4) {
        for bx in (0..side).step_by(4) {
            let mut block = [0i32; 16];
            for y in 0..4 {
                for x in 0..4 {
                    block[y * 4 + x] = scrambled_mark[(by + y) * side + bx + x];
                }
            }
            let coeffs = dct::forward_dct(&block, 4);
            let q = quantizer::quantize(&coeffs.try_into().unwrap());
            for y in 0..4 {
                for x in 0..4 {
                    quantized[(by + y) * side + bx + x] = q[y * 4 + x];
                }
            }
        }
    }

    // 6. Scramble the quantized coefficients with pi_embed.
    let pi_embed = Permutation::generate(params.seed_embedding, quantized.len());
    let scrambled_quantized = pi_embed.apply(&quantized);

    // 7. Linearize in zig-zag order.
    let mut v = vec![0i32; zigzag::GRID_LEN];
    zigzag::two2one(&scrambled_quantized, &mut v);

    // 8. Extract the padded luminance plane.
    let mut plane = LuminancePlane::extract(image);
    image_surface::require_capacity(plane.blocks_wide(), plane.blocks_high())?;

    // 9. Overwrite the mid-band coefficients of each 8x8 block.
    let mut cursor = 0usize;
    'blocks: for by in 0..plane.blocks_high() {
        for bx in 0..plane.blocks_wide() {
            if cursor + 4 > v.len() {
                break 'blocks;
            }
            let mut block = [0i32; 64];
            for y in 0..8 {
                for x in 0..8 {
                    block[y * 8 + x] = plane.get(bx * 8 + x, by * 8 + y);
                }
            }
            let mut coeffs = dct::forward_dct(&block, 8);
            for &(row, col) in &MID_BAND {
                coeffs[row * 8 + col] = v[cursor];
                cursor += 1;
            }
            let reconstructed = dct::inverse_dct(&coeffs, 8);
            for y in 0..8 {
                for x in 0..8 {
                    plane.set(bx * 8 + x, by * 8 + y, reconstructed[y * 8 + x].clamp(0, 255));
                }
            }
        }
    }

    // 10. Blend the reconstructed luminance back in at the configured opacity.
    plane.apply(image, params.opacity);
    Ok(diagnostics)
}
