//! Painting and reading of the 128x128 binary mark bitmap.
//!
//! The mark is a `cells x cells` grid of `b x b` boxes, each box carrying
//! one payload bit at full contrast (0 or 255); cells is `floor(128 / b)`
//! so only the `cells*b` square prefix of the 128x128 bitmap is ever
//! written, mirroring `Parameters`' derived capacity.

use crate::bits::BitBuffer;
use crate::config::Parameters;

const SIDE: usize = Parameters::MARK_SIDE;

/// Paints `bits` (length `max_bits_total`) into a 128x128 `{0, 255}` grid,
/// row-major, one bit per `b x b` cell in row-major cell order.
pub fn paint(bits: &BitBuffer, params: &Parameters) -> Vec<i32> {
    let mut grid = vec![0i32; SIDE * SIDE];
    let b = params.bit_box_size;
    let cells = params.cells();

    for cy in 0..cells {
        for cx in 0..cells {
            let bit_index = cy * cells + cx;
            let value = if bits.bit(bit_index).unwrap_or(false) {
                255
            } else {
                0
            };
            for dy in 0..b {
                for dx in 0..b {
                    grid[(cy * b + dy) * SIDE + cx * b + dx] = value;
                }
            }
        }
    }
    grid
}

/// Inverse of [`paint`]: averages each `b x b` cell and thresholds at 128,
/// producing a `max_bits_total`-bit buffer in row-major cell order.
pub fn read(grid: &[i32], params: &Parameters) -> BitBuffer {
    let b = params.bit_box_size;
    let cells = params.cells();
    let mut bits = BitBuffer::with_capacity(cells * cells);

    for cy in 0..cells {
        for cx in 0..cells {
            let mut sum = 0i64;
            for dy in 0..b {
                for dx in 0..b {
                    sum += grid[(cy * b + dy) * SIDE + cx * b + dx] as i64;
                }
            }
            let average = sum / (b * b) as i64;
            bits.append(average >= 128);
        }
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_then_read_round_trips_clean() {
        let params = Parameters::default();
        let mut bits = BitBuffer::with_capacity(params.max_bits_total());
        for i in 0..params.max_bits_total() {
            bits.append(i % 3 == 0);
        }
        let grid = paint(&bits, &params);
        let back = read(&grid, &params);
        assert_eq!(back, bits);
    }

    #[test]
    fn read_tolerates_noisy_cells() {
        let params = Parameters::default();
        let bits = BitBuffer::zeros(params.max_bits_total());
        let mut grid = paint(&bits, &params);
        // Flip a handful of pixels within one cell; the average should
        // still threshold to 0.
        grid[0] = 255;
        grid[1] = 255;
        let back = read(&grid, &params);
        assert!(!back.bit(0).unwrap());
    }

    #[test]
    fn cells_outside_written_square_stay_blank() {
        let params = Parameters::default();
        let bits = BitBuffer::zeros(params.max_bits_total());
        let grid = paint(&bits, &params);
        let written_side = params.cells() * params.bit_box_size;
        assert!(written_side < SIDE);
        assert_eq!(grid[SIDE * SIDE - 1], 0);
    }
}
