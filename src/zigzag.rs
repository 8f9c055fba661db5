//! Bijection between a 128x128 grid and a length-16384 linear sequence in
//! JPEG zig-zag scan order, generalized from the 8x8 case.
//!
//! JPEG's familiar 8x8 zig-zag order is the diagonal sweep `(0,0), (0,1),
//! (1,0), (2,0), (1,1), (0,2), ...`, alternating sweep direction every
//! anti-diagonal. The same construction generalizes to any square grid; we
//! compute it once for 128x128 rather than hand-enumerating 16384 literal
//! indices.

use std::sync::OnceLock;

pub const GRID_SIDE: usize = 128;
pub const GRID_LEN: usize = GRID_SIDE * GRID_SIDE;

/// `SCAN_ORDER[i]` is the `(row, col)` visited at scan position `i`.
fn scan_order() -> &'static [(usize, usize)] {
    static CACHE: OnceLock<Vec<(usize, usize)>> = OnceLock::new();
    CACHE.get_or_init(|| build_zigzag(GRID_SIDE))
}

fn build_zigzag(n: usize) -> Vec<(usize, usize)> {
    let mut order = Vec::with_capacity(n * n);
    let mut row = 0usize;
    let mut col = 0usize;
    let mut going_up = true;

    for _ in 0..n * n {
        order.push((row, col));
        if going_up {
            if col == n - 1 {
                row += 1;
                going_up = false;
            } else if row == 0 {
                col += 1;
                going_up = false;
            } else {
                row -= 1;
                col += 1;
            }
        } else if row == n - 1 {
            col += 1;
            going_up = true;
        } else if col == 0 {
            row += 1;
            going_up = true;
        } else {
            row += 1;
            col -= 1;
        }
    }
    order
}

/// Fills `out` (length 16384) from `grid` (128x128, row-major) in zig-zag
/// scan order.
pub fn two2one(grid: &[i32], out: &mut [i32]) {
    debug_assert_eq!(grid.len(), GRID_LEN);
    debug_assert_eq!(out.len(), GRID_LEN);
    for (i, &(row, col)) in scan_order().iter().enumerate() {
        out[i] = grid[row * GRID_SIDE + col];
    }
}

/// Inverse of [`two2one`]: scatters `v` (length 16384) back into `grid`
/// (128x128, row-major) following zig-zag scan order.
pub fn one2two(v: &[i32], grid: &mut [i32]) {
    debug_assert_eq!(v.len(), GRID_LEN);
    debug_assert_eq!(grid.len(), GRID_LEN);
    for (i, &(row, col)) in scan_order().iter().enumerate() {
        grid[row * GRID_SIDE + col] = v[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_order_visits_every_cell_exactly_once() {
        let order = scan_order();
        assert_eq!(order.len(), GRID_LEN);
        let mut seen = vec![false; GRID_LEN];
        for &(row, col) in order {
            let idx = row * GRID_SIDE + col;
            assert!(!seen[idx], "cell ({row},{col}) visited twice");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn matches_known_jpeg_8x8_zigzag_prefix() {
        // Standard JPEG 8x8 zig-zag order, first 10 positions.
        const JPEG_8X8_PREFIX: [(usize, usize); 10] = [
            (0, 0),
            (0, 1),
            (1, 0),
            (2, 0),
            (1, 1),
            (0, 2),
            (0, 3),
            (1, 2),
            (2, 1),
            (3, 0),
        ];
        let order = build_zigzag(8);
        assert_eq!(&order[..10], &JPEG_8X8_PREFIX);
    }

    #[test]
    fn one2two_inverts_two2one() {
        let grid: Vec<i32> = (0..GRID_LEN as i32).collect();
        let mut linear = vec![0i32; GRID_LEN];
        two2one(&grid, &mut linear);

        let mut back = vec![0i32; GRID_LEN];
        one2two(&linear, &mut back);
        assert_eq!(back, grid);
    }

    #[test]
    fn two2one_is_a_permutation_of_values() {
        let grid: Vec<i32> = (0..GRID_LEN as i32).collect();
        let mut linear = vec![0i32; GRID_LEN];
        two2one(&grid, &mut linear);
        let mut sorted = linear.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, grid);
    }
}
