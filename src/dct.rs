//! 2D separable DCT-II / inverse DCT-II for square blocks, integer in / out.
//!
//! A single parameterized routine shared by the two block sizes this codec
//! needs (8, for the cover plane; 4, for the mark). The cosine matrix for
//! each size is precomputed once and cached.

use std::f64::consts::PI;
use std::sync::OnceLock;

/// Cosine basis matrix for an N-point DCT-II, laid out row-major as
/// `basis[u * n + x] = cos((2x+1) * u * pi / (2n))`.
fn cosine_basis(n: usize) -> &'static [f64] {
    static CACHE_4: OnceLock<Vec<f64>> = OnceLock::new();
    static CACHE_8: OnceLock<Vec<f64>> = OnceLock::new();

    let cache = match n {
        4 => &CACHE_4,
        8 => &CACHE_8,
        _ => panic!("unsupported DCT block size {n}: only 4 and 8 are used"),
    };
    cache.get_or_init(|| {
        let mut basis = vec![0.0; n * n];
        for u in 0..n {
            for x in 0..n {
                basis[u * n + x] = (((2 * x + 1) * u) as f64 * PI / (2.0 * n as f64)).cos();
            }
        }
        basis
    })
}

fn alpha(u: usize, n: usize) -> f64 {
    if u == 0 {
        (1.0 / n as f64).sqrt()
    } else {
        (2.0 / n as f64).sqrt()
    }
}

/// Forward 2D DCT-II of an `n x n` block, row-major (`block[y * n + x]`).
/// Output is row-major as `coeffs[v * n + u]`, `v` the vertical (row)
/// frequency and `u` the horizontal (column) frequency — the same
/// orientation JPEG coefficient tables use. `n` must be 4 or 8.
pub fn forward_dct(input: &[i32], n: usize) -> Vec<i32> {
    let basis = cosine_basis(n);
    let f: Vec<f64> = input.iter().map(|&v| v as f64).collect();

    // Pass 1: transform each row along x, indexed by horizontal frequency u.
    let mut temp = vec![0.0; n * n];
    for y in 0..n {
        for u in 0..n {
            let mut sum = 0.0;
            for x in 0..n {
                sum += f[y * n + x] * basis[u * n + x];
            }
            temp[y * n + u] = alpha(u, n) * sum;
        }
    }

    // Pass 2: transform each column along y, indexed by vertical frequency v.
    let mut out = vec![0i32; n * n];
    for v in 0..n {
        for u in 0..n {
            let mut sum = 0.0;
            for y in 0..n {
                sum += temp[y * n + u] * basis[v * n + y];
            }
            out[v * n + u] = (alpha(v, n) * sum).round() as i32;
        }
    }
    out
}

/// Inverse of [`forward_dct`]: `coeffs` is `coeffs[v * n + u]`, output is
/// `block[y * n + x]`. `n` must be 4 or 8.
pub fn inverse_dct(coeffs: &[i32], n: usize) -> Vec<i32> {
    let basis = cosine_basis(n);
    let f: Vec<f64> = coeffs.iter().map(|&v| v as f64).collect();

    // Pass 1: undo the horizontal-frequency transform, for each row v.
    let mut temp = vec![0.0; n * n];
    for v in 0..n {
        for x in 0..n {
            let mut sum = 0.0;
            for u in 0..n {
                sum += alpha(u, n) * f[v * n + u] * basis[u * n + x];
            }
            temp[v * n + x] = sum;
        }
    }

    // Pass 2: undo the vertical-frequency transform, for each column x.
    let mut out = vec![0i32; n * n];
    for y in 0..n {
        for x in 0..n {
            let mut sum = 0.0;
            for v in 0..n {
                sum += alpha(v, n) * temp[v * n + x] * basis[v * n + y];
            }
            out[y * n + x] = sum.round() as i32;
        }
    }
    out
}
