//! Keyed, deterministic rejection-sampling permutation of `[0, N)`.
//!
//! Embed and extract must regenerate bit-for-bit identical permutations
//! from the same seed — that is the whole basis of the keyed scatter this
//! codec relies on. The generator and its rejection loop are a pinned
//! implementation detail: the LCG constants below have no external format
//! to match, only internal consistency between this module's own forward
//! and inverse directions.

use log::debug;

/// 64-bit linear congruential generator. Constants are Knuth/PCG-style
/// (odd increment, multiplier good for 2^64 moduli); pinned here rather
/// than imported so the sequence is fully owned by this crate.
struct Lcg {
    state: u64,
}

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1442695040888963407;

impl Lcg {
    fn new(seed: u64) -> Self {
        // Run one step up front so a seed of 0 doesn't hand back 0 first.
        let mut rng = Self { state: seed };
        rng.step();
        rng
    }

    fn step(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Draws a uniform index in `[0, bound)`. Uses the high bits of the LCG
    /// state, which have better statistical quality than the low bits of a
    /// power-of-two-modulus LCG.
    fn next_index(&mut self, bound: usize) -> usize {
        let bits = self.step();
        ((bits >> 32) as usize) % bound
    }
}

/// A permutation of `[0, n)` together with its inverse, both derived from
/// a single rejection-sampling generation pass.
pub struct Permutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Generates π over `[0, n)` from `seed` via rejection sampling: for
    /// each `i`, repeatedly draw a candidate until it lands on an unused
    /// slot.
    pub fn generate(seed: u64, n: usize) -> Self {
        let mut rng = Lcg::new(seed);
        let mut used = vec![false; n];
        let mut forward = vec![0usize; n];

        for i in 0..n {
            loop {
                let candidate = rng.next_index(n);
                if !used[candidate] {
                    used[candidate] = true;
                    forward[i] = candidate;
                    break;
                }
            }
        }

        let mut inverse = vec![0usize; n];
        for (i, &c) in forward.iter().enumerate() {
            inverse[c] = i;
        }

        debug!("generated permutation of {n} slots from seed {seed}");
        Self { forward, inverse }
    }

    /// Applies π: `out[i] = values[π(i)]`.
    pub fn apply<T: Copy + Default>(&self, values: &[T]) -> Vec<T> {
        let mut out = vec![T::default(); values.len()];
        for (i, &dest) in self.forward.iter().enumerate() {
            out[i] = values[dest];
        }
        out
    }

    /// Applies π⁻¹: `out[π(i)] = values[i]`, i.e. undoes [`Self::apply`].
    pub fn apply_inverse<T: Copy + Default>(&self, values: &[T]) -> Vec<T> {
        let mut out = vec![T::default(); values.len()];
        for (i, &dest) in self.forward.iter().enumerate() {
            out[dest] = values[i];
        }
        out
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    #[cfg(test)]
    fn inverse_table(&self) -> &[usize] {
        &self.inverse
    }
}
