// crates/ta_core/src/rng.rs
//
// Deterministic, integer-only RNG for the fairness shuffle and for synthetic
// instances. Unbiased ranges via rejection sampling; explicit seeding so a run
// is reproducible from its `u64` seed on every platform.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Seeded ChaCha20 stream.
///
/// The mapping from `u64` to the 32-byte ChaCha20 seed is explicit:
/// `seed.to_le_bytes()` into the first 8 bytes; the remaining 24 bytes are zero.
#[derive(Debug, Clone)]
pub struct ShuffleRng {
    rng: ChaCha20Rng,
    words_consumed: u128,
}

impl ShuffleRng {
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
            words_consumed: 0,
        }
    }

    /// Total number of 64-bit words drawn so far (saturating).
    #[inline]
    pub fn words_consumed(&self) -> u128 {
        self.words_consumed
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.words_consumed = self.words_consumed.saturating_add(1);
        self.rng.next_u64()
    }

    /// Unbiased integer in `[0, n)`; `None` if `n == 0`.
    ///
    /// `threshold = 2^64 mod n`; accept `x >= threshold`, then `x % n` is uniform.
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// In-place Fisher–Yates shuffle.
    pub fn shuffle_in_place<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        if len <= 1 {
            return;
        }
        for i in (1..len).rev() {
            // i + 1 > 0, so a value is always produced.
            let j = self.gen_range((i as u64) + 1).unwrap_or(0) as usize;
            slice.swap(i, j);
        }
    }

    /// `k` distinct values from `[0, n)` in draw order (partial Fisher–Yates).
    /// Returns `None` if `k > n`.
    pub fn sample_distinct(&mut self, n: usize, k: usize) -> Option<alloc::vec::Vec<usize>> {
        if k > n {
            return None;
        }
        let mut pool: alloc::vec::Vec<usize> = (0..n).collect();
        for i in 0..k {
            let span = (n - i) as u64;
            let j = i + self.gen_range(span).unwrap_or(0) as usize;
            pool.swap(i, j);
        }
        pool.truncate(k);
        Some(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn gen_range_zero_none() {
        let mut rng = ShuffleRng::from_seed_u64(0xDEADBEEFCAFEBABE);
        assert_eq!(rng.gen_range(0), None);
        assert_eq!(rng.words_consumed(), 0);
    }

    #[test]
    fn gen_range_is_deterministic_and_bounded() {
        let mut a = ShuffleRng::from_seed_u64(123456789);
        let mut b = ShuffleRng::from_seed_u64(123456789);
        for _ in 0..32 {
            let x = a.gen_range(10).unwrap();
            assert_eq!(Some(x), b.gen_range(10));
            assert!(x < 10);
        }
    }

    #[test]
    fn shuffle_is_deterministic_permutation() {
        let mut a = ShuffleRng::from_seed_u64(42);
        let mut b = ShuffleRng::from_seed_u64(42);
        let mut xs = (0..16).collect::<Vec<_>>();
        let mut ys = (0..16).collect::<Vec<_>>();
        a.shuffle_in_place(&mut xs);
        b.shuffle_in_place(&mut ys);
        assert_eq!(xs, ys);

        let mut sorted = xs.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = ShuffleRng::from_seed_u64(1);
        let mut b = ShuffleRng::from_seed_u64(2);
        let xs: Vec<u64> = (0..8).map(|_| a.gen_range(1 << 40).unwrap()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.gen_range(1 << 40).unwrap()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn sample_distinct_has_no_repeats() {
        let mut rng = ShuffleRng::from_seed_u64(7);
        let picks = rng.sample_distinct(10, 4).unwrap();
        assert_eq!(picks.len(), 4);
        for (i, p) in picks.iter().enumerate() {
            assert!(*p < 10);
            assert!(!picks[..i].contains(p));
        }
        assert!(rng.sample_distinct(2, 3).is_none());
        assert_eq!(rng.sample_distinct(0, 0), Some(Vec::new()));
    }
}
