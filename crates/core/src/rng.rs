//! RNG module - deterministic shuffling for board generation
//!
//! A small LCG is enough here: boards only need to look random to a player,
//! and a seedable generator keeps every test and benchmark reproducible.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits of the LCG output; the low bits of a power-of-two
    /// modulus LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        (((self.next_u32() as u64) * (max as u64)) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Move a uniformly random `amount`-element subset to the front of `slice`.
    ///
    /// Partial Fisher-Yates: only the first `amount` positions are drawn.
    /// Returns the chosen prefix.
    pub fn choose_prefix<'a, T>(&mut self, slice: &'a mut [T], amount: usize) -> &'a mut [T] {
        let amount = amount.min(slice.len());
        for i in 0..amount {
            let remaining = (slice.len() - i) as u32;
            let j = i + self.next_range(remaining) as usize;
            slice.swap(i, j);
        }
        &mut slice[..amount]
    }

    /// Current internal state (re-seeding with it resumes the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in [1u32, 2, 3, 10, 64] {
            for _ in 0..500 {
                assert!(rng.next_range(max) < max);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(99);
        let mut values: Vec<u32> = (0..64).collect();
        rng.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<_>>());
        assert_ne!(values, sorted, "64 elements should not shuffle to identity");
    }

    #[test]
    fn test_shuffle_hits_every_position() {
        // Element 0 of a 4-slice should land in every slot over enough draws.
        let mut rng = SimpleRng::new(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let mut v = [0u8, 1, 2, 3];
            rng.shuffle(&mut v);
            let pos = v.iter().position(|&x| x == 0).unwrap();
            seen[pos] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_choose_prefix_is_distinct_subset() {
        let mut rng = SimpleRng::new(42);
        let mut pool: Vec<u8> = (0..32).collect();
        let chosen = rng.choose_prefix(&mut pool, 8).to_vec();

        assert_eq!(chosen.len(), 8);
        let mut dedup = chosen.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), 8);

        // The whole pool is still a permutation of the input.
        pool.sort_unstable();
        assert_eq!(pool, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose_prefix_clamps_amount() {
        let mut rng = SimpleRng::new(1);
        let mut pool = [1, 2, 3];
        assert_eq!(rng.choose_prefix(&mut pool, 10).len(), 3);
    }
}
