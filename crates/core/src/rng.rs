//! RNG module - seedable random source and weighted tile selection
//!
//! Provides a simple LCG for deterministic play and a [`WeightedPicker`] that
//! turns a catalog weight vector into index draws. Any type implementing
//! [`RandomSource`] can be injected, so tests can script exact draws.

use crate::error::LevelError;

/// Source of uniform random numbers.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    ///
    /// Scales by the high bits of the draw; LCG low bits have short periods.
    fn next_below(&mut self, bound: u64) -> u64 {
        if bound <= u32::MAX as u64 {
            (self.next_u32() as u64 * bound) >> 32
        } else {
            let hi = self.next_u32() as u64;
            let lo = self.next_u32() as u64;
            ((hi << 32) | lo) % bound
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_below(&mut self, bound: u64) -> u64 {
        (**self).next_below(bound)
    }
}

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

    /// Current state, usable as a seed to continue the same sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Weighted index selection over a fixed weight list.
///
/// Draws a uniform value in `[0, total)` and scans the cumulative sums, so
/// index `i` comes up with probability `weights[i] / total`. Zero-weight
/// entries are never returned.
#[derive(Debug, Clone)]
pub struct WeightedPicker<R> {
    weights: Vec<u64>,
    total: u64,
    rng: R,
}

impl<R: RandomSource> WeightedPicker<R> {
    pub fn new(weights: &[i64], rng: R) -> Result<Self, LevelError> {
        if weights.is_empty() {
            return Err(LevelError::InvalidWeights("weight list is empty".into()));
        }

        let mut converted = Vec::with_capacity(weights.len());
        let mut total: u64 = 0;
        for (i, &w) in weights.iter().enumerate() {
            if w < 0 {
                return Err(LevelError::InvalidWeights(format!(
                    "weight {} at index {} is negative",
                    w, i
                )));
            }
            total = total
                .checked_add(w as u64)
                .ok_or_else(|| LevelError::InvalidWeights("weight total overflows".into()))?;
            converted.push(w as u64);
        }

        if total == 0 {
            return Err(LevelError::InvalidWeights("weights sum to zero".into()));
        }

        Ok(Self {
            weights: converted,
            total,
            rng,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Draw one index.
    pub fn pick_index(&mut self) -> usize {
        let mut roll = self.rng.next_below(self.total);
        for (i, &w) in self.weights.iter().enumerate() {
            if roll < w {
                return i;
            }
            roll -= w;
        }
        // Unreachable while roll < total; keep the last positive weight as a floor.
        self.weights.iter().rposition(|&w| w > 0).unwrap_or(0)
    }

    /// Give the random source back, e.g. to continue the same sequence elsewhere.
    pub fn into_source(self) -> R {
        self.rng
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed list of raw values, cycling when exhausted.
    pub(crate) struct ScriptedRng {
        values: Vec<u32>,
        pos: usize,
    }

    impl ScriptedRng {
        pub(crate) fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                pos: 0,
            }
        }

        pub(crate) fn draws(&self) -> usize {
            self.pos
        }
    }

    impl RandomSource for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let v = self.values[self.pos % self.values.len()];
            self.pos += 1;
            v
        }

        // Scripted values are the rolls themselves.
        fn next_below(&mut self, bound: u64) -> u64 {
            self.next_u32() as u64 % bound
        }
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_coerced() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn picker_rejects_negative_weight() {
        let err = WeightedPicker::new(&[3, -1, 2], SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, LevelError::InvalidWeights(_)));
    }

    #[test]
    fn picker_rejects_zero_total() {
        let err = WeightedPicker::new(&[0, 0, 0], SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, LevelError::InvalidWeights(_)));
    }

    #[test]
    fn picker_rejects_empty_list() {
        let err = WeightedPicker::new(&[], SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, LevelError::InvalidWeights(_)));
    }

    #[test]
    fn picker_maps_cumulative_ranges() {
        // total = 6: [0,1) -> 0, [1,1) -> none, [1,4) -> 2, [4,6) -> 3
        let rng = ScriptedRng::new(&[0, 1, 3, 4, 5, 6]);
        let mut picker = WeightedPicker::new(&[1, 0, 3, 2], rng).unwrap();
        let picks: Vec<usize> = (0..6).map(|_| picker.pick_index()).collect();
        assert_eq!(picks, vec![0, 2, 2, 3, 3, 0]);
    }

    #[test]
    fn picker_never_returns_zero_weight_index() {
        let mut picker = WeightedPicker::new(&[0, 5, 0, 5], SimpleRng::new(99)).unwrap();
        for _ in 0..1000 {
            let i = picker.pick_index();
            assert!(i == 1 || i == 3, "picked zero-weight index {}", i);
        }
    }

    #[test]
    fn picker_frequencies_converge() {
        let weights = [1i64, 2, 7];
        let mut picker = WeightedPicker::new(&weights, SimpleRng::new(2024)).unwrap();
        let mut counts = [0usize; 3];
        let n = 100_000;
        for _ in 0..n {
            counts[picker.pick_index()] += 1;
        }
        for (i, &w) in weights.iter().enumerate() {
            let expected = w as f64 / 10.0;
            let observed = counts[i] as f64 / n as f64;
            assert!(
                (expected - observed).abs() < 0.02,
                "index {}: expected {:.3}, observed {:.3}",
                i,
                expected,
                observed
            );
        }
    }

    #[test]
    fn independent_pickers_with_same_seed_agree() {
        let mut a = WeightedPicker::new(&[4, 4, 4], SimpleRng::new(7)).unwrap();
        let mut b = WeightedPicker::new(&[4, 4, 4], SimpleRng::new(7)).unwrap();
        for _ in 0..50 {
            assert_eq!(a.pick_index(), b.pick_index());
        }
    }

    #[test]
    fn picker_borrows_source() {
        let mut rng = ScriptedRng::new(&[0]);
        {
            let mut picker = WeightedPicker::new(&[1, 1], &mut rng).unwrap();
            picker.pick_index();
            picker.pick_index();
        }
        assert_eq!(rng.draws(), 2);
    }
}
