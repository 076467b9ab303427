//! Seeded random source for spawning

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform integer/real generator over a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Integer in `[min, max]`; `min` when the range is empty
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Real in `[min, max)`; `min` when the range is empty
    pub fn real(&mut self, min: i32, max: i32) -> f32 {
        if max <= min {
            return min as f32;
        }
        self.rng.random_range(f64::from(min)..f64::from(max)) as f32
    }

    /// Fair coin
    pub fn flip(&mut self) -> bool {
        self.int(0, 1) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.int(-100, 100), b.int(-100, 100));
            assert_eq!(a.real(0, 700).to_bits(), b.real(0, 700).to_bits());
        }
    }

    #[test]
    fn test_ranges() {
        let mut rng = SimRng::new(7);
        for _ in 0..500 {
            let i = rng.int(10, 30);
            assert!((10..=30).contains(&i));
            let r = rng.real(50, 70);
            assert!((50.0..70.0).contains(&r));
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = SimRng::new(1);
        assert_eq!(rng.int(5, 5), 5);
        assert_eq!(rng.int(9, 3), 9);
        assert_eq!(rng.real(128, 100), 128.0);
    }
}
