//! Randomness for AI personalities, AI reaction sampling and serve direction

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Fair coin flip mapped to a sign
    fn next_sign(&mut self) -> f32 {
        if self.next_unit() < 0.5 { 1.0 } else { -1.0 }
    }

    /// Uniform sample in `[min, max)`; returns `min` for an empty range
    fn next_in(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }
}

/// Seeded PCG generator, reproducible from its seed
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    inner: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind to the start of the seeded sequence
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f32 {
        self.inner.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRng {
    samples: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(samples: &[f32]) -> Self {
        assert!(!samples.is_empty(), "scripted rng needs at least one sample");
        Self {
            samples: samples.to_vec(),
            cursor: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f32 {
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_in_unit_range() {
        let mut rng = SeededRng::new(7);
        for _ in 0..10_000 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x), "sample {x} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRng::new(99999);
        let mut b = SeededRng::new(99999);
        for _ in 0..100 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn test_reseed_rewinds() {
        let mut rng = SeededRng::new(5);
        let first = rng.next_unit();
        rng.next_unit();
        rng.reseed(5);
        assert_eq!(rng.next_unit(), first);
        assert_eq!(rng.seed(), 5);
    }

    #[test]
    fn test_next_in_bounds() {
        let mut rng = SeededRng::new(3);
        for _ in 0..1_000 {
            let x = rng.next_in(0.7, 1.2);
            assert!((0.7..1.2).contains(&x));
        }
        let mut scripted = ScriptedRng::new(&[0.0, 0.5, 0.999]);
        assert_eq!(scripted.next_in(2.0, 4.0), 2.0);
        assert_eq!(scripted.next_in(2.0, 4.0), 3.0);
        assert_eq!(scripted.next_sign(), -1.0);
        assert_eq!(scripted.next_sign(), 1.0);
    }
}
