//! The source of randomness for the seed generator.

use rand::{
    Rng,
    rngs::{StdRng, ThreadRng},
};

/// Produces uniform random numbers in `[0, 1)`.
///
/// The generator draws all of its randomness from this trait so tests can
/// substitute a scripted sequence.
pub trait RandomSource {
    /// Draw a uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Draw a uniform integer in `[0, n)` as `floor(next_f64() * n)`.
    fn next_below(&mut self, n: u32) -> u32 {
        ((self.next_f64() * f64::from(n)).floor() as u32).min(n.saturating_sub(1))
    }
}

impl RandomSource for ThreadRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::RandomSource;
    use crate::test_utils::ScriptedRandom;

    #[test]
    fn next_f64_is_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(12345);

        for _ in 0..1000 {
            let value = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&value),
                "next_f64() produced value {value} outside [0.0, 1.0)"
            );
        }
    }

    #[test]
    fn next_below_floors_scaled_draw() {
        let mut rng = ScriptedRandom::new(&[0.0, 0.49, 0.5, 0.999]);

        let got: Vec<_> = (0..4).map(|_| rng.next_below(2)).collect();

        assert_eq!(got, vec![0, 0, 1, 1]);
    }
}
