//! Draws an index from a discrete probability distribution.

use super::random::RandomSource;

/// Draw an index into `weights` with probability proportional to its weight.
///
/// `weights` should be non-negative and sum to roughly one. A uniform value
/// `r` is drawn and the first index whose running sum exceeds `r` is returned.
/// When rounding leaves the sum at or below `r`, the last index is returned,
/// so every non-empty weight vector yields a valid index.
///
/// # Panics
/// Panics if `weights` is empty.
pub fn weighted_index<R: RandomSource + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    assert!(!weights.is_empty(), "weights must not be empty");

    let random = rng.next_f64();
    let mut sum = 0.0;

    for (index, weight) in weights.iter().enumerate() {
        sum += weight;

        if random < sum {
            return index;
        }
    }

    weights.len() - 1
}
