//! Matchup sampling.
//!
//! Selection is expressed over indices into a snapshot of the photo id
//! population, with the random source passed in by the caller, so tests can
//! drive it with a seeded generator.

use rand::Rng;

/// Choose two distinct indices uniformly at random from `0..population`.
///
/// Returns `None` when fewer than two items exist. Every item has non-zero
/// probability of selection (there is no vote-count precondition) and both
/// orderings of a pair can occur.
pub fn sample_pair<R: Rng + ?Sized>(rng: &mut R, population: usize) -> Option<(usize, usize)> {
    if population < 2 {
        return None;
    }

    let first = rng.random_range(0..population);
    // Draw from the remaining population and skip past `first`.
    let mut second = rng.random_range(0..population - 1);
    if second >= first {
        second += 1;
    }

    Some((first, second))
}
