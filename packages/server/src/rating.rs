//! Elo rating engine.
//!
//! Expected score: `E = 1 / (1 + 10^((opponent - player) / 400))`.
//! New rating: `R' = R + K * (actual - expected)` with the winner's actual
//! score 1 and the loser's 0. Pure arithmetic, no I/O.

/// Maximum rating points exchanged per comparison.
pub const K_FACTOR: f64 = 32.0;

/// Rating assigned to every newly uploaded photo.
pub const INITIAL_RATING: f64 = 1000.0;

/// Expected score of a player rated `rating_a` against `rating_b`.
///
/// Always in (0, 1); saturates for extreme rating gaps, so updates stay
/// bounded no matter how skewed the inputs are.
fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Compute `(new_winner_rating, new_loser_rating)` for a single outcome.
///
/// Both results are rounded to 2 decimal places. Ratings are not clamped.
pub fn rate(winner_rating: f64, loser_rating: f64) -> (f64, f64) {
    let expected_winner = expected_score(winner_rating, loser_rating);
    let expected_loser = expected_score(loser_rating, winner_rating);

    let new_winner = winner_rating + K_FACTOR * (1.0 - expected_winner);
    let new_loser = loser_rating + K_FACTOR * (0.0 - expected_loser);

    (round2(new_winner), round2(new_loser))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
