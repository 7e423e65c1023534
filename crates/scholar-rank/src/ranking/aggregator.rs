use super::domain::{Factor, SubScores};
use super::weights::WeightTable;

const PRECISION: f64 = 10_000.0;

/// Rounds half away from zero to four decimal places.
pub fn round4(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// Weighted sum of raw factor scores.
///
/// Returns the rounded sub-scores and the rounded final score. The sum is taken over the
/// unrounded values and clamped into [0, 1], so weight tables summing above 1.0 cannot
/// push a score out of range.
pub fn aggregate<I>(raw_scores: I, weights: &WeightTable) -> (SubScores, f64)
where
    I: IntoIterator<Item = (Factor, f64)>,
{
    let mut sub_scores = SubScores::new();
    let mut total = 0.0;

    for (factor, score) in raw_scores {
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        total += weights.weight(factor) * score;
        sub_scores.insert(factor, round4(score));
    }

    (sub_scores, round4(total.clamp(0.0, 1.0)))
}
