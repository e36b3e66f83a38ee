use super::domain::{CriterionContribution, Direction};

const MAX_SCORE: f64 = 100.0;

/// Direction-oriented, weighted share of a single criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub oriented_score: f64,
    pub weighted: f64,
}

/// Orient a 0..=100 magnitude so that a higher result always ranks earlier.
pub fn orient(raw_score: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Desc => raw_score,
        Direction::Asc => MAX_SCORE - raw_score,
    }
}

pub fn contribute(raw_score: f64, direction: Direction, weight: u32) -> Contribution {
    let oriented_score = orient(raw_score, direction);
    Contribution {
        oriented_score,
        weighted: oriented_score * f64::from(weight),
    }
}

/// Weighted average of the contributions, on the 0..=100 scale.
///
/// Dividing by the active weight total keeps scores comparable across
/// configurations whose weights do not sum to 100. Returns `None` when the
/// total weight is zero; the engine refuses such configurations up front.
pub fn aggregate(contributions: &[CriterionContribution]) -> Option<f64> {
    let total_weight: u64 = contributions
        .iter()
        .map(|contribution| u64::from(contribution.weight))
        .sum();
    if total_weight == 0 {
        return None;
    }

    let weighted: f64 = contributions
        .iter()
        .map(|contribution| contribution.weighted_contribution)
        .sum();
    Some(weighted / total_weight as f64)
}
