//! HardMediumSoftScore - Three-level score

use std::cmp::Ordering;
use std::fmt;

use super::traits::{init_prefix, Score};

/// A score with hard, medium and soft constraint levels.
///
/// Hard constraints gate feasibility. Medium constraints outrank soft
/// constraints: no amount of soft improvement compensates a medium loss.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardMediumSoftScore {
    init_score: i32,
    hard: i64,
    medium: i64,
    soft: i64,
}

impl HardMediumSoftScore {
    /// The zero score.
    pub const ZERO: HardMediumSoftScore = HardMediumSoftScore {
        init_score: 0,
        hard: 0,
        medium: 0,
        soft: 0,
    };

    /// Creates a new initialized HardMediumSoftScore.
    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        HardMediumSoftScore {
            init_score: 0,
            hard,
            medium,
            soft,
        }
    }

    /// Creates a score for a partially initialized solution.
    #[inline]
    pub const fn of_uninitialized(init_score: i32, hard: i64, medium: i64, soft: i64) -> Self {
        HardMediumSoftScore {
            init_score,
            hard,
            medium,
            soft,
        }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the medium score component.
    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardMediumSoftScore {
    type Level = i64;

    #[inline]
    fn zero() -> Self {
        HardMediumSoftScore::ZERO
    }

    #[inline]
    fn init_score(&self) -> i32 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i32) -> Self {
        let mut out = *self;
        out.init_score = init_score;
        out
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score == 0 && self.hard >= 0
    }

    #[inline]
    fn levels_count(&self) -> usize {
        3
    }

    #[inline]
    fn hard_levels_count(&self) -> usize {
        1
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.medium, self.soft]
    }

    impl_score_scale!(HardMediumSoftScore { hard, medium, soft } => of);

    #[inline]
    fn to_scalar(&self) -> f64 {
        self.init_score as f64 * 1e18
            + self.hard as f64 * 1e12
            + self.medium as f64 * 1e6
            + self.soft as f64
    }
}

impl Ord for HardMediumSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.init_score
            .cmp(&other.init_score)
            .then_with(|| self.hard.cmp(&other.hard))
            .then_with(|| self.medium.cmp(&other.medium))
            .then_with(|| self.soft.cmp(&other.soft))
    }
}

impl_score_ops!(HardMediumSoftScore { hard, medium, soft } => of);

impl fmt::Debug for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardMediumSoftScore({}, {}, {}, {})",
            self.init_score, self.hard, self.medium, self.soft
        )
    }
}

impl fmt::Display for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}hard/{}medium/{}soft",
            init_prefix(self.init_score),
            self.hard,
            self.medium,
            self.soft
        )
    }
}

impl_score_parse!(HardMediumSoftScore {
    hard => "hard", medium => "medium", soft => "soft"
} => of);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ParseableScore;

    #[test]
    fn medium_outranks_soft() {
        assert!(
            HardMediumSoftScore::of(0, -1, 0) > HardMediumSoftScore::of(0, -2, 1_000_000)
        );
        assert!(HardMediumSoftScore::of(0, 0, -5) > HardMediumSoftScore::of(0, -1, 100));
    }

    #[test]
    fn init_score_dominates() {
        assert!(
            HardMediumSoftScore::of(-10, -10, -10)
                > HardMediumSoftScore::of_uninitialized(-1, 5, 5, 5)
        );
    }

    #[test]
    fn parse_round_trip() {
        let s = HardMediumSoftScore::of_uninitialized(-2, -1, 0, 42);
        assert_eq!(s.to_string(), "-2init/-1hard/0medium/42soft");
        assert_eq!(
            HardMediumSoftScore::parse("-2init/-1hard/0medium/42soft").unwrap(),
            s
        );
    }

    #[test]
    fn multiply_applies_to_all_levels() {
        let s = HardMediumSoftScore::of_uninitialized(-3, 4, -5, 7);
        assert_eq!(
            s.multiply(0.5),
            HardMediumSoftScore::of_uninitialized(-2, 2, -3, 3)
        );
    }
}
