//! HardSoftScore - Two-level score with hard and soft constraints

use std::cmp::Ordering;
use std::fmt;

use super::traits::{init_prefix, Score};

/// A score with separate hard and soft constraint levels.
///
/// Hard constraints must be satisfied for a solution to be feasible.
/// Soft constraints are optimization objectives.
///
/// When comparing scores:
/// 1. Init scores are compared first
/// 2. Hard scores are compared next
/// 3. Soft scores are only compared when hard scores are equal
///
/// # Examples
///
/// ```
/// use planwright_core::{HardSoftScore, Score};
///
/// let score1 = HardSoftScore::of(-1, -100);  // 1 hard constraint broken
/// let score2 = HardSoftScore::of(0, -200);   // Feasible but poor soft score
///
/// // Feasible solutions are always better than infeasible ones
/// assert!(score2 > score1);
///
/// let score3 = HardSoftScore::of(0, -50);    // Better soft score
/// assert!(score3 > score2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    init_score: i32,
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore {
        init_score: 0,
        hard: 0,
        soft: 0,
    };

    /// One hard constraint unit.
    pub const ONE_HARD: HardSoftScore = HardSoftScore {
        init_score: 0,
        hard: 1,
        soft: 0,
    };

    /// One soft constraint unit.
    pub const ONE_SOFT: HardSoftScore = HardSoftScore {
        init_score: 0,
        hard: 0,
        soft: 1,
    };

    /// Creates a new initialized HardSoftScore.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore {
            init_score: 0,
            hard,
            soft,
        }
    }

    /// Creates a score for a partially initialized solution.
    #[inline]
    pub const fn of_uninitialized(init_score: i32, hard: i64, soft: i64) -> Self {
        HardSoftScore {
            init_score,
            hard,
            soft,
        }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore::of(hard, 0)
    }

    /// Creates a score with only a soft component.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore::of(0, soft)
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardSoftScore {
    type Level = i64;

    #[inline]
    fn zero() -> Self {
        HardSoftScore::ZERO
    }

    #[inline]
    fn init_score(&self) -> i32 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i32) -> Self {
        HardSoftScore {
            init_score,
            hard: self.hard,
            soft: self.soft,
        }
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score == 0 && self.hard >= 0
    }

    #[inline]
    fn levels_count(&self) -> usize {
        2
    }

    #[inline]
    fn hard_levels_count(&self) -> usize {
        1
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.soft]
    }

    impl_score_scale!(HardSoftScore { hard, soft } => of);

    #[inline]
    fn to_scalar(&self) -> f64 {
        self.init_score as f64 * 1_000_000_000_000.0
            + self.hard as f64 * 1_000_000.0
            + self.soft as f64
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.init_score
            .cmp(&other.init_score)
            .then_with(|| self.hard.cmp(&other.hard))
            .then_with(|| self.soft.cmp(&other.soft))
    }
}

impl_score_ops!(HardSoftScore { hard, soft } => of);

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardSoftScore({}, {}, {})",
            self.init_score, self.hard, self.soft
        )
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}hard/{}soft",
            init_prefix(self.init_score),
            self.hard,
            self.soft
        )
    }
}

impl_score_parse!(HardSoftScore { hard => "hard", soft => "soft" } => of);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ParseableScore;

    #[test]
    fn ordering_is_lexicographic() {
        assert!(HardSoftScore::of(0, -500) > HardSoftScore::of(-1, 0));
        assert!(HardSoftScore::of(-1, 100) > HardSoftScore::of(-2, 9000));
        assert!(HardSoftScore::of(0, -10) > HardSoftScore::of(0, -20));
        assert!(HardSoftScore::of(0, 0) > HardSoftScore::of_uninitialized(-1, 50, 50));
    }

    #[test]
    fn feasibility_needs_init_and_hard() {
        assert!(HardSoftScore::of(0, -999).is_feasible());
        assert!(!HardSoftScore::of(-1, 0).is_feasible());
        assert!(!HardSoftScore::of_uninitialized(-3, 0, 0).is_feasible());
    }

    #[test]
    fn add_sub_neg() {
        let a = HardSoftScore::of_uninitialized(-1, -2, -30);
        let b = HardSoftScore::of(-1, -5);
        assert_eq!(a + b, HardSoftScore::of_uninitialized(-1, -3, -35));
        assert_eq!(a - b, HardSoftScore::of_uninitialized(-1, -1, -25));
        assert_eq!(-a, HardSoftScore::of_uninitialized(1, 2, 30));
    }

    #[test]
    fn scaling_floors_each_level() {
        let s = HardSoftScore::of(-3, 5);
        assert_eq!(s.multiply(0.5), HardSoftScore::of(-2, 2));
        assert_eq!(s.divide(2.0), HardSoftScore::of(-2, 2));
        assert_eq!(HardSoftScore::of(4, 9).power(0.5), HardSoftScore::of(2, 3));
        assert_eq!(s.abs(), HardSoftScore::of(3, 5));
    }

    #[test]
    fn display_and_parse() {
        let s = HardSoftScore::of_uninitialized(-7, 0, -3);
        assert_eq!(s.to_string(), "-7init/0hard/-3soft");
        assert_eq!(HardSoftScore::parse("-7init/0hard/-3soft").unwrap(), s);
        assert_eq!(
            HardSoftScore::parse("-1hard/-20soft").unwrap(),
            HardSoftScore::of(-1, -20)
        );
        assert!(HardSoftScore::parse("-1hard").is_err());
        assert!(HardSoftScore::parse("-1soft/-2hard").is_err());
    }

    #[test]
    fn level_numbers_exclude_init() {
        let s = HardSoftScore::of_uninitialized(-2, -1, -7);
        assert_eq!(s.to_level_numbers(), vec![-1, -7]);
    }
}
