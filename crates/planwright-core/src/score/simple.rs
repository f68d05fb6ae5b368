//! SimpleScore - Single-level score

use std::cmp::Ordering;
use std::fmt;

use super::traits::{init_prefix, split_init_prefix, ParseableScore, Score, ScoreParseError};

/// A score with a single level and no hard constraints.
///
/// Useful for problems where every constraint shares one objective, such
/// as minimizing total conflicts. Feasibility only requires that the
/// solution is fully initialized.
///
/// # Examples
///
/// ```
/// use planwright_core::{Score, SimpleScore};
///
/// let a = SimpleScore::of(-10);
/// let b = SimpleScore::of(-3);
/// assert!(b > a);
///
/// // An uninitialized score loses against any initialized one.
/// let c = SimpleScore::of_uninitialized(-1, 0);
/// assert!(a > c);
/// assert!(!c.is_solution_initialized());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleScore {
    init_score: i32,
    score: i64,
}

impl SimpleScore {
    /// The zero score.
    pub const ZERO: SimpleScore = SimpleScore {
        init_score: 0,
        score: 0,
    };

    /// One score unit.
    pub const ONE: SimpleScore = SimpleScore {
        init_score: 0,
        score: 1,
    };

    /// Creates a new initialized SimpleScore.
    #[inline]
    pub const fn of(score: i64) -> Self {
        SimpleScore {
            init_score: 0,
            score,
        }
    }

    /// Creates a score for a partially initialized solution.
    #[inline]
    pub const fn of_uninitialized(init_score: i32, score: i64) -> Self {
        SimpleScore { init_score, score }
    }

    /// Returns the score value.
    #[inline]
    pub const fn score(&self) -> i64 {
        self.score
    }
}

impl Score for SimpleScore {
    type Level = i64;

    #[inline]
    fn zero() -> Self {
        SimpleScore::ZERO
    }

    #[inline]
    fn init_score(&self) -> i32 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i32) -> Self {
        SimpleScore {
            init_score,
            score: self.score,
        }
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score == 0
    }

    #[inline]
    fn levels_count(&self) -> usize {
        1
    }

    #[inline]
    fn hard_levels_count(&self) -> usize {
        0
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.score]
    }

    impl_score_scale!(SimpleScore { score } => of);

    #[inline]
    fn to_scalar(&self) -> f64 {
        self.init_score as f64 * 1_000_000_000_000.0 + self.score as f64
    }
}

impl Ord for SimpleScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.init_score.cmp(&other.init_score) {
            Ordering::Equal => self.score.cmp(&other.score),
            other => other,
        }
    }
}

impl_score_ops!(SimpleScore { score } => of);

impl fmt::Debug for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimpleScore({}, {})", self.init_score, self.score)
    }
}

impl fmt::Display for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", init_prefix(self.init_score), self.score)
    }
}

impl ParseableScore for SimpleScore {
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let (init_score, rest) = split_init_prefix(s.trim())?;
        let score = rest.trim().parse::<i64>().map_err(|e| ScoreParseError {
            message: format!("Invalid simple score '{}': {}", rest, e),
        })?;
        Ok(SimpleScore { init_score, score })
    }

    fn to_string_repr(&self) -> String {
        format!("{}", self)
    }
}
