//! Core Score trait definition

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Neg, Sub};

/// Core trait for all score types in Planwright.
///
/// Scores represent the quality of a planning solution. They are used to:
/// - Compare solutions (better/worse/equal)
/// - Guide the optimization process
/// - Determine feasibility
///
/// All score implementations must be immutable (operations return new
/// instances), thread-safe and totally ordered.
///
/// # Init score
///
/// Every score carries an `init_score` dimension (always `<= 0`): the
/// negated number of still-unassigned planning variables. A score with
/// `init_score == 0` belongs to a fully initialized solution. Comparison
/// is lexicographic with `init_score` first, so any uninitialized score
/// loses against any initialized one regardless of level values.
///
/// # Score levels
///
/// Scores can have multiple levels (e.g. hard/soft constraints). When
/// comparing scores, higher-priority levels are compared first. The hard
/// prefix (the first `hard_levels_count()` levels) determines feasibility.
pub trait Score:
    Clone
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + Hash
    + PartialOrd
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// The scalar type of a single level, exposed by `to_level_numbers`.
    type Level: Copy + PartialOrd + Ord + Debug + Send + Sync + 'static;

    /// Returns the zero score (identity element for addition).
    fn zero() -> Self;

    /// Returns the init score: 0 for a fully initialized solution,
    /// otherwise the negated count of unassigned planning variables.
    fn init_score(&self) -> i32;

    /// Returns a copy of this score with the given init score.
    fn with_init_score(&self, init_score: i32) -> Self;

    /// Returns true if the solution this score belongs to is fully
    /// initialized (no unassigned planning variables).
    fn is_solution_initialized(&self) -> bool {
        self.init_score() == 0
    }

    /// Returns true if this score represents a feasible solution:
    /// fully initialized and every hard level is `>= 0`.
    fn is_feasible(&self) -> bool;

    /// Returns the number of score levels of this instance.
    fn levels_count(&self) -> usize;

    /// Returns the number of levels in the hard (feasibility) prefix.
    fn hard_levels_count(&self) -> usize;

    /// Returns the raw level values, highest priority first.
    ///
    /// The init score is not a level and is not included.
    fn to_level_numbers(&self) -> Vec<Self::Level>;

    /// Multiplies every level (and the init score, in lockstep) by a
    /// scalar, flooring the result.
    fn multiply(&self, multiplicand: f64) -> Self;

    /// Divides every level (and the init score) by a scalar, flooring.
    ///
    /// A zero divisor is sanitized to 1 so that aggregate/statistics code
    /// stays total.
    fn divide(&self, divisor: f64) -> Self;

    /// Raises every level (and the init score) to a power, flooring.
    fn power(&self, exponent: f64) -> Self;

    /// Returns the absolute value of this score.
    fn abs(&self) -> Self;

    /// Collapses this score to a single f64 for probabilistic acceptors.
    ///
    /// Higher-priority levels are weighted heavier; the mapping is
    /// monotonic but lossy.
    fn to_scalar(&self) -> f64;

    /// Compares two scores (init score first, then levels).
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Returns true if this score is better than the other score.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns true if this score is worse than the other score.
    fn is_worse_than(&self, other: &Self) -> bool {
        self < other
    }
}

/// Trait for scores that round-trip through the canonical string form,
/// e.g. `-7init/0hard/-3soft` (the `init/` prefix is omitted when the
/// init score is zero).
pub trait ParseableScore: Score {
    /// Parses a score from its canonical string representation.
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    /// Returns the canonical string representation of this score.
    fn to_string_repr(&self) -> String;
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl std::fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}

/// Splits an optional `<n>init/` prefix off a canonical score string.
///
/// Returns the init score and the remainder holding the level parts.
pub(crate) fn split_init_prefix(s: &str) -> Result<(i32, &str), ScoreParseError> {
    match s.find("init/") {
        Some(pos) => {
            let init_str = &s[..pos];
            let init = init_str
                .trim()
                .parse::<i32>()
                .map_err(|e| ScoreParseError {
                    message: format!("Invalid init score '{}': {}", init_str, e),
                })?;
            Ok((init, &s[pos + "init/".len()..]))
        }
        None => Ok((0, s)),
    }
}

/// Formats the canonical `<n>init/` prefix, empty when init score is zero.
pub(crate) fn init_prefix(init_score: i32) -> String {
    if init_score == 0 {
        String::new()
    } else {
        format!("{}init/", init_score)
    }
}
