//! BendableScore - Score with a configurable number of hard and soft levels

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::traits::{init_prefix, split_init_prefix, ParseableScore, Score, ScoreParseError};

/// A score whose hard and soft level counts are chosen at runtime.
///
/// The level counts are part of the value: combining or comparing two
/// bendable scores with different level configurations is a caller bug
/// and panics immediately rather than producing a silently wrong result.
///
/// `Score::zero()` returns the zero score with no levels; sized zeros
/// come from [`BendableScore::zero_of`].
///
/// # Examples
///
/// ```
/// use planwright_core::{BendableScore, Score};
///
/// let a = BendableScore::of(vec![0, -1], vec![-10]);
/// let b = BendableScore::of(vec![0, 0], vec![-99]);
/// assert!(b > a);
/// assert!(b.is_feasible());
/// assert_eq!(a.to_string(), "[0/-1]hard/[-10]soft");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BendableScore {
    init_score: i32,
    hard_scores: Vec<i64>,
    soft_scores: Vec<i64>,
}

impl BendableScore {
    /// Creates a new initialized BendableScore.
    #[inline]
    pub fn of(hard_scores: Vec<i64>, soft_scores: Vec<i64>) -> Self {
        BendableScore {
            init_score: 0,
            hard_scores,
            soft_scores,
        }
    }

    /// Creates a score for a partially initialized solution.
    #[inline]
    pub fn of_uninitialized(init_score: i32, hard_scores: Vec<i64>, soft_scores: Vec<i64>) -> Self {
        BendableScore {
            init_score,
            hard_scores,
            soft_scores,
        }
    }

    /// Creates the zero score with the given level configuration.
    pub fn zero_of(hard_levels: usize, soft_levels: usize) -> Self {
        BendableScore {
            init_score: 0,
            hard_scores: vec![0; hard_levels],
            soft_scores: vec![0; soft_levels],
        }
    }

    /// Returns the hard score at the given level.
    #[inline]
    pub fn hard_score(&self, level: usize) -> i64 {
        self.hard_scores[level]
    }

    /// Returns the soft score at the given level.
    #[inline]
    pub fn soft_score(&self, level: usize) -> i64 {
        self.soft_scores[level]
    }

    /// Returns the number of soft levels.
    #[inline]
    pub fn soft_levels_count(&self) -> usize {
        self.soft_scores.len()
    }

    /// Panics when the other score has a different level configuration.
    fn check_level_config(&self, other: &Self) {
        if self.hard_scores.len() != other.hard_scores.len()
            || self.soft_scores.len() != other.soft_scores.len()
        {
            panic!(
                "BendableScore level configuration mismatch: [{}/{}] vs [{}/{}]",
                self.hard_scores.len(),
                self.soft_scores.len(),
                other.hard_scores.len(),
                other.soft_scores.len()
            );
        }
    }

    fn map_levels(&self, init_score: i32, f: impl Fn(i64) -> i64) -> Self {
        BendableScore {
            init_score,
            hard_scores: self.hard_scores.iter().map(|&v| f(v)).collect(),
            soft_scores: self.soft_scores.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl Score for BendableScore {
    type Level = i64;

    fn zero() -> Self {
        BendableScore::default()
    }

    #[inline]
    fn init_score(&self) -> i32 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i32) -> Self {
        let mut out = self.clone();
        out.init_score = init_score;
        out
    }

    fn is_feasible(&self) -> bool {
        self.init_score == 0 && self.hard_scores.iter().all(|&h| h >= 0)
    }

    #[inline]
    fn levels_count(&self) -> usize {
        self.hard_scores.len() + self.soft_scores.len()
    }

    #[inline]
    fn hard_levels_count(&self) -> usize {
        self.hard_scores.len()
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        let mut levels = Vec::with_capacity(self.levels_count());
        levels.extend_from_slice(&self.hard_scores);
        levels.extend_from_slice(&self.soft_scores);
        levels
    }

    fn multiply(&self, multiplicand: f64) -> Self {
        self.map_levels(
            (self.init_score as f64 * multiplicand).floor() as i32,
            |v| (v as f64 * multiplicand).floor() as i64,
        )
    }

    fn divide(&self, divisor: f64) -> Self {
        let divisor = if divisor == 0.0 { 1.0 } else { divisor };
        self.map_levels(
            (self.init_score as f64 / divisor).floor() as i32,
            |v| (v as f64 / divisor).floor() as i64,
        )
    }

    fn power(&self, exponent: f64) -> Self {
        self.map_levels(
            (self.init_score as f64).powf(exponent).floor() as i32,
            |v| (v as f64).powf(exponent).floor() as i64,
        )
    }

    fn abs(&self) -> Self {
        self.map_levels(self.init_score.abs(), |v| v.abs())
    }

    fn to_scalar(&self) -> f64 {
        self.to_level_numbers()
            .iter()
            .fold(self.init_score as f64, |acc, &v| acc * 1_000_000.0 + v as f64)
    }
}

impl Ord for BendableScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.check_level_config(other);
        self.init_score
            .cmp(&other.init_score)
            .then_with(|| self.hard_scores.cmp(&other.hard_scores))
            .then_with(|| self.soft_scores.cmp(&other.soft_scores))
    }
}

impl PartialOrd for BendableScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Add for BendableScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.check_level_config(&other);
        BendableScore {
            init_score: self.init_score + other.init_score,
            hard_scores: zip_levels(&self.hard_scores, &other.hard_scores, |a, b| a + b),
            soft_scores: zip_levels(&self.soft_scores, &other.soft_scores, |a, b| a + b),
        }
    }
}

impl std::ops::Sub for BendableScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.check_level_config(&other);
        BendableScore {
            init_score: self.init_score - other.init_score,
            hard_scores: zip_levels(&self.hard_scores, &other.hard_scores, |a, b| a - b),
            soft_scores: zip_levels(&self.soft_scores, &other.soft_scores, |a, b| a - b),
        }
    }
}

impl std::ops::Neg for BendableScore {
    type Output = Self;

    fn neg(self) -> Self {
        self.map_levels(-self.init_score, |v| -v)
    }
}

fn zip_levels(a: &[i64], b: &[i64], f: impl Fn(i64, i64) -> i64) -> Vec<i64> {
    a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect()
}

impl fmt::Debug for BendableScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BendableScore({}, {:?}, {:?})",
            self.init_score, self.hard_scores, self.soft_scores
        )
    }
}

impl fmt::Display for BendableScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}hard/{}soft",
            init_prefix(self.init_score),
            bracket_list(&self.hard_scores),
            bracket_list(&self.soft_scores)
        )
    }
}

fn bracket_list(levels: &[i64]) -> String {
    let parts: Vec<String> = levels.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join("/"))
}

fn parse_bracket_list(part: &str, suffix: &str) -> Result<Vec<i64>, ScoreParseError> {
    let inner = part
        .trim()
        .strip_suffix(suffix)
        .and_then(|s| s.strip_prefix('['))
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ScoreParseError {
            message: format!("part '{}' must look like '[a/b/...]{}'", part, suffix),
        })?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split('/')
        .map(|v| {
            i64::from_str(v.trim()).map_err(|e| ScoreParseError {
                message: format!("Invalid bendable level '{}': {}", v, e),
            })
        })
        .collect()
}

impl ParseableScore for BendableScore {
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let (init_score, rest) = split_init_prefix(s.trim())?;
        // The level lists contain '/' themselves, so split on the bracket
        // boundary between the hard and soft parts.
        let boundary = rest.find("]hard/").ok_or_else(|| ScoreParseError {
            message: format!(
                "Invalid BendableScore format '{}': expected '[..]hard/[..]soft'",
                s
            ),
        })?;
        let (hard_part, soft_part) = rest.split_at(boundary + "]hard".len());
        let soft_part = &soft_part[1..];
        Ok(BendableScore {
            init_score,
            hard_scores: parse_bracket_list(hard_part, "hard")?,
            soft_scores: parse_bracket_list(soft_part, "soft")?,
        })
    }

    fn to_string_repr(&self) -> String {
        format!("{}", self)
    }
}
