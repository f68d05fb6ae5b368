//! HardSoftDecimalScore - Two-level score with exact decimal arithmetic

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use super::traits::{init_prefix, split_init_prefix, ParseableScore, Score, ScoreParseError};

/// A hard/soft score backed by fixed-point decimals.
///
/// Use this when constraint weights are monetary or otherwise must not
/// accumulate binary floating point error. Scaling operations floor each
/// level at its own original decimal scale, so `multiply` never invents
/// precision. Equality and hashing ignore trailing zeros: `1.2` and
/// `1.20` are the same score value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftDecimalScore {
    init_score: i32,
    hard: Decimal,
    soft: Decimal,
}

impl HardSoftDecimalScore {
    /// The zero score.
    pub const ZERO: HardSoftDecimalScore = HardSoftDecimalScore {
        init_score: 0,
        hard: Decimal::ZERO,
        soft: Decimal::ZERO,
    };

    /// Creates a new initialized HardSoftDecimalScore.
    #[inline]
    pub const fn of(hard: Decimal, soft: Decimal) -> Self {
        HardSoftDecimalScore {
            init_score: 0,
            hard,
            soft,
        }
    }

    /// Creates a score for a partially initialized solution.
    #[inline]
    pub const fn of_uninitialized(init_score: i32, hard: Decimal, soft: Decimal) -> Self {
        HardSoftDecimalScore {
            init_score,
            hard,
            soft,
        }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> Decimal {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> Decimal {
        self.soft
    }
}

/// Floors toward negative infinity at the level's original decimal scale.
fn floor_at_scale(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::ToNegativeInfinity)
}

fn scale_level(level: Decimal, factor: Decimal) -> Decimal {
    floor_at_scale(level * factor, level.scale())
}

impl Score for HardSoftDecimalScore {
    type Level = Decimal;

    #[inline]
    fn zero() -> Self {
        HardSoftDecimalScore::ZERO
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
        self.init_score == 0 && self.hard >= Decimal::ZERO
    }

    #[inline]
    fn levels_count(&self) -> usize {
        2
    }

    #[inline]
    fn hard_levels_count(&self) -> usize {
        1
    }

    fn to_level_numbers(&self) -> Vec<Decimal> {
        vec![self.hard, self.soft]
    }

    fn multiply(&self, multiplicand: f64) -> Self {
        let factor = Decimal::from_f64(multiplicand).unwrap_or(Decimal::ONE);
        HardSoftDecimalScore {
            init_score: (self.init_score as f64 * multiplicand).floor() as i32,
            hard: scale_level(self.hard, factor),
            soft: scale_level(self.soft, factor),
        }
    }

    fn divide(&self, divisor: f64) -> Self {
        let divisor = if divisor == 0.0 { 1.0 } else { divisor };
        let dec_divisor = match Decimal::from_f64(divisor) {
            Some(d) if !d.is_zero() => d,
            _ => Decimal::ONE,
        };
        HardSoftDecimalScore {
            init_score: (self.init_score as f64 / divisor).floor() as i32,
            hard: floor_at_scale(self.hard / dec_divisor, self.hard.scale()),
            soft: floor_at_scale(self.soft / dec_divisor, self.soft.scale()),
        }
    }

    fn power(&self, exponent: f64) -> Self {
        // Exponentiation goes through f64; the result is floored back at
        // each level's original scale.
        let pow_level = |level: Decimal| {
            let raised = level.to_f64().unwrap_or(0.0).powf(exponent);
            let raised = Decimal::from_f64(raised).unwrap_or(Decimal::ZERO);
            floor_at_scale(raised, level.scale())
        };
        HardSoftDecimalScore {
            init_score: (self.init_score as f64).powf(exponent).floor() as i32,
            hard: pow_level(self.hard),
            soft: pow_level(self.soft),
        }
    }

    fn abs(&self) -> Self {
        HardSoftDecimalScore {
            init_score: self.init_score.abs(),
            hard: self.hard.abs(),
            soft: self.soft.abs(),
        }
    }

    fn to_scalar(&self) -> f64 {
        self.init_score as f64 * 1_000_000_000_000.0
            + self.hard.to_f64().unwrap_or(0.0) * 1_000_000.0
            + self.soft.to_f64().unwrap_or(0.0)
    }
}

impl Ord for HardSoftDecimalScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.init_score
            .cmp(&other.init_score)
            .then_with(|| self.hard.cmp(&other.hard))
            .then_with(|| self.soft.cmp(&other.soft))
    }
}

impl_score_ops!(HardSoftDecimalScore { hard, soft } => of);

impl fmt::Debug for HardSoftDecimalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardSoftDecimalScore({}, {}, {})",
            self.init_score, self.hard, self.soft
        )
    }
}

impl fmt::Display for HardSoftDecimalScore {
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

impl ParseableScore for HardSoftDecimalScore {
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let (init_score, rest) = split_init_prefix(s.trim())?;
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 2 {
            return Err(ScoreParseError {
                message: format!(
                    "Invalid HardSoftDecimalScore format '{}': expected 2 parts separated by '/'",
                    s
                ),
            });
        }
        let parse_level = |part: &str, suffix: &str| -> Result<Decimal, ScoreParseError> {
            let num_str = part.trim().strip_suffix(suffix).ok_or_else(|| ScoreParseError {
                message: format!("part '{}' must end with '{}'", part, suffix),
            })?;
            Decimal::from_str(num_str).map_err(|e| ScoreParseError {
                message: format!("Invalid {} score '{}': {}", suffix, num_str, e),
            })
        };
        Ok(HardSoftDecimalScore {
            init_score,
            hard: parse_level(parts[0], "hard")?,
            soft: parse_level(parts[1], "soft")?,
        })
    }

    fn to_string_repr(&self) -> String {
        format!("{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    fn hash_of(score: &HardSoftDecimalScore) -> u64 {
        let mut hasher = DefaultHasher::new();
        score.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn trailing_zeros_do_not_affect_equality_or_hash() {
        let a = HardSoftDecimalScore::of(dec(120, 2), dec(-35, 1));
        let b = HardSoftDecimalScore::of(dec(12, 1), dec(-350, 2));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let feasible = HardSoftDecimalScore::of(Decimal::ZERO, dec(-9999, 2));
        let infeasible = HardSoftDecimalScore::of(dec(-1, 2), Decimal::ZERO);
        assert!(feasible > infeasible);
        assert!(feasible > HardSoftDecimalScore::of_uninitialized(-1, Decimal::ONE, Decimal::ONE));
    }

    #[test]
    fn multiply_floors_at_original_scale() {
        // 1.25 * 0.5 = 0.625, floored at scale 2 -> 0.62
        let s = HardSoftDecimalScore::of(dec(125, 2), dec(-125, 2));
        let scaled = s.multiply(0.5);
        assert_eq!(scaled.hard(), dec(62, 2));
        // -0.625 floors to -0.63
        assert_eq!(scaled.soft(), dec(-63, 2));
    }

    #[test]
    fn divide_by_zero_is_sanitized() {
        let s = HardSoftDecimalScore::of(dec(31, 1), dec(-7, 0));
        assert_eq!(s.divide(0.0), s);
    }

    #[test]
    fn parse_round_trip() {
        let s = HardSoftDecimalScore::of_uninitialized(-2, dec(-150, 2), dec(375, 1));
        assert_eq!(s.to_string(), "-2init/-1.50hard/37.5soft");
        assert_eq!(
            HardSoftDecimalScore::parse("-2init/-1.50hard/37.5soft").unwrap(),
            s
        );
        assert!(HardSoftDecimalScore::parse("1.5hard").is_err());
    }

    #[test]
    fn feasibility() {
        assert!(HardSoftDecimalScore::of(Decimal::ZERO, dec(-1, 0)).is_feasible());
        assert!(!HardSoftDecimalScore::of(dec(-1, 2), Decimal::ZERO).is_feasible());
    }
}
