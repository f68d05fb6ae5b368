//! Declarative macros for reducing score type boilerplate.
//!
//! These macros generate the repetitive trait implementations that all
//! field-based score types share: arithmetic ops, scalar scaling with
//! floor semantics, and slash-separated parsing with the optional
//! `<n>init/` prefix.

/// Generates `PartialOrd`, `Add`, `Sub`, and `Neg` for a field-based score type.
///
/// The constructor must accept fields in the order they are listed and
/// produce an initialized score; the init score is combined separately.
///
/// # Usage
/// ```ignore
/// impl_score_ops!(HardSoftScore { hard, soft } => of);
/// ```
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                let mut out = $type::$ctor( $(self.$field + other.$field),+ );
                out.init_score = self.init_score + other.init_score;
                out
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                let mut out = $type::$ctor( $(self.$field - other.$field),+ );
                out.init_score = self.init_score - other.init_score;
                out
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                let mut out = $type::$ctor( $(-self.$field),+ );
                out.init_score = -self.init_score;
                out
            }
        }
    };
}

/// Generates `multiply`, `divide`, `power`, and `abs` methods for the
/// `Score` trait impl of integer-level score types.
///
/// Intended to be used *inside* an `impl Score for Type { ... }` block.
/// All scaling floors toward negative infinity and applies to the init
/// score in lockstep; a zero divisor is sanitized to 1.
///
/// # Usage
/// ```ignore
/// impl Score for HardSoftScore {
///     // ...other methods...
///     impl_score_scale!(HardSoftScore { hard, soft } => of);
/// }
/// ```
macro_rules! impl_score_scale {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        fn multiply(&self, multiplicand: f64) -> Self {
            let mut out = $type::$ctor(
                $( (self.$field as f64 * multiplicand).floor() as i64 ),+
            );
            out.init_score = (self.init_score as f64 * multiplicand).floor() as i32;
            out
        }

        fn divide(&self, divisor: f64) -> Self {
            let divisor = if divisor == 0.0 { 1.0 } else { divisor };
            let mut out = $type::$ctor(
                $( (self.$field as f64 / divisor).floor() as i64 ),+
            );
            out.init_score = (self.init_score as f64 / divisor).floor() as i32;
            out
        }

        fn power(&self, exponent: f64) -> Self {
            let mut out = $type::$ctor(
                $( (self.$field as f64).powf(exponent).floor() as i64 ),+
            );
            out.init_score = (self.init_score as f64).powf(exponent).floor() as i32;
            out
        }

        fn abs(&self) -> Self {
            let mut out = $type::$ctor( $( self.$field.abs() ),+ );
            out.init_score = self.init_score.abs();
            out
        }
    };
}

/// Generates `ParseableScore` impl for scores using the `"Xsuffix/Ysuffix"`
/// format with an optional leading `<n>init/` prefix.
///
/// Each field maps to a suffix label (e.g., `hard => "hard"`). All level
/// values are parsed as `i64`.
///
/// # Usage
/// ```ignore
/// impl_score_parse!(HardSoftScore { hard => "hard", soft => "soft" } => of);
/// ```
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ } => $ctor:ident) => {
        impl $crate::score::traits::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::score::traits::ScoreParseError> {
                let s = s.trim();
                let (init_score, rest) = $crate::score::traits::split_init_prefix(s)?;
                let parts: Vec<&str> = rest.split('/').collect();
                let suffixes: &[&str] = &[ $($suffix),+ ];
                let count = suffixes.len();

                if parts.len() != count {
                    return Err($crate::score::traits::ScoreParseError {
                        message: format!(
                            "Invalid {} format '{}': expected {} parts separated by '/'",
                            stringify!($type), s, count
                        ),
                    });
                }

                let mut _idx = 0usize;
                $(
                    let $field = {
                        let part = parts[_idx].trim();
                        let num_str = part.strip_suffix($suffix).ok_or_else(|| {
                            $crate::score::traits::ScoreParseError {
                                message: format!(
                                    "{} part '{}' must end with '{}'",
                                    stringify!($field), part, $suffix
                                ),
                            }
                        })?;
                        let val = num_str.parse::<i64>().map_err(|e| {
                            $crate::score::traits::ScoreParseError {
                                message: format!(
                                    "Invalid {} score '{}': {}",
                                    $suffix, num_str, e
                                ),
                            }
                        })?;
                        _idx += 1;
                        val
                    };
                )+

                let mut out = $type::$ctor( $($field),+ );
                out.init_score = init_score;
                Ok(out)
            }

            fn to_string_repr(&self) -> String {
                format!("{}", self)
            }
        }
    };
}

// Macros are used via #[macro_use] on the module declaration.
