//! Number predicates
//!
//! Values are read through [`Value::to_number`], so numeric strings take part
//! in range checks and anything that is not a number compares as `NaN`,
//! failing every bound.

use std::ops::Bound;

use super::trait_def::Predicate;
use crate::error::RuleError;
use crate::value::Value;

/// Predicate for a value within a numeric range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    min: Bound<f64>,
    max: Bound<f64>,
}

impl Range {
    /// Create a range from explicit bounds.
    pub fn new(min: Bound<f64>, max: Bound<f64>) -> Self {
        Range { min, max }
    }

    fn contains(&self, n: f64) -> bool {
        let above = match self.min {
            Bound::Included(min) => n >= min,
            Bound::Excluded(min) => n > min,
            Bound::Unbounded => !n.is_nan(),
        };
        let below = match self.max {
            Bound::Included(max) => n <= max,
            Bound::Excluded(max) => n < max,
            Bound::Unbounded => !n.is_nan(),
        };
        above && below
    }
}

impl Predicate for Range {
    #[inline]
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(self.contains(value.to_number()))
    }
}

/// Create a predicate that checks if value is between min and max (inclusive).
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// let p = between(0.0, 100.0);
/// assert_eq!(p.test(&Value::from(0)), Ok(true));
/// assert_eq!(p.test(&Value::from(100)), Ok(true));
/// assert_eq!(p.test(&Value::from("50")), Ok(true));
/// assert_eq!(p.test(&Value::from(101)), Ok(false));
/// ```
pub fn between(min: f64, max: f64) -> Range {
    Range::new(Bound::Included(min), Bound::Included(max))
}

/// Create a predicate that checks if value is zero or greater.
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// assert_eq!(positive().test(&Value::from(0)), Ok(true));
/// assert_eq!(positive().test(&Value::from(-3)), Ok(false));
/// ```
pub fn positive() -> Range {
    Range::new(Bound::Included(0.0), Bound::Unbounded)
}

/// Create a predicate that checks if value is -1 or less.
///
/// Fractions between -1 and 0 are not negative here.
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// assert_eq!(negative().test(&Value::from(-1)), Ok(true));
/// assert_eq!(negative().test(&Value::from(-0.5)), Ok(false));
/// ```
pub fn negative() -> Range {
    Range::new(Bound::Unbounded, Bound::Included(-1.0))
}

/// Predicate on a value's remainder modulo 2.
///
/// `odd` is the complement of `even` for every value: fractions, infinities
/// and non-numbers are all odd.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parity {
    even: bool,
}

impl Predicate for Parity {
    #[inline]
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        Ok((value.to_number() % 2.0 == 0.0) == self.even)
    }
}

/// Create a predicate for even numbers.
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// assert_eq!(even().test(&Value::from(4)), Ok(true));
/// assert_eq!(even().test(&Value::from(3)), Ok(false));
/// assert_eq!(odd().test(&Value::from("abc")), Ok(true));
/// ```
pub fn even() -> Parity {
    Parity { even: true }
}

/// Create a predicate for anything that is not even.
pub fn odd() -> Parity {
    Parity { even: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<P: Predicate>(p: &P, v: impl Into<Value>) -> bool {
        p.test(&v.into()).unwrap()
    }

    #[test]
    fn test_between_is_inclusive() {
        let p = between(-1.5, 2.0);
        assert!(check(&p, -1.5));
        assert!(check(&p, 2));
        assert!(!check(&p, 2.01));
        assert!(!check(&p, -2));
    }

    #[test]
    fn test_negative_and_positive() {
        assert!(check(&negative(), -1));
        assert!(check(&negative(), -42.5));
        assert!(!check(&negative(), -0.5));
        assert!(!check(&negative(), 0));
        assert!(check(&positive(), 0));
        assert!(check(&positive(), 7));
        assert!(!check(&positive(), -0.1));
    }

    #[test]
    fn test_non_numbers_fail_ranges() {
        assert_eq!(positive().test(&Value::Undefined), Ok(false));
        assert_eq!(negative().test(&Value::from("abc")), Ok(false));
        assert_eq!(between(0.0, 1.0).test(&Value::from(vec![1, 2])), Ok(false));
        // Null reads as zero.
        assert_eq!(positive().test(&Value::Null), Ok(true));
    }

    #[test]
    fn test_parity() {
        assert!(check(&even(), 0));
        assert!(check(&even(), -4));
        assert!(check(&odd(), -3));
        assert!(!check(&odd(), 2));
        assert!(check(&odd(), 2.5));
        assert!(!check(&even(), f64::INFINITY));
        assert!(check(&odd(), f64::INFINITY));
        assert!(check(&odd(), Value::Undefined));
        assert!(check(&odd(), "abc"));
        assert!(check(&even(), "8"));
        // Null reads as zero.
        assert!(check(&even(), Value::Null));
    }

    #[test]
    fn test_odd_is_complement_of_even() {
        let values = [
            Value::from(3),
            Value::from(4),
            Value::from(1.5),
            Value::from(f64::NAN),
            Value::from("x"),
            Value::Undefined,
            Value::from(vec![2]),
        ];
        for v in values {
            assert_ne!(even().test(&v), odd().test(&v), "{v}");
        }
    }
}
