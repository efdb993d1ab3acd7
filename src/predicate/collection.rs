//! Length, position and membership predicates
//!
//! These work on strings (counted in characters) and arrays. Asking
//! `undefined` or `null` for a length or an element is an error, while numbers
//! and booleans simply have none.

use super::trait_def::Predicate;
use crate::error::RuleError;
use crate::value::Value;

/// Predicate for length bounds (both inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
}

impl Length {
    /// Create a length predicate with optional bounds.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Length { min, max }
    }
}

impl Predicate for Length {
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        if value.is_nullish() {
            return Err(RuleError::no_property("length", value));
        }
        let Some(len) = value.len() else {
            return Ok(false);
        };
        Ok(self.min.is_none_or(|min| len >= min) && self.max.is_none_or(|max| len <= max))
    }
}

/// Create a predicate for length between min and max (inclusive).
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// let p = length(2, 3);
/// assert_eq!(p.test(&Value::from("a")), Ok(false));
/// assert_eq!(p.test(&Value::from("abc")), Ok(true));
/// assert_eq!(p.test(&Value::from(vec![1, 2])), Ok(true));
/// assert!(p.test(&Value::Null).is_err());
/// ```
pub fn length(min: usize, max: usize) -> Length {
    Length::new(Some(min), Some(max))
}

/// Create a predicate for length of at least min.
pub fn min_length(min: usize) -> Length {
    Length::new(Some(min), None)
}

/// Create a predicate for length of at most max.
pub fn max_length(max: usize) -> Length {
    Length::new(None, Some(max))
}

/// Create a predicate for empty strings and arrays.
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// assert_eq!(empty().test(&Value::from("")), Ok(true));
/// assert_eq!(empty().test(&Value::from(vec![0])), Ok(false));
/// ```
pub fn empty() -> Length {
    Length::new(Some(0), Some(0))
}

/// Which end of a string or array to look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Index 0.
    First,
    /// Index `len - 1`.
    Last,
}

/// Predicate that compares the element at one end of a string or array.
///
/// A missing element (empty input, or a value with no elements) reads as
/// `Undefined`. Comparison uses [`Value::loose_eq`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValueAt {
    position: Position,
    expected: Value,
}

impl ValueAt {
    fn element(&self, value: &Value) -> Result<Value, RuleError> {
        let property = match self.position {
            Position::First => "0",
            Position::Last => "length",
        };
        let element = match (value, self.position) {
            (Value::Undefined | Value::Null, _) => {
                return Err(RuleError::no_property(property, value))
            }
            (Value::String(s), Position::First) => s.chars().next().map(Value::from),
            (Value::String(s), Position::Last) => s.chars().next_back().map(Value::from),
            (Value::Array(items), Position::First) => items.first().cloned(),
            (Value::Array(items), Position::Last) => items.last().cloned(),
            _ => None,
        };
        Ok(element.unwrap_or(Value::Undefined))
    }
}

impl Predicate for ValueAt {
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(self.element(value)?.loose_eq(&self.expected))
    }
}

/// Create a predicate on the first character or element.
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// assert_eq!(first("a").test(&Value::from("abc")), Ok(true));
/// assert_eq!(first(1).test(&Value::from(vec![1, 2])), Ok(true));
/// assert_eq!(last(2).test(&Value::from("12")), Ok(true));
/// ```
pub fn first(expected: impl Into<Value>) -> ValueAt {
    ValueAt {
        position: Position::First,
        expected: expected.into(),
    }
}

/// Create a predicate on the last character or element.
pub fn last(expected: impl Into<Value>) -> ValueAt {
    ValueAt {
        position: Position::Last,
        expected: expected.into(),
    }
}

/// Predicate that checks if a string or array contains a value.
///
/// Strings search for the expected value's display string; arrays look for an
/// element strictly equal to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Includes(pub Value);

impl Predicate for Includes {
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        match value {
            Value::String(s) => Ok(s.contains(&self.0.to_display_string())),
            Value::Array(items) => Ok(items.contains(&self.0)),
            other => Err(RuleError::unsupported("includes", other)),
        }
    }
}

/// Create a predicate that checks for a substring or element.
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// assert_eq!(includes("@").test(&Value::from("a@b")), Ok(true));
/// assert_eq!(includes(2).test(&Value::from(vec![1, 2])), Ok(true));
/// assert_eq!(includes("2").test(&Value::from(vec![1, 2])), Ok(false));
/// assert!(includes(1).test(&Value::from(12)).is_err());
/// ```
pub fn includes(expected: impl Into<Value>) -> Includes {
    Includes(expected.into())
}
