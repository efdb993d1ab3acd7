//! Predicates: the tests a rule applies to a value
//!
//! A rule factory turns its arguments into a [`Predicate`]; the chain later
//! hands every value to that predicate. A predicate answers `Ok(true)` or
//! `Ok(false)`, or raises a [`RuleError`] when the value makes no sense for it
//! (reading the length of `undefined`, for instance).
//!
//! This module also carries the predicates behind the built-in rule catalog.
//! They are plain structs with small constructor functions, usable on their own:
//!
//! ```rust
//! use rulechain::predicate::*;
//! use rulechain::Value;
//!
//! assert_eq!(min_length(3).test(&Value::from("abcd")), Ok(true));
//! assert_eq!(between(1.0, 10.0).test(&Value::from(11)), Ok(false));
//! assert!(min_length(3).test(&Value::Undefined).is_err());
//! ```
//!
//! # Custom predicates
//!
//! Any `Fn(&Value) -> Result<bool, RuleError>` closure is a predicate. Closures
//! that cannot fail can be adapted with [`from_fn`]:
//!
//! ```rust
//! use rulechain::predicate::{from_fn, Predicate};
//! use rulechain::{RuleError, Value};
//!
//! let fallible = |v: &Value| -> Result<bool, RuleError> {
//!     v.as_f64().map(|n| n > 10.0).ok_or_else(|| RuleError::custom("not a number"))
//! };
//! assert_eq!(fallible.test(&Value::from(11)), Ok(true));
//! assert!(fallible.test(&Value::from("x")).is_err());
//!
//! let infallible = from_fn(|v: &Value| v.is_null());
//! assert_eq!(infallible.test(&Value::Null), Ok(true));
//! ```

mod collection;
mod number;
mod string;
mod trait_def;
mod types;

pub use trait_def::{from_fn, BoxedPredicate, FromFn, Predicate};

pub use types::{is_type, IsType, ValueType};

pub use string::{consonant, lowercase, pattern, uppercase, vowel, Pattern};

pub use number::{between, even, negative, odd, positive, Parity, Range};

pub use collection::{
    empty, first, includes, last, length, max_length, min_length, Includes, Length, Position,
    ValueAt,
};
