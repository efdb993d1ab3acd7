//! Testing utilities for code that builds rule chains
//!
//! Assertion macros that print the failing rule instead of a bare `false`,
//! and, behind the `proptest` feature, an `Arbitrary` implementation for
//! [`Value`](crate::Value).
//!
//! # Examples
//!
//! ```rust
//! use rulechain::{validator, assert_passes, assert_fails, assert_fails_on};
//!
//! let v = validator().number().unwrap().positive().unwrap();
//!
//! assert_passes!(v, 5);
//! assert_fails!(v, "5");
//! assert_fails_on!(v, -3, "positive");
//! ```

/// Assert that a value passes a chain's `test`.
///
/// On failure the panic message lists every rule the value violates.
///
/// # Example
///
/// ```rust
/// use rulechain::{validator, assert_passes};
///
/// let v = validator().string().unwrap();
/// assert_passes!(v, "hello");
/// ```
#[macro_export]
macro_rules! assert_passes {
    ($validator:expr, $value:expr) => {{
        let value = $crate::Value::from($value);
        if !$validator.test(&value) {
            let failures: Vec<String> = $validator
                .check_all(&value)
                .iter()
                .map(|f| f.to_string())
                .collect();
            panic!("Expected {} to pass, got failures: {:?}", value, failures);
        }
    }};
}

/// Assert that a value fails a chain's `test`.
///
/// # Example
///
/// ```rust
/// use rulechain::{validator, assert_fails};
///
/// let v = validator().string().unwrap();
/// assert_fails!(v, 12);
/// ```
#[macro_export]
macro_rules! assert_fails {
    ($validator:expr, $value:expr) => {{
        let value = $crate::Value::from($value);
        if $validator.test(&value) {
            panic!("Expected {} to fail, but it passed {}", value, $validator);
        }
    }};
}

/// Assert that `check` reports a failure on the named rule, optionally
/// matching the cause against a pattern.
///
/// # Example
///
/// ```rust
/// use rulechain::{validator, assert_fails_on, FailureCause, Value};
///
/// let v = validator().min_length(3).unwrap();
/// assert_fails_on!(v, "ab", "minLength", FailureCause::RuleFailed);
/// assert_fails_on!(v, Value::Undefined, "minLength", FailureCause::Errored(_));
/// ```
#[macro_export]
macro_rules! assert_fails_on {
    ($validator:expr, $value:expr, $rule:expr) => {
        $crate::assert_fails_on!($validator, $value, $rule, _)
    };
    ($validator:expr, $value:expr, $rule:expr, $cause:pat) => {{
        let value = $crate::Value::from($value);
        match $validator.check(&value) {
            Err(failure) => {
                assert_eq!(
                    failure.rule.name, $rule,
                    "Expected failure on rule {:?}, got {}",
                    $rule, failure
                );
                assert!(
                    matches!(failure.cause, $cause),
                    "Unexpected cause for {}: {:?}",
                    failure.rule,
                    failure.cause
                );
            }
            Ok(()) => panic!("Expected {} to fail on {:?}, but it passed", value, $rule),
        }
    }};
}

#[cfg(feature = "proptest")]
use crate::Value;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        let leaf = prop_oneof![
            Just(Value::Undefined),
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-1000i32..1000).prop_map(Value::from),
            any::<f64>().prop_map(Value::Number),
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(2, 16, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(Value::Array)
        })
        .boxed()
    }
}
