//! Core predicate trait

use std::fmt;
use std::sync::Arc;

use crate::error::RuleError;
use crate::value::Value;

/// A test applied to a single [`Value`].
///
/// Returning `Err` means the predicate could not evaluate the value at all,
/// which is different from the value failing the test.
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// let p = is_type(ValueType::String);
/// assert_eq!(p.test(&Value::from("x")), Ok(true));
/// assert_eq!(p.test(&Value::from(1)), Ok(false));
/// ```
pub trait Predicate: Send + Sync {
    /// Test the value.
    fn test(&self, value: &Value) -> Result<bool, RuleError>;
}

// Blanket impl for closures
impl<F> Predicate for F
where
    F: Fn(&Value) -> Result<bool, RuleError> + Send + Sync,
{
    #[inline]
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        self(value)
    }
}

/// Shared, type-erased predicate as stored in a bound rule.
pub type BoxedPredicate = Arc<dyn Predicate>;

/// Predicate built from an infallible closure. Created by [`from_fn`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(pub F);

impl<F> Predicate for FromFn<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    #[inline]
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        Ok((self.0)(value))
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn(..)")
    }
}

/// Create a predicate from a closure that never fails.
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// let short = from_fn(|v: &Value| v.len().is_some_and(|n| n < 4));
/// assert_eq!(short.test(&Value::from("abc")), Ok(true));
/// assert_eq!(short.test(&Value::from(1)), Ok(false));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    FromFn(f)
}
