//! Errors raised while building and checking rule chains
//!
//! Three things can go wrong, at two different times:
//!
//! - **Binding time**: a rule factory rejects its arguments, or the rule name
//!   does not resolve. This is a [`BindError`], returned straight from the
//!   builder method that named the rule.
//! - **Evaluation time**: a predicate cannot make sense of the value it was
//!   handed (reading the length of `undefined`, say). This is a [`RuleError`].
//!   [`test`](crate::Chain::test) folds it into a pass/fail answer,
//!   [`check`](crate::Chain::check) reports it.
//! - **Evaluation time**: a rule simply is not satisfied. `check` reports a
//!   [`ValidationFailure`] carrying the rule, the value and the [`FailureCause`].
//!
//! # Examples
//!
//! ```
//! use rulechain::{validator, FailureCause, Value};
//!
//! let v = validator().string().unwrap().min_length(3).unwrap();
//!
//! let failure = v.check(&Value::Undefined).unwrap_err();
//! assert_eq!(failure.rule.name, "string");
//! assert_eq!(failure.cause, FailureCause::RuleFailed);
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::chain::BoundRule;
use crate::value::Value;

/// Error raised while binding a rule onto a chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// No custom or built-in rule has this name.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// The name refers to a chain operation, not a rule.
    #[error("`{0}` is a chain operation, not a rule")]
    NotARule(String),

    /// A `pattern` argument did not compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// Why the regex engine rejected it.
        reason: String,
    },

    /// An argument had the wrong type.
    #[error("rule `{rule}` expects argument {index} to be {expected}, got {found}")]
    InvalidArgument {
        /// Rule being bound.
        rule: String,
        /// Zero-based argument position.
        index: usize,
        /// Expected argument type.
        expected: &'static str,
        /// Type actually supplied.
        found: &'static str,
    },

    /// A required argument was not supplied.
    #[error("rule `{rule}` requires argument {index} ({name})")]
    MissingArgument {
        /// Rule being bound.
        rule: String,
        /// Zero-based argument position.
        index: usize,
        /// Argument name.
        name: &'static str,
    },

    /// Raised by a custom rule factory.
    #[error("{0}")]
    Custom(String),
}

impl BindError {
    /// Create a custom binding error, for use in custom rule factories.
    pub fn custom(msg: impl Into<String>) -> Self {
        BindError::Custom(msg.into())
    }
}

/// Error raised by a predicate that cannot evaluate the value it received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The value has no such property (`length` of `undefined`, for instance).
    #[error("cannot read `{property}` of {found}")]
    NoProperty {
        /// Property the predicate tried to read.
        property: &'static str,
        /// Type of the value.
        found: &'static str,
    },

    /// The value does not support the operation.
    #[error("{found} does not support `{operation}`")]
    Unsupported {
        /// Operation the predicate tried to perform.
        operation: &'static str,
        /// Type of the value.
        found: &'static str,
    },

    /// Raised by a custom predicate.
    #[error("{0}")]
    Custom(String),
}

impl RuleError {
    /// Create a custom predicate error, for use in custom rules.
    pub fn custom(msg: impl Into<String>) -> Self {
        RuleError::Custom(msg.into())
    }

    pub(crate) fn no_property(property: &'static str, value: &Value) -> Self {
        RuleError::NoProperty {
            property,
            found: value.type_name(),
        }
    }

    pub(crate) fn unsupported(operation: &'static str, value: &Value) -> Self {
        RuleError::Unsupported {
            operation,
            found: value.type_name(),
        }
    }
}

/// Why a rule failed under [`check`](crate::Chain::check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The predicate ran and returned the unsatisfying result.
    RuleFailed,
    /// The predicate itself raised an error.
    Errored(RuleError),
}

impl FailureCause {
    /// Returns true if the predicate raised an error.
    pub fn is_errored(&self) -> bool {
        matches!(self, FailureCause::Errored(_))
    }

    /// The predicate's error, if it raised one.
    pub fn rule_error(&self) -> Option<&RuleError> {
        match self {
            FailureCause::Errored(err) => Some(err),
            FailureCause::RuleFailed => None,
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::RuleFailed => f.write_str("rule has failed"),
            FailureCause::Errored(err) => write!(f, "{}", err),
        }
    }
}

/// Report of the first violated rule in a chain.
///
/// # Examples
///
/// ```
/// use rulechain::{validator, Value};
///
/// let v = validator().number().unwrap().positive().unwrap();
/// let failure = v.check(&Value::from(-3)).unwrap_err();
///
/// assert_eq!(failure.rule.name, "positive");
/// assert_eq!(failure.value, Value::from(-3));
/// assert_eq!(failure.to_string(), "rule positive() failed for -3: rule has failed");
/// ```
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    /// The rule that was violated.
    pub rule: BoundRule,
    /// The value under test.
    pub value: Value,
    /// Why the rule was violated.
    pub cause: FailureCause,
}

impl ValidationFailure {
    /// Create a new failure report.
    pub fn new(rule: BoundRule, value: Value, cause: FailureCause) -> Self {
        ValidationFailure { rule, value, cause }
    }

    /// Name of the violated rule.
    pub fn rule_name(&self) -> &str {
        &self.rule.name
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule {} failed for {}: {}",
            self.rule, self.value, self.cause
        )
    }
}

impl StdError for ValidationFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            FailureCause::Errored(err) => Some(err),
            FailureCause::RuleFailed => None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut report = serializer.serialize_struct("ValidationFailure", 5)?;
        report.serialize_field("rule", &self.rule.name)?;
        report.serialize_field("args", &self.rule.args)?;
        report.serialize_field("invert", &self.rule.invert)?;
        report.serialize_field("value", &self.value)?;
        report.serialize_field("cause", &self.cause.to_string())?;
        report.end()
    }
}
