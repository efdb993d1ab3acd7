//! The built-in rule catalog
//!
//! Each entry turns the arguments a rule was named with into a predicate from
//! [`crate::predicate`]. Argument checking happens here, at binding time.

use std::sync::Arc;

use regex::Regex;

use crate::error::BindError;
use crate::predicate::{self, BoxedPredicate, ValueType};
use crate::value::Value;

type BuiltinFactory = fn(&Args<'_>) -> Result<BoxedPredicate, BindError>;

macro_rules! catalog {
    ($($name:literal => |$args:pat_param| $body:expr),* $(,)?) => {
        pub(crate) static BUILTINS: &[(&str, BuiltinFactory)] = &[
            $((
                $name,
                {
                    fn factory($args: &Args<'_>) -> Result<BoxedPredicate, BindError> {
                        $body
                    }
                    factory as BuiltinFactory
                },
            )),*
        ];
    };
}

catalog! {
    "pattern" => |args| {
        let source = args.string(0, "pattern")?;
        let regex = Regex::new(source).map_err(|err| BindError::InvalidPattern {
            pattern: source.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Arc::new(predicate::pattern(regex)))
    },

    "string" => |_| Ok(Arc::new(predicate::is_type(ValueType::String))),
    "number" => |_| Ok(Arc::new(predicate::is_type(ValueType::Number))),
    "boolean" => |_| Ok(Arc::new(predicate::is_type(ValueType::Boolean))),
    "undefined" => |_| Ok(Arc::new(predicate::is_type(ValueType::Undefined))),
    "null" => |_| Ok(Arc::new(predicate::is_type(ValueType::Null))),
    "array" => |_| Ok(Arc::new(predicate::is_type(ValueType::Array))),

    "lowercase" => |_| Ok(Arc::new(predicate::lowercase())),
    "uppercase" => |_| Ok(Arc::new(predicate::uppercase())),
    "vowel" => |_| Ok(Arc::new(predicate::vowel())),
    "consonant" => |_| Ok(Arc::new(predicate::consonant())),

    "first" => |args| Ok(Arc::new(predicate::first(args.value(0)))),
    "last" => |args| Ok(Arc::new(predicate::last(args.value(0)))),

    "empty" => |_| Ok(Arc::new(predicate::empty())),
    "length" => |args| {
        let min = args.optional_count(0)?.unwrap_or(0);
        let max = args.optional_count(1)?.unwrap_or(min);
        Ok(Arc::new(predicate::length(min, max)))
    },
    "minLength" => |args| {
        let min = args.optional_count(0)?.unwrap_or(0);
        Ok(Arc::new(predicate::min_length(min)))
    },
    "maxLength" => |args| {
        let max = args.optional_count(0)?.unwrap_or(0);
        Ok(Arc::new(predicate::max_length(max)))
    },

    "negative" => |_| Ok(Arc::new(predicate::negative())),
    "positive" => |_| Ok(Arc::new(predicate::positive())),
    "between" => |args| {
        use std::ops::Bound;

        // A zero bound leaves that side open, like a missing one.
        let bound = |n: Option<f64>| match n {
            Some(n) if n != 0.0 => Bound::Included(n),
            _ => Bound::Unbounded,
        };
        let min = args.optional_number(0)?;
        let max = args.optional_number(1)?;
        Ok(Arc::new(predicate::Range::new(bound(min), bound(max))))
    },

    "even" => |_| Ok(Arc::new(predicate::even())),
    "odd" => |_| Ok(Arc::new(predicate::odd())),

    "includes" => |args| Ok(Arc::new(predicate::includes(args.value(0)))),
}

/// Look up a built-in factory by name.
pub(crate) fn find(name: &str) -> Option<BuiltinFactory> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, factory)| *factory)
}

/// Rule arguments with typed accessors that produce binding errors.
pub(crate) struct Args<'a> {
    rule: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub(crate) fn new(rule: &'a str, values: &'a [Value]) -> Self {
        Args { rule, values }
    }

    /// Argument at `index`, `Undefined` if not supplied.
    fn value(&self, index: usize) -> Value {
        self.values.get(index).cloned().unwrap_or_default()
    }

    fn present(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index).filter(|v| !v.is_nullish())
    }

    fn invalid(&self, index: usize, expected: &'static str, found: &Value) -> BindError {
        BindError::InvalidArgument {
            rule: self.rule.to_string(),
            index,
            expected,
            found: found.type_name(),
        }
    }

    fn string(&self, index: usize, name: &'static str) -> Result<&'a str, BindError> {
        match self.present(index) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(self.invalid(index, "string", other)),
            None => Err(BindError::MissingArgument {
                rule: self.rule.to_string(),
                index,
                name,
            }),
        }
    }

    fn optional_number(&self, index: usize) -> Result<Option<f64>, BindError> {
        match self.present(index) {
            Some(Value::Number(n)) if !n.is_nan() => Ok(Some(*n)),
            Some(other) => Err(self.invalid(index, "number", other)),
            None => Ok(None),
        }
    }

    fn optional_count(&self, index: usize) -> Result<Option<usize>, BindError> {
        match self.present(index) {
            Some(Value::Number(n)) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                Ok(Some(*n as usize))
            }
            Some(other) => Err(self.invalid(index, "non-negative integer", other)),
            None => Ok(None),
        }
    }
}
