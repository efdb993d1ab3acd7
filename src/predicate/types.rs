//! Type predicates

use std::fmt;

use super::trait_def::Predicate;
use crate::error::RuleError;
use crate::value::Value;

/// The value types a type rule can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `Value::String`
    String,
    /// `Value::Number`
    Number,
    /// `Value::Bool`
    Boolean,
    /// `Value::Undefined`
    Undefined,
    /// `Value::Null`
    Null,
    /// `Value::Array`
    Array,
}

impl ValueType {
    /// Name of the type, matching [`Value::type_name`].
    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Undefined => "undefined",
            ValueType::Null => "null",
            ValueType::Array => "array",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predicate that checks the type of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsType(pub ValueType);

impl Predicate for IsType {
    #[inline]
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(value.type_name() == self.0.name())
    }
}

/// Create a predicate that checks a value's type.
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// assert_eq!(is_type(ValueType::Array).test(&Value::from(vec![1])), Ok(true));
/// assert_eq!(is_type(ValueType::Null).test(&Value::Undefined), Ok(false));
/// ```
pub fn is_type(kind: ValueType) -> IsType {
    IsType(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_type_matches_only_itself() {
        let samples = [
            (ValueType::String, Value::from("s")),
            (ValueType::Number, Value::from(1)),
            (ValueType::Boolean, Value::from(false)),
            (ValueType::Undefined, Value::Undefined),
            (ValueType::Null, Value::Null),
            (ValueType::Array, Value::from(Vec::<i32>::new())),
        ];

        for (kind, _) in &samples {
            for (other, value) in &samples {
                assert_eq!(is_type(*kind).test(value), Ok(kind == other), "{kind} vs {value}");
            }
        }
    }

    #[test]
    fn test_array_is_not_a_string() {
        assert_eq!(is_type(ValueType::String).test(&Value::from(vec!["a"])), Ok(false));
    }
}
