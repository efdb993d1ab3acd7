//! Dynamically-typed values checked by rule chains
//!
//! Rules in a chain do not know the type of what they are handed: the same
//! chain may be tested against a string, a number, or nothing at all. [`Value`]
//! is the small dynamic value model every predicate receives and every rule
//! argument is expressed in.
//!
//! # Examples
//!
//! ```
//! use rulechain::Value;
//!
//! assert_eq!(Value::from("abc").type_name(), "string");
//! assert_eq!(Value::from(3).type_name(), "number");
//! assert_eq!(Value::from(None::<i32>), Value::Undefined);
//! assert_eq!(Value::from(vec![1, 2]).len(), Some(2));
//! ```

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(feature = "serde")]
pub use serde_impl::ObjectValueError;

use std::fmt;

/// A dynamically-typed value.
///
/// `Undefined` stands for "no value supplied" and is distinct from `Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value at all.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Integers are stored as `f64`.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Array(Vec<Value>),
}

impl Value {
    /// Name of this value's type, as used in error messages and type rules.
    ///
    /// ```
    /// use rulechain::Value;
    ///
    /// assert_eq!(Value::Undefined.type_name(), "undefined");
    /// assert_eq!(Value::Array(vec![]).type_name(), "array");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Returns true if this is `Undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns true if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for `Undefined` and `Null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// The string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Length of a string (in characters) or an array (in elements).
    ///
    /// Other values have no length.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Returns true if this is an empty string or an empty array.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Numeric interpretation of the value.
    ///
    /// `Undefined` and unparsable strings give `NaN`, `Null` and blank strings
    /// give `0`, booleans give `0` or `1`. An array converts through its
    /// display string.
    ///
    /// ```
    /// use rulechain::Value;
    ///
    /// assert_eq!(Value::from(" 42 ").to_number(), 42.0);
    /// assert_eq!(Value::Null.to_number(), 0.0);
    /// assert!(Value::Undefined.to_number().is_nan());
    /// assert!(Value::from("abc").to_number().is_nan());
    /// ```
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => parse_number(s),
            Value::Array(_) => parse_number(&self.to_display_string()),
        }
    }

    /// String interpretation of the value.
    ///
    /// Integral numbers print without a fractional part and array elements
    /// are joined by commas, with `Undefined` and `Null` elements left empty.
    ///
    /// ```
    /// use rulechain::Value;
    ///
    /// assert_eq!(Value::from(3.0).to_display_string(), "3");
    /// assert_eq!(Value::from(1.5).to_display_string(), "1.5");
    /// assert_eq!(
    ///     Value::Array(vec![Value::from(1), Value::Null, Value::from("a")]).to_display_string(),
    ///     "1,,a"
    /// );
    /// ```
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Null => String::new(),
                    other => other.to_display_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Loose equality across types.
    ///
    /// `Undefined` and `Null` equal each other and nothing else. Mixed
    /// numbers, strings and booleans compare numerically. Arrays compare
    /// structurally with arrays and through their display string with
    /// primitives.
    ///
    /// ```
    /// use rulechain::Value;
    ///
    /// assert!(Value::from("1").loose_eq(&Value::from(1)));
    /// assert!(Value::Null.loose_eq(&Value::Undefined));
    /// assert!(!Value::Null.loose_eq(&Value::from(0)));
    /// assert!(Value::from(true).loose_eq(&Value::from(1)));
    /// ```
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Array(_), Value::String(s)) | (Value::String(s), Value::Array(_)) => {
                let array = if self.as_array().is_some() { self } else { other };
                array.to_display_string() == *s
            }
            (a, b) => a.to_number() == b.to_number(),
        }
    }
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust accepts "inf" and "nan" spellings that are not numbers here.
    if trimmed
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_alphabetic())
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        // Also turns -0 into "0".
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            other => f.write_str(&other.to_display_string()),
        }
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Undefined, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(true).type_name(), "boolean");
        assert_eq!(Value::from(1.5).type_name(), "number");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::from(vec!["x"]).type_name(), "array");
    }

    #[test]
    fn test_len_counts_chars() {
        assert_eq!(Value::from("héllo").len(), Some(5));
        assert_eq!(Value::from(vec![1, 2, 3]).len(), Some(3));
        assert_eq!(Value::from(12).len(), None);
        assert_eq!(Value::Undefined.len(), None);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("-2.5").to_number(), -2.5);
        assert_eq!(Value::from("Infinity").to_number(), f64::INFINITY);
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from("nan").to_number().is_nan());
        assert_eq!(Value::from(vec![7]).to_number(), 7.0);
        assert!(Value::from(vec![1, 2]).to_number().is_nan());
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::from(-0.0).to_display_string(), "0");
        assert_eq!(Value::from(f64::NAN).to_display_string(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_display_string(), "-Infinity");
        assert_eq!(Value::from(false).to_display_string(), "false");
        assert_eq!(Value::Undefined.to_display_string(), "undefined");
    }

    #[test]
    fn test_loose_eq() {
        assert!(Value::from("a").loose_eq(&Value::from('a')));
        assert!(!Value::from("a").loose_eq(&Value::from("b")));
        assert!(Value::from(2).loose_eq(&Value::from("2")));
        assert!(!Value::from(f64::NAN).loose_eq(&Value::from(f64::NAN)));
        assert!(!Value::Undefined.loose_eq(&Value::from("")));
        assert!(Value::from(vec![1, 2]).loose_eq(&Value::from("1,2")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_from_option_and_iter() {
        assert_eq!(Value::from(Some("a")), Value::from("a"));
        assert_eq!(Value::from(None::<&str>), Value::Undefined);
        let collected: Value = (1..=3).collect();
        assert_eq!(collected, Value::from(vec![1, 2, 3]));
    }
}
