//! Pattern predicates
//!
//! Patterns are matched against the value's display string, so numbers and
//! booleans are matched by how they print.

use std::sync::LazyLock;

use regex::Regex;

use super::trait_def::Predicate;
use crate::error::RuleError;
use crate::value::Value;

static LOWERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+\s*)+$").expect("lowercase pattern compiles"));
static UPPERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+\s*)+$").expect("uppercase pattern compiles"));
static VOWEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[aeiou]+$").expect("vowel pattern compiles"));
// First letter must not be a vowel; the rest may be any letter.
static CONSONANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[b-df-hj-np-tv-z][a-z]*$").expect("consonant pattern compiles")
});

/// Predicate that checks a value against a regular expression.
#[derive(Clone, Debug)]
pub struct Pattern(pub Regex);

impl Predicate for Pattern {
    #[inline]
    fn test(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(match value {
            Value::String(s) => self.0.is_match(s),
            other => self.0.is_match(&other.to_display_string()),
        })
    }
}

/// Create a predicate that matches a compiled regex.
///
/// # Example
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
/// use regex::Regex;
///
/// let p = pattern(Regex::new(r"^\d+$").unwrap());
/// assert_eq!(p.test(&Value::from("123")), Ok(true));
/// assert_eq!(p.test(&Value::from(123)), Ok(true));
/// assert_eq!(p.test(&Value::from("12a")), Ok(false));
/// ```
pub fn pattern(regex: Regex) -> Pattern {
    Pattern(regex)
}

/// Create a predicate for lowercase words separated by whitespace.
///
/// ```rust
/// use rulechain::predicate::*;
/// use rulechain::Value;
///
/// assert_eq!(lowercase().test(&Value::from("hello world")), Ok(true));
/// assert_eq!(lowercase().test(&Value::from("Hello")), Ok(false));
/// ```
pub fn lowercase() -> Pattern {
    Pattern(LOWERCASE.clone())
}

/// Create a predicate for uppercase words separated by whitespace.
pub fn uppercase() -> Pattern {
    Pattern(UPPERCASE.clone())
}

/// Create a predicate for strings made only of vowels, in any case.
pub fn vowel() -> Pattern {
    Pattern(VOWEL.clone())
}

/// Create a predicate for letter strings that start with a consonant.
pub fn consonant() -> Pattern {
    Pattern(CONSONANT.clone())
}
