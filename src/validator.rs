//! The fluent chain builder
//!
//! [`Validator`] is what callers hold while composing a chain. Every rule is
//! named through it, either with a typed method generated from the built-in
//! catalog (`.string()`, `.min_length(3)`, ...) or by name with
//! [`Validator::apply`], which is also how custom rules are reached. Each
//! naming binds the rule immediately and hands the builder back.
//!
//! # The `not` modifier
//!
//! [`Validator::not`] arms a pending invert that the next rule naming
//! consumes. It affects exactly that rule. Naming `not` twice in a row leaves
//! it armed; it does not toggle.
//!
//! ```
//! use rulechain::{validator, Value};
//!
//! let v = validator().not().string().unwrap().number().unwrap();
//! assert!(v.test(&Value::from(42)));
//! assert!(!v.test(&Value::from("42")));
//! assert_eq!(v.to_string(), "not.string().number()");
//! ```
//!
//! # Binding errors
//!
//! Rule factories run when the rule is named, so bad arguments surface right
//! there rather than at `test` or `check` time:
//!
//! ```
//! use rulechain::{validator, BindError};
//!
//! let err = validator().string().unwrap().pattern("(").unwrap_err();
//! assert!(matches!(err, BindError::InvalidPattern { .. }));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::chain::{BoundRule, Chain};
use crate::error::{BindError, ValidationFailure};
use crate::registry::{RuleRegistry, RuleSource};
use crate::value::Value;

/// State of the invert modifier on a builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Modifier {
    /// The next rule is bound as-is.
    #[default]
    Idle,
    /// The next rule is bound inverted.
    PendingInvert,
}

/// A chain operation reachable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// [`Validator::test`]
    Test,
    /// [`Validator::check`]
    Check,
}

/// What a name resolves to on a [`Validator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Member {
    /// The `not` modifier.
    Invert,
    /// A bindable rule and where it comes from.
    Rule(RuleSource),
    /// A chain operation.
    Operation(Operation),
}

/// Fluent builder for a rule chain.
///
/// # Example
///
/// ```
/// use rulechain::{validator, Value};
///
/// let v = validator().number().unwrap().positive().unwrap();
/// assert!(v.test(&Value::from(5)));
///
/// let failure = v.check(&Value::from(-3)).unwrap_err();
/// assert_eq!(failure.rule.name, "positive");
/// ```
#[derive(Clone, Debug)]
pub struct Validator {
    chain: Chain,
    modifier: Modifier,
    registry: Arc<RuleRegistry>,
}

/// Start a new, empty chain resolving rules through the global registry.
pub fn validator() -> Validator {
    Validator::new()
}

impl Validator {
    /// Create an empty chain on the global registry.
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::global())
    }

    /// Create an empty chain that resolves rule names through `registry`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rulechain::{RuleRegistry, Validator, Value};
    /// use rulechain::predicate::from_fn;
    ///
    /// let registry = Arc::new(RuleRegistry::new());
    /// registry.register("short", |_: &[Value]| {
    ///     Ok(from_fn(|v: &Value| v.len().is_some_and(|n| n < 3)))
    /// });
    ///
    /// let v = Validator::with_registry(registry).apply("short", [] as [Value; 0]).unwrap();
    /// assert!(v.test(&Value::from("ab")));
    /// ```
    pub fn with_registry(registry: Arc<RuleRegistry>) -> Self {
        Validator {
            chain: Chain::new(),
            modifier: Modifier::Idle,
            registry,
        }
    }

    /// Invert the next rule named on this chain.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.modifier = Modifier::PendingInvert;
        self
    }

    /// Current state of the invert modifier.
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Returns true if the next rule will be bound inverted.
    pub fn is_inverting(&self) -> bool {
        self.modifier == Modifier::PendingInvert
    }

    /// What `name` refers to on this chain, if anything.
    ///
    /// Checked in order: the `not` modifier, rules (custom before built-in),
    /// then the `test` and `check` operations. Unknown names give `None`.
    ///
    /// ```
    /// use rulechain::{validator, Member, Operation, RuleSource};
    ///
    /// let v = validator();
    /// assert_eq!(v.resolve("not"), Some(Member::Invert));
    /// assert_eq!(v.resolve("vowel"), Some(Member::Rule(RuleSource::BuiltIn)));
    /// assert_eq!(v.resolve("check"), Some(Member::Operation(Operation::Check)));
    /// assert_eq!(v.resolve("chain"), None);
    /// ```
    pub fn resolve(&self, name: &str) -> Option<Member> {
        if name == "not" {
            return Some(Member::Invert);
        }
        if let Some(source) = self.registry.source(name) {
            return Some(Member::Rule(source));
        }
        match name {
            "test" => Some(Member::Operation(Operation::Test)),
            "check" => Some(Member::Operation(Operation::Check)),
            _ => None,
        }
    }

    /// Name a rule (or `not`) by name with the given arguments.
    ///
    /// `"not"` arms the invert modifier and ignores `args`. Rule names bind
    /// through the registry. Operation and unknown names are errors. On error
    /// the builder is consumed; use [`try_apply`](Self::try_apply) to keep it.
    ///
    /// ```
    /// use rulechain::{validator, Value};
    ///
    /// let v = validator()
    ///     .apply("not", [] as [Value; 0]).unwrap()
    ///     .apply("between", [1, 5]).unwrap();
    /// assert!(v.test(&Value::from(9)));
    /// ```
    pub fn apply<I>(mut self, name: &str, args: I) -> Result<Self, BindError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.try_apply(name, args)?;
        Ok(self)
    }

    /// Like [`apply`](Self::apply), but borrows the builder so the rules
    /// bound so far survive a failed binding.
    ///
    /// A pending `not` is consumed only once a rule is bound; a failed
    /// binding leaves it armed for the next rule.
    pub fn try_apply<I>(&mut self, name: &str, args: I) -> Result<&mut Self, BindError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        match self.resolve(name) {
            Some(Member::Invert) => {
                self.modifier = Modifier::PendingInvert;
                Ok(self)
            }
            Some(Member::Rule(_)) => {
                let args = args.into_iter().map(Into::into).collect();
                let bound = self.registry.bind(name, args, self.is_inverting())?;
                self.modifier = Modifier::Idle;
                self.chain.push(bound);
                Ok(self)
            }
            Some(Member::Operation(_)) => Err(BindError::NotARule(name.to_string())),
            None => Err(BindError::UnknownRule(name.to_string())),
        }
    }

    /// Returns true if every rule holds for `value`. See [`Chain::test`].
    pub fn test(&self, value: &Value) -> bool {
        self.chain.test(value)
    }

    /// Report the first rule that does not hold for `value`. See [`Chain::check`].
    pub fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        self.chain.check(value)
    }

    /// Report every rule that does not hold for `value`. See [`Chain::check_all`].
    pub fn check_all(&self, value: &Value) -> Vec<ValidationFailure> {
        self.chain.check_all(value)
    }

    /// The rules bound so far, in evaluation order.
    pub fn rules(&self) -> &[BoundRule] {
        self.chain.rules()
    }

    /// Number of rules bound so far.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns true if no rule has been bound.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The accumulated chain.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Finish building and keep only the chain.
    pub fn into_chain(self) -> Chain {
        self.chain
    }

    /// The registry this builder resolves names through.
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chain)
    }
}

macro_rules! rule_methods {
    ($(
        $(#[$meta:meta])*
        $method:ident => $rule:literal ($($arg:ident: $ty:ty),*);
    )*) => {
        impl Validator {
            $(
                $(#[$meta])*
                pub fn $method(self, $($arg: $ty),*) -> Result<Self, BindError> {
                    self.apply($rule, Vec::<Value>::from([$(Into::<Value>::into($arg)),*]))
                }
            )*
        }
    };
}

rule_methods! {
    /// Value's display string matches the regex `pattern`.
    pattern => "pattern"(pattern: &str);

    /// Value is a string.
    string => "string"();
    /// Value is a number.
    number => "number"();
    /// Value is a boolean.
    boolean => "boolean"();
    /// Value is `Undefined`.
    undefined => "undefined"();
    /// Value is `Null`.
    null => "null"();
    /// Value is an array.
    array => "array"();

    /// Lowercase words separated by whitespace.
    lowercase => "lowercase"();
    /// Uppercase words separated by whitespace.
    uppercase => "uppercase"();
    /// Only vowels, any case.
    vowel => "vowel"();
    /// Letters only, starting with a consonant.
    consonant => "consonant"();

    /// First character or element loosely equals `expected`.
    first => "first"(expected: impl Into<Value>);
    /// Last character or element loosely equals `expected`.
    last => "last"(expected: impl Into<Value>);

    /// Empty string or array.
    empty => "empty"();
    /// Length between `min` and `max`, inclusive.
    length => "length"(min: usize, max: usize);
    /// Length of at least `min`.
    min_length => "minLength"(min: usize);
    /// Length of at most `max`.
    max_length => "maxLength"(max: usize);

    /// Number of -1 or less.
    negative => "negative"();
    /// Number of zero or more.
    positive => "positive"();
    /// Number between `min` and `max`, inclusive. A zero or missing bound is
    /// open.
    between => "between"(min: impl Into<Value>, max: impl Into<Value>);

    /// Even number.
    even => "even"();
    /// Anything that is not an even number.
    odd => "odd"();

    /// String containing `expected`, or array with an element equal to it.
    includes => "includes"(expected: impl Into<Value>);
}
