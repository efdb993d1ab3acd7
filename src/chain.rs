//! Bound rules, chains, and their evaluation
//!
//! A [`Chain`] is the ordered list of [`BoundRule`]s a
//! [`Validator`](crate::Validator) has accumulated. Evaluating it comes in
//! two flavours that treat predicate errors differently:
//!
//! - [`Chain::test`] is a probe. It answers with a `bool`, and a predicate
//!   that errors counts as a violation (or as satisfied, under `not`).
//! - [`Chain::check`] is a diagnostic. It stops at the first rule that does
//!   not hold and reports it; a predicate that errors is always reported, with
//!   its error as the cause.
//!
//! # Examples
//!
//! ```
//! use rulechain::{validator, FailureCause, Value};
//!
//! let chain = validator().string().unwrap().min_length(3).unwrap().into_chain();
//!
//! // `test` reinterprets the length error on `undefined` as a plain failure...
//! assert!(!chain.test(&Value::Undefined));
//!
//! // ...while `check` reports the first failing rule, which here is `string`.
//! let failure = chain.check(&Value::Undefined).unwrap_err();
//! assert_eq!(failure.rule.name, "string");
//! assert_eq!(failure.cause, FailureCause::RuleFailed);
//! ```

use std::fmt;

use crate::error::{FailureCause, RuleError, ValidationFailure};
use crate::predicate::BoxedPredicate;
use crate::value::Value;

/// A rule as it was named on a chain: its predicate, the arguments it was
/// bound with, and whether it was inverted.
///
/// Bound rules are immutable once appended to a chain.
#[derive(Clone)]
pub struct BoundRule {
    /// Rule name as registered.
    pub name: String,
    /// Predicate produced by the rule factory at binding time.
    pub predicate: BoxedPredicate,
    /// Arguments the rule was named with, kept for reporting.
    pub args: Vec<Value>,
    /// Whether the rule was preceded by `not`.
    pub invert: bool,
}

/// Result of evaluating one bound rule against one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The satisfaction condition holds.
    Satisfied,
    /// The predicate returned the unsatisfying result.
    Violated,
    /// The predicate raised an error.
    Errored(RuleError),
}

impl BoundRule {
    /// Create a bound rule.
    pub fn new(
        name: impl Into<String>,
        predicate: BoxedPredicate,
        args: Vec<Value>,
        invert: bool,
    ) -> Self {
        BoundRule {
            name: name.into(),
            predicate,
            args,
            invert,
        }
    }

    /// Evaluate the rule, applying its invert flag.
    ///
    /// A predicate error is reported as [`RuleOutcome::Errored`] whatever
    /// the invert flag says.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rulechain::{BoundRule, RuleOutcome, Value};
    /// use rulechain::predicate::min_length;
    ///
    /// let rule = BoundRule::new("minLength", Arc::new(min_length(2)), vec![Value::from(2)], true);
    /// assert_eq!(rule.evaluate(&Value::from("a")), RuleOutcome::Satisfied);
    /// assert_eq!(rule.evaluate(&Value::from("ab")), RuleOutcome::Violated);
    /// assert!(matches!(rule.evaluate(&Value::Null), RuleOutcome::Errored(_)));
    /// ```
    pub fn evaluate(&self, value: &Value) -> RuleOutcome {
        let outcome = match self.predicate.test(value) {
            Ok(result) if result != self.invert => RuleOutcome::Satisfied,
            Ok(_) => RuleOutcome::Violated,
            Err(err) => RuleOutcome::Errored(err),
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(rule = %self, value = %value, outcome = ?outcome, "evaluated rule");
        outcome
    }

    /// Whether the rule holds under `test` semantics.
    ///
    /// An erroring predicate holds only when the rule is inverted.
    pub fn is_satisfied_by(&self, value: &Value) -> bool {
        match self.evaluate(value) {
            RuleOutcome::Satisfied => true,
            RuleOutcome::Violated => false,
            RuleOutcome::Errored(_) => self.invert,
        }
    }

    /// Run the rule under `check` semantics.
    pub fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        let cause = match self.evaluate(value) {
            RuleOutcome::Satisfied => return Ok(()),
            RuleOutcome::Violated => FailureCause::RuleFailed,
            RuleOutcome::Errored(err) => FailureCause::Errored(err),
        };
        Err(ValidationFailure::new(self.clone(), value.clone(), cause))
    }
}

impl fmt::Debug for BoundRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundRule")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("invert", &self.invert)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for BoundRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            f.write_str("not.")?;
        }
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}

/// An ordered sequence of bound rules. Insertion order is evaluation order.
#[derive(Clone, Debug, Default)]
pub struct Chain {
    rules: Vec<BoundRule>,
}

impl Chain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Chain { rules: Vec::new() }
    }

    /// Append a bound rule.
    pub fn push(&mut self, rule: BoundRule) {
        self.rules.push(rule);
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[BoundRule] {
        &self.rules
    }

    /// Iterate over the rules in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, BoundRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the chain has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if every rule is satisfied by the value.
    ///
    /// Stops at the first unsatisfied rule. Predicate errors never escape: an
    /// erroring rule is satisfied only if it was inverted. An empty chain is
    /// satisfied by everything.
    ///
    /// ```
    /// use rulechain::{validator, Value};
    ///
    /// let chain = validator().number().unwrap().positive().unwrap().into_chain();
    /// assert!(chain.test(&Value::from(5)));
    /// assert!(!chain.test(&Value::from(-3)));
    /// ```
    pub fn test(&self, value: &Value) -> bool {
        self.rules.iter().all(|rule| rule.is_satisfied_by(value))
    }

    /// Check the value against every rule in order, reporting the first one
    /// that does not hold.
    ///
    /// Unlike [`test`](Self::test), a predicate error is always reported, with
    /// the error as the failure's cause, even for inverted rules.
    ///
    /// ```
    /// use rulechain::{validator, FailureCause, RuleError, Value};
    ///
    /// let chain = validator().not().min_length(3).unwrap().into_chain();
    ///
    /// // Inverted erroring rule: `test` passes, `check` still reports it.
    /// assert!(chain.test(&Value::Undefined));
    /// let failure = chain.check(&Value::Undefined).unwrap_err();
    /// assert!(matches!(failure.cause, FailureCause::Errored(RuleError::NoProperty { .. })));
    /// ```
    pub fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        for rule in &self.rules {
            if let Err(failure) = rule.check(value) {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    rule = %failure.rule,
                    value = %failure.value,
                    cause = %failure.cause,
                    "validation failed"
                );
                return Err(failure);
            }
        }
        Ok(())
    }

    /// Check the value against every rule, collecting all failures in chain
    /// order. Each rule is judged as in [`check`](Self::check).
    ///
    /// ```
    /// use rulechain::{validator, Value};
    ///
    /// let chain = validator()
    ///     .string().unwrap()
    ///     .min_length(5).unwrap()
    ///     .includes("@").unwrap()
    ///     .into_chain();
    ///
    /// let names: Vec<_> = chain
    ///     .check_all(&Value::from("a@"))
    ///     .into_iter()
    ///     .map(|f| f.rule.name)
    ///     .collect();
    /// assert_eq!(names, ["minLength"]);
    /// ```
    pub fn check_all(&self, value: &Value) -> Vec<ValidationFailure> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(value).err())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a BoundRule;
    type IntoIter = std::slice::Iter<'a, BoundRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::predicate::{from_fn, min_length, positive};

    fn rule(name: &str, predicate: BoxedPredicate, invert: bool) -> BoundRule {
        BoundRule::new(name, predicate, Vec::new(), invert)
    }

    fn erroring() -> BoxedPredicate {
        Arc::new(|_: &Value| -> Result<bool, RuleError> { Err(RuleError::custom("boom")) })
    }

    #[test]
    fn test_empty_chain_accepts_everything() {
        let chain = Chain::new();
        for value in [Value::Undefined, Value::Null, Value::from("x"), Value::from(1)] {
            assert!(chain.test(&value));
            assert!(chain.check(&value).is_ok());
            assert!(chain.check_all(&value).is_empty());
        }
    }

    #[test]
    fn test_evaluate_outcomes() {
        let plain = rule("positive", Arc::new(positive()), false);
        assert_eq!(plain.evaluate(&Value::from(1)), RuleOutcome::Satisfied);
        assert_eq!(plain.evaluate(&Value::from(-1)), RuleOutcome::Violated);

        let inverted = rule("positive", Arc::new(positive()), true);
        assert_eq!(inverted.evaluate(&Value::from(1)), RuleOutcome::Violated);
        assert_eq!(inverted.evaluate(&Value::from(-1)), RuleOutcome::Satisfied);

        let broken = rule("broken", erroring(), false);
        assert_eq!(
            broken.evaluate(&Value::Null),
            RuleOutcome::Errored(RuleError::custom("boom"))
        );
    }

    #[test]
    fn test_errors_collapse_by_invert_flag_under_test() {
        assert!(!rule("broken", erroring(), false).is_satisfied_by(&Value::Null));
        assert!(rule("broken", erroring(), true).is_satisfied_by(&Value::Null));
    }

    #[test]
    fn test_check_reports_first_failure_only() {
        let mut chain = Chain::new();
        chain.push(rule("a", Arc::new(from_fn(|_: &Value| true)), false));
        chain.push(rule("b", Arc::new(from_fn(|_: &Value| false)), false));
        chain.push(rule("c", erroring(), false));

        let failure = chain.check(&Value::from(1)).unwrap_err();
        assert_eq!(failure.rule.name, "b");
        assert_eq!(failure.cause, FailureCause::RuleFailed);

        let all = chain.check_all(&Value::from(1));
        let names: Vec<_> = all.iter().map(|f| f.rule.name.as_str()).collect();
        assert_eq!(names, ["b", "c"]);
        assert!(all[1].cause.is_errored());
    }

    #[test]
    fn test_test_short_circuits() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut chain = Chain::new();
        chain.push(rule("never", Arc::new(from_fn(|_: &Value| false)), false));
        chain.push(rule(
            "counted",
            Arc::new(from_fn(move |_: &Value| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            })),
            false,
        ));

        assert!(!chain.test(&Value::Null));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_check_reports_errors_even_when_inverted() {
        let mut chain = Chain::new();
        chain.push(BoundRule::new(
            "minLength",
            Arc::new(min_length(3)),
            vec![Value::from(3)],
            true,
        ));

        assert!(chain.test(&Value::Undefined));
        let failure = chain.check(&Value::Undefined).unwrap_err();
        assert_eq!(
            failure.cause,
            FailureCause::Errored(RuleError::NoProperty {
                property: "length",
                found: "undefined"
            })
        );
    }

    #[test]
    fn test_display() {
        let mut chain = Chain::new();
        chain.push(BoundRule::new(
            "between",
            Arc::new(positive()),
            vec![Value::from(1), Value::from(5)],
            false,
        ));
        chain.push(BoundRule::new(
            "string",
            Arc::new(positive()),
            vec![],
            true,
        ));
        assert_eq!(chain.to_string(), "between(1, 5).not.string()");
    }
}
