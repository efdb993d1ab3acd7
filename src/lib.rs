//! # rulechain
//!
//! Fluent rule-chain validation.
//!
//! Name rules one after another on a [`Validator`], optionally prefixing a
//! rule with `not`, then ask whether a value passes ([`Validator::test`]) or
//! which rule it breaks ([`Validator::check`]).
//!
//! ## Quick Example
//!
//! ```rust
//! use rulechain::{validator, Value};
//!
//! let username = validator()
//!     .string().unwrap()
//!     .min_length(3).unwrap()
//!     .not().pattern(r"\s").unwrap();
//!
//! assert!(username.test(&Value::from("alice")));
//! assert!(!username.test(&Value::from("al ice")));
//!
//! match username.check(&Value::from("al")) {
//!     Ok(()) => println!("valid"),
//!     Err(failure) => {
//!         assert_eq!(failure.rule.name, "minLength");
//!         assert_eq!(failure.rule.args, vec![Value::from(3)]);
//!     }
//! }
//! ```
//!
//! ## Custom rules
//!
//! Rules are resolved by name through a [`RuleRegistry`]. Custom rules are
//! registered once, during setup, and take precedence over built-ins:
//!
//! ```rust
//! use rulechain::{register_custom_rule, validator, Value};
//! use rulechain::predicate::from_fn;
//!
//! register_custom_rule("nonBlank", |_: &[Value]| {
//!     Ok(from_fn(|v: &Value| v.as_str().is_some_and(|s| !s.trim().is_empty())))
//! });
//!
//! let v = validator().apply("nonBlank", [] as [Value; 0]).unwrap();
//! assert!(v.test(&Value::from("x")));
//! assert!(!v.test(&Value::from("  ")));
//! ```
//!
//! ## `test` versus `check`
//!
//! A predicate can fail to evaluate a value at all, such as asking
//! `undefined` for its length. `test` folds that into its answer (the rule
//! fails, or passes under `not`); `check` reports it as the failure's cause.
//!
//! ## Features
//!
//! - `tracing`: debug events for registration, binding and check failures.
//! - `serde`: serialization of [`Value`] and [`ValidationFailure`] reports.
//! - `proptest`: `Arbitrary` for [`Value`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod chain;
pub mod error;
pub mod predicate;
pub mod registry;
pub mod testing;
pub mod validator;
pub mod value;

// Re-exports
pub use chain::{BoundRule, Chain, RuleOutcome};
pub use error::{BindError, FailureCause, RuleError, ValidationFailure};
pub use registry::{register_custom_rule, RuleFactory, RuleRegistry, RuleSource};
pub use validator::{validator, Member, Modifier, Operation, Validator};
pub use value::Value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chain::{BoundRule, Chain};
    pub use crate::error::{BindError, FailureCause, RuleError, ValidationFailure};
    pub use crate::predicate::{from_fn, Predicate};
    pub use crate::registry::{register_custom_rule, RuleRegistry};
    pub use crate::validator::{validator, Validator};
    pub use crate::value::Value;
}
