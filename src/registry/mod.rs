//! Rule registry: where rule names resolve to factories
//!
//! A rule factory takes the arguments a rule is named with and produces a
//! [`Predicate`]. The registry resolves a name to a factory by looking at
//! custom rules first and the built-in catalog second, so a custom rule
//! registered under a built-in's name replaces it for every later binding.
//!
//! There is one process-wide registry, [`RuleRegistry::global`], which
//! [`register_custom_rule`] writes to and every [`validator()`](crate::validator)
//! reads from. Independent registries can be created and handed to
//! [`Validator::with_registry`](crate::Validator::with_registry).
//!
//! # Registration discipline
//!
//! Register custom rules during setup, before chains are built and evaluated
//! concurrently. The registry is never left in an unsound state, but the
//! result of registering a rule while other threads are binding the same name
//! is unspecified. Entries cannot be removed.
//!
//! # Example
//!
//! ```rust
//! use rulechain::{register_custom_rule, validator, BindError, Value};
//! use rulechain::predicate::from_fn;
//!
//! register_custom_rule("multipleOf", |args: &[Value]| {
//!     let step = args
//!         .first()
//!         .and_then(Value::as_f64)
//!         .ok_or_else(|| BindError::custom("multipleOf needs a number"))?;
//!     Ok(from_fn(move |v: &Value| v.as_f64().is_some_and(|n| n % step == 0.0)))
//! });
//!
//! let v = validator().apply("multipleOf", [Value::from(5)]).unwrap();
//! assert!(v.test(&Value::from(15)));
//! assert!(!v.test(&Value::from(7)));
//! ```

mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::chain::BoundRule;
use crate::error::BindError;
use crate::predicate::{BoxedPredicate, Predicate};
use crate::value::Value;

/// A shared rule factory: arguments in, predicate out.
pub type RuleFactory = Arc<dyn Fn(&[Value]) -> Result<BoxedPredicate, BindError> + Send + Sync>;

/// Where a rule name resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleSource {
    /// A caller-registered rule.
    Custom,
    /// A rule from the built-in catalog.
    BuiltIn,
}

static GLOBAL: LazyLock<Arc<RuleRegistry>> = LazyLock::new(|| Arc::new(RuleRegistry::new()));

/// Name-to-factory mapping for custom rules, backed by the built-in catalog.
#[derive(Default)]
pub struct RuleRegistry {
    custom: RwLock<HashMap<String, RuleFactory>>,
}

impl RuleRegistry {
    /// Create a registry with no custom rules.
    pub fn new() -> Self {
        RuleRegistry {
            custom: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> Arc<RuleRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Register a custom rule, replacing any custom rule of the same name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rulechain::{RuleRegistry, RuleSource, Value};
    /// use rulechain::predicate::from_fn;
    ///
    /// let registry = RuleRegistry::new();
    /// registry.register("even", |_: &[Value]| Ok(from_fn(|v: &Value| v.as_f64() == Some(2.0))));
    /// assert_eq!(registry.source("even"), Some(RuleSource::Custom));
    /// ```
    pub fn register<F, P>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&[Value]) -> Result<P, BindError> + Send + Sync + 'static,
        P: Predicate + 'static,
    {
        let factory: RuleFactory =
            Arc::new(move |args: &[Value]| factory(args).map(|p| Arc::new(p) as BoxedPredicate));
        self.register_factory(name, factory);
    }

    /// Register an already type-erased factory.
    pub fn register_factory(&self, name: impl Into<String>, factory: RuleFactory) {
        let name = name.into();
        #[cfg(feature = "tracing")]
        tracing::debug!(rule = %name, "registering custom rule");
        self.custom
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, factory);
    }

    /// Resolve a name to a factory: custom rules first, then built-ins.
    pub fn lookup(&self, name: &str) -> Option<RuleFactory> {
        if let Some(factory) = self.custom_factory(name) {
            return Some(factory);
        }
        builtin::find(name).map(|factory| {
            let name = name.to_string();
            Arc::new(move |args: &[Value]| factory(&builtin::Args::new(&name, args)))
                as RuleFactory
        })
    }

    /// Where `name` would resolve, if anywhere.
    pub fn source(&self, name: &str) -> Option<RuleSource> {
        if self.read().contains_key(name) {
            Some(RuleSource::Custom)
        } else if builtin::find(name).is_some() {
            Some(RuleSource::BuiltIn)
        } else {
            None
        }
    }

    /// Returns true if `name` resolves to a custom or built-in rule.
    pub fn contains(&self, name: &str) -> bool {
        self.source(name).is_some()
    }

    /// Names of the registered custom rules, sorted.
    pub fn custom_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Names of the built-in rules, in catalog order.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        builtin::BUILTINS.iter().map(|(name, _)| *name)
    }

    /// Bind a rule: resolve the name, run its factory on `args` now, and
    /// capture everything in a [`BoundRule`].
    ///
    /// Factory errors are returned as they are.
    pub fn bind(&self, name: &str, args: Vec<Value>, invert: bool) -> Result<BoundRule, BindError> {
        let factory = self
            .lookup(name)
            .ok_or_else(|| BindError::UnknownRule(name.to_string()))?;
        let predicate = factory(&args)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(rule = %name, args = ?args, invert, "bound rule");
        Ok(BoundRule::new(name, predicate, args, invert))
    }

    fn custom_factory(&self, name: &str) -> Option<RuleFactory> {
        self.read().get(name).cloned()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, RuleFactory>> {
        self.custom.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("custom", &self.custom_names())
            .finish()
    }
}

/// Register a custom rule on the process-wide registry.
///
/// The rule becomes available, by name, to every chain bound afterwards. A
/// rule with a built-in's name overrides the built-in.
pub fn register_custom_rule<F, P>(name: impl Into<String>, factory: F)
where
    F: Fn(&[Value]) -> Result<P, BindError> + Send + Sync + 'static,
    P: Predicate + 'static,
{
    GLOBAL.register(name, factory);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::predicate::from_fn;

    #[test]
    fn test_builtins_resolve_without_registration() {
        let registry = RuleRegistry::new();
        assert_eq!(registry.source("minLength"), Some(RuleSource::BuiltIn));
        assert!(registry.lookup("minLength").is_some());
        assert_eq!(registry.source("nope"), None);
        assert!(registry.lookup("nope").is_none());
        assert!(registry.custom_names().is_empty());
    }

    #[test]
    fn test_custom_overrides_builtin() {
        let registry = RuleRegistry::new();
        registry.register("string", |_: &[Value]| Ok(from_fn(|_: &Value| true)));

        assert_eq!(registry.source("string"), Some(RuleSource::Custom));
        let rule = registry.bind("string", vec![], false).unwrap();
        assert_eq!(rule.predicate.test(&Value::from(1)), Ok(true));
    }

    #[test]
    fn test_register_replaces_previous_custom() {
        let registry = RuleRegistry::new();
        registry.register("flag", |_: &[Value]| Ok(from_fn(|_: &Value| false)));
        registry.register("flag", |_: &[Value]| Ok(from_fn(|_: &Value| true)));

        let rule = registry.bind("flag", vec![], false).unwrap();
        assert_eq!(rule.predicate.test(&Value::Null), Ok(true));
        assert_eq!(registry.custom_names(), ["flag"]);
    }

    #[test]
    fn test_bind_captures_args_and_invert() {
        let registry = RuleRegistry::new();
        let rule = registry
            .bind("between", vec![Value::from(1), Value::from(3)], true)
            .unwrap();
        assert_eq!(rule.name, "between");
        assert_eq!(rule.args, vec![Value::from(1), Value::from(3)]);
        assert!(rule.invert);
    }

    #[test]
    fn test_bind_errors() {
        let registry = RuleRegistry::new();
        assert_eq!(
            registry.bind("nope", vec![], false).unwrap_err(),
            BindError::UnknownRule("nope".into())
        );
        assert!(matches!(
            registry.bind("pattern", vec![Value::from("[")], false),
            Err(BindError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_factory_runs_at_bind_time() {
        let registry = RuleRegistry::new();
        registry.register("strict", |args: &[Value]| {
            if args.is_empty() {
                return Err(BindError::custom("strict needs an argument"));
            }
            let expected = args[0].clone();
            Ok(move |v: &Value| -> Result<bool, RuleError> { Ok(*v == expected) })
        });

        assert_eq!(
            registry.bind("strict", vec![], false).unwrap_err(),
            BindError::custom("strict needs an argument")
        );
        let rule = registry.bind("strict", vec![Value::from("a")], false).unwrap();
        assert_eq!(rule.predicate.test(&Value::from("a")), Ok(true));
    }

    #[test]
    fn test_builtin_names() {
        let names: Vec<_> = RuleRegistry::builtin_names().collect();
        assert_eq!(names.first(), Some(&"pattern"));
        assert!(names.contains(&"includes"));
    }

    #[test]
    fn test_global_is_shared() {
        let a = RuleRegistry::global();
        let b = RuleRegistry::global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
