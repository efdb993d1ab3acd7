//! Property-based tests for chain evaluation

use proptest::prelude::*;
use rulechain::{validator, Validator, Value};

const NULLARY: &[&str] = &[
    "string",
    "number",
    "boolean",
    "undefined",
    "null",
    "array",
    "lowercase",
    "uppercase",
    "vowel",
    "consonant",
    "empty",
    "negative",
    "positive",
    "even",
    "odd",
];

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-50i32..50).prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        "[a-zA-Z ]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(2, 12, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::Array)
    })
}

fn rule() -> impl Strategy<Value = (&'static str, bool)> {
    (prop::sample::select(NULLARY), any::<bool>())
}

fn build(rules: &[(&'static str, bool)]) -> Validator {
    rules.iter().fold(validator(), |v, &(name, invert)| {
        let v = if invert { v.not() } else { v };
        v.apply(name, [] as [Value; 0]).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_empty_chain_passes_everything(v in value()) {
        let chain = validator();
        prop_assert!(chain.test(&v));
        prop_assert!(chain.check(&v).is_ok());
        prop_assert!(chain.check_all(&v).is_empty());
    }

    #[test]
    fn prop_not_negates_a_single_rule(name in prop::sample::select(NULLARY), v in value()) {
        let plain = build(&[(name, false)]);
        let inverted = build(&[(name, true)]);
        prop_assert_eq!(inverted.test(&v), !plain.test(&v));
    }

    #[test]
    fn prop_chain_is_conjunction_of_rules(
        rules in prop::collection::vec(rule(), 0..6),
        v in value()
    ) {
        let chain = build(&rules);
        let each = rules.iter().all(|r| build(&[*r]).test(&v));
        prop_assert_eq!(chain.test(&v), each);
    }

    #[test]
    fn prop_check_passing_implies_test_passing(
        rules in prop::collection::vec(rule(), 0..6),
        v in value()
    ) {
        let chain = build(&rules);
        if chain.check(&v).is_ok() {
            prop_assert!(chain.test(&v));
        }
    }

    #[test]
    fn prop_check_agrees_with_test_without_not(
        names in prop::collection::vec(prop::sample::select(NULLARY), 0..6),
        v in value()
    ) {
        let rules: Vec<_> = names.into_iter().map(|n| (n, false)).collect();
        let chain = build(&rules);
        prop_assert_eq!(chain.check(&v).is_ok(), chain.test(&v));
    }

    #[test]
    fn prop_check_reports_first_of_check_all(
        rules in prop::collection::vec(rule(), 0..6),
        v in value()
    ) {
        let chain = build(&rules);
        let first = chain.check(&v).err().map(|f| f.rule.to_string());
        let all: Vec<_> = chain.check_all(&v).into_iter().map(|f| f.rule.to_string()).collect();
        prop_assert_eq!(first, all.first().cloned());
    }

    #[test]
    fn prop_length_bounds(s in "[a-z]{0,10}", min in 0usize..6, span in 0usize..6) {
        let max = min + span;
        let v = validator().length(min, max).unwrap();
        let n = s.chars().count();
        prop_assert_eq!(v.test(&Value::from(s.as_str())), min <= n && n <= max);
    }

    #[test]
    fn prop_between_is_inclusive(n in -100i32..100, lo in -50i32..50, span in 0i32..50) {
        let hi = lo + span;
        let v = validator().between(lo, hi).unwrap();
        // A zero bound is open on its side.
        let above = lo == 0 || lo <= n;
        let below = hi == 0 || n <= hi;
        prop_assert_eq!(v.test(&Value::from(n)), above && below);
    }
}
