#![allow(clippy::unwrap_used)]

use cwasm_diagnostic::TranslationErrorKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn name(member: &str) -> FunctionName {
    FunctionName::new("Calc", member, "(II)I")
}

#[test]
fn declare_is_idempotent() {
    let mut functions = FunctionManager::new();
    assert!(functions.declare(&name("add")));
    assert!(!functions.declare(&name("add")));
    assert_eq!(functions.declared_count(), 1);
    assert!(functions.is_declared(&name("add")));
    assert!(!functions.is_called(&name("add")));
}

#[test]
fn overloads_are_distinct() {
    let mut functions = FunctionManager::new();
    functions.declare(&FunctionName::new("Calc", "add", "(II)I"));
    functions.declare(&FunctionName::new("Calc", "add", "(JJ)J"));
    assert_eq!(functions.declared_count(), 2);
}

#[test]
fn call_before_declare_resolves_later() {
    let mut functions = FunctionManager::new();
    functions.call(&name("sub"));
    assert_eq!(functions.unresolved(), vec![&name("sub")]);
    functions.declare(&name("sub"));
    assert!(functions.unresolved().is_empty());
    assert!(functions.check_resolved().is_ok());
}

#[test]
fn unresolved_calls_are_sorted() {
    let mut functions = FunctionManager::new();
    functions.call(&name("mul"));
    functions.call(&name("add"));
    functions.call(&name("div"));
    functions.declare(&name("div"));
    assert_eq!(functions.unresolved(), vec![&name("add"), &name("mul")]);
}

#[test]
fn check_resolved_reports_missing_function() {
    let mut functions = FunctionManager::new();
    functions.call(&name("missing"));
    let err = functions.check_resolved().unwrap_err();
    match err.kind() {
        TranslationErrorKind::UnresolvedFunction(missing) => assert_eq!(missing, &name("missing")),
        other => panic!("unexpected error kind: {other:?}"),
    }
    assert_eq!(err.to_string(), "missing function: Calc.missing(II)I");
}

proptest! {
    #[test]
    fn repeated_operations_match_single(
        members in prop::collection::vec("[a-d]", 0..24),
        repeat in 1usize..4,
    ) {
        let mut once = FunctionManager::new();
        let mut many = FunctionManager::new();
        for member in &members {
            once.declare(&name(member));
            once.call(&name(member));
            for _ in 0..repeat {
                many.declare(&name(member));
                many.call(&name(member));
            }
        }
        prop_assert_eq!(once.declared_count(), many.declared_count());
        prop_assert_eq!(once.called_count(), many.called_count());
        prop_assert!(many.unresolved().is_empty());
    }
}
