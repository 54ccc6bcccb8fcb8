#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn renders_full_location() {
    let err = TranslationError::unresolved(FunctionName::new("Calc", "sub", "(II)I")).with_context(
        Some("Calc.java"),
        Some("Calc"),
        LineNumber::new(12),
    );
    assert_eq!(
        err.to_string(),
        "Calc.java:12: missing function: Calc.sub(II)I (in Calc)"
    );
}

#[test]
fn renders_unresolved_line() {
    let err = TranslationError::from(DescriptorError::UnsupportedType {
        type_name: "java/lang/String".to_owned(),
    })
    .with_context(Some("Text.java"), Some("Text"), LineNumber::UNRESOLVED);
    assert_eq!(err.line().raw(), -1);
    assert_eq!(
        err.to_string(),
        "Text.java: not supported data type in method signature: java/lang/String (in Text)"
    );
}

#[test]
fn renders_without_any_location() {
    let err = TranslationError::phase("write", "prepare");
    assert_eq!(err.to_string(), "`write` is not allowed in the prepare phase");
}

#[test]
fn inner_context_wins() {
    let err = TranslationError::syntax("unknown instruction `i32.frob`", LineNumber::new(4))
        .with_context(None, Some("Inner"), LineNumber::UNRESOLVED)
        .with_context(Some("Outer.java"), Some("Outer"), LineNumber::new(99));
    assert_eq!(err.line(), LineNumber::new(4));
    assert_eq!(err.type_name(), Some("Inner"));
    assert_eq!(err.source_file(), Some("Outer.java"));
}

#[test]
fn exposes_underlying_cause() {
    let io = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated class file");
    let err = TranslationError::from(io);
    assert!(matches!(err.kind(), TranslationErrorKind::Io(_)));
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "truncated class file");
}

#[test]
fn wraps_translator_failures() {
    let err = TranslationError::translator("stack underflow at pc 7");
    assert_eq!(err.to_string(), "stack underflow at pc 7");
    assert!(matches!(err.kind(), TranslationErrorKind::Translator(_)));
}

#[test]
fn descriptor_and_annotation_errors_are_the_cause() {
    let descriptor = DescriptorError::UnsupportedType {
        type_name: "java/lang/String".to_owned(),
    };
    let err = TranslationError::from(descriptor.clone());
    let source = err.source().unwrap();
    assert_eq!(source.downcast_ref::<DescriptorError>(), Some(&descriptor));

    let annotation = AnnotationError::MissingField {
        annotation: cwasm_ir::AnnotationKind::TextCode,
        field: "value",
    };
    let err = TranslationError::from(annotation.clone());
    let source = err.source().unwrap();
    assert_eq!(source.downcast_ref::<AnnotationError>(), Some(&annotation));
}

#[test]
fn leaf_causes_end_the_chain() {
    let err = TranslationError::unresolved(FunctionName::new("Calc", "gone", "()V"));
    assert!(err.source().is_none());
}
