#![allow(clippy::unwrap_used)]

use cwasm_ir::{InstrKind, ValueType};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::memory::CodeDef;
use crate::recording::{Event, RecordingWriter};

fn entry(kind: ParamKind, ty: ValueType, name: Option<&str>) -> SignatureEntry {
    SignatureEntry {
        kind,
        ty,
        name: name.map(str::to_owned),
    }
}

fn write(signature: &Signature) -> Vec<Event> {
    let mut writer = RecordingWriter::default();
    signature.write_to(&mut writer).unwrap();
    writer.events
}

#[test]
fn void_no_params_only_finishes() {
    let signature = Signature::translate("()V", None, None).unwrap();
    assert!(signature.entries().is_empty());
    assert_eq!(write(&signature), vec![Event::ParamFinish]);
}

#[test]
fn named_param_and_unnamed_result() {
    let names = CodeDef::new(Vec::new()).with_local_name(0, "x");
    let signature = Signature::translate("(I)I", Some(&names), None).unwrap();
    assert_eq!(
        signature.entries(),
        &[
            entry(ParamKind::Param, ValueType::I32, Some("x")),
            entry(ParamKind::Result, ValueType::I32, None),
        ]
    );
    assert_eq!(
        write(&signature),
        vec![
            Event::param(ParamKind::Param, ValueType::I32, Some("x")),
            Event::param(ParamKind::Result, ValueType::I32, None),
            Event::ParamFinish,
        ]
    );
}

#[test]
fn maps_every_primitive() {
    let signature = Signature::translate("(ZBCSIJFD)V", None, None).unwrap();
    let types: Vec<_> = signature.entries().iter().map(|e| e.ty).collect();
    assert_eq!(
        types,
        vec![
            ValueType::I32,
            ValueType::I32,
            ValueType::I32,
            ValueType::I32,
            ValueType::I32,
            ValueType::I64,
            ValueType::F32,
            ValueType::F64,
        ]
    );
    assert_eq!(signature.param_count(), 8);
}

#[test]
fn names_table_may_lack_a_slot() {
    let names = CodeDef::new(Vec::new()).with_local_name(1, "b");
    let signature = Signature::translate("(II)V", Some(&names), None).unwrap();
    assert_eq!(
        signature.entries(),
        &[
            entry(ParamKind::Param, ValueType::I32, None),
            entry(ParamKind::Param, ValueType::I32, Some("b")),
        ]
    );
}

#[test]
fn locals_follow_params_and_continue_slots() {
    let names = CodeDef::new(Vec::new())
        .with_local_name(0, "n")
        .with_local_name(1, "acc")
        .with_local_name(2, "i");
    let code = TranslatedCode::new(
        vec![InstrKind::Return.into()],
        vec![ValueType::I32, ValueType::I64, ValueType::I32],
    );
    let signature = Signature::translate("(I)J", Some(&names), Some(&code)).unwrap();
    assert_eq!(
        signature.entries(),
        &[
            entry(ParamKind::Param, ValueType::I32, Some("n")),
            entry(ParamKind::Result, ValueType::I64, None),
            entry(ParamKind::Local, ValueType::I64, Some("acc")),
            entry(ParamKind::Local, ValueType::I32, Some("i")),
        ]
    );
}

#[test]
fn reference_types_are_unsupported() {
    let err = Signature::translate("(Ljava/lang/String;)V", None, None).unwrap_err();
    assert_eq!(
        err,
        DescriptorError::UnsupportedType {
            type_name: "java/lang/String".to_owned()
        }
    );
}

#[test]
fn malformed_descriptor_is_rejected() {
    assert!(Signature::translate("(I", None, None).is_err());
    assert!(Signature::translate("(V)V", None, None).is_err());
}

proptest! {
    #[test]
    fn arity_matches_descriptor(params in "[ZBCSIJFD]{0,12}", result in "[ZBCSIJFDV]") {
        let descriptor = format!("({params}){result}");
        let signature = Signature::translate(&descriptor, None, None).unwrap();
        let expected_results = usize::from(result != "V");
        prop_assert_eq!(signature.param_count(), params.len());
        prop_assert_eq!(signature.entries().len(), params.len() + expected_results);
        prop_assert!(signature.entries().iter().all(|e| e.name.is_none()));
    }
}
