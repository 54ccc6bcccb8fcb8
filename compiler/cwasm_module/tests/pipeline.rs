//! End-to-end generation of WAT modules from in-memory units.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cwasm_ir::LineNumber;
use cwasm_module::memory::{ClassDef, CodeDef, MethodDef};
use cwasm_module::{
    init_tracing, CodeBody, ModuleGenerator, Result, TextCodeParser, TextModuleWriter,
    TranslatedCode, TranslationErrorKind, WatParser,
};
use pretty_assertions::assert_eq;

/// Stand-in bytecode translator: bodies hold text code.
fn translate(code: &CodeDef, _expects_return: bool) -> Result<TranslatedCode> {
    let text = std::str::from_utf8(code.bytes()).expect("test bodies are UTF-8");
    WatParser::new().parse(text, code.first_line_number())
}

type Translate = fn(&CodeDef, bool) -> Result<TranslatedCode>;

fn generate(units: &[ClassDef]) -> Result<String> {
    init_tracing();
    let mut generator = ModuleGenerator::new(TextModuleWriter::new(), translate as Translate);
    for unit in units {
        generator.prepare(unit)?;
    }
    generator.prepare_finish()?;
    for unit in units {
        generator.write(unit)?;
    }
    Ok(generator.finish()?.finish())
}

fn body(text: &str, first_line: u32) -> CodeDef {
    CodeDef::new(text).with_first_line(first_line)
}

#[test]
fn calculator_module() {
    let calc = ClassDef::new("Calc")
        .with_source_file("Calc.java")
        .with_default_constructor()
        .with_method(MethodDef::new("log", "(I)V").with_import("env", "print"))
        .with_method(
            MethodDef::new("add", "(II)I").with_export(None).with_code(
                body("local.get 0\nlocal.get 1\ni32.add\ncall $Calc.twice(I)I", 5)
                    .with_local_name(0, "a")
                    .with_local_name(1, "b"),
            ),
        )
        .with_method(
            MethodDef::new("twice", "(I)I").with_code(
                body("local.get 0\nlocal.get 0\ni32.add", 9).with_local_name(0, "n"),
            ),
        )
        .with_method(
            MethodDef::new("bits", "(D)J")
                .with_export(Some("to_bits"))
                .with_text_code("local.get 0 ;; raw\ncall $Calc.log(I)V", Some("(I)V")),
        )
        .with_method(MethodDef::new("area", "()D"));

    let wat = generate(&[calc]).unwrap();
    assert_eq!(
        wat,
        r#"(module
  (import "env" "print" (func $Calc.log_I_V (param i32)))
  (export "add" (func $Calc.add_II_I))
  (func $Calc.add_II_I (param $a i32) (param $b i32) (result i32)
    local.get 0
    local.get 1
    i32.add
    call $Calc.twice_I_I
  )
  (func $Calc.twice_I_I (param $n i32) (result i32)
    local.get 0
    local.get 0
    i32.add
  )
  (export "to_bits" (func $Calc.bits_D_J))
  (func $Calc.bits_D_J (param i32)
    local.get 0
    call $Calc.log_I_V
  )
)
"#
    );
}

#[test]
fn forward_calls_across_units() {
    let main = ClassDef::new("Main").with_method(
        MethodDef::new("main", "()V")
            .with_export(None)
            .with_code(body("call $Util.tick()V", 1)),
    );
    let util = ClassDef::new("Util").with_method(MethodDef::new("tick", "()V").with_code(body("nop", 1)));

    let wat = generate(&[main, util]).unwrap();
    assert_eq!(
        wat,
        r#"(module
  (export "main" (func $Main.main__V))
  (func $Main.main__V
    call $Util.tick__V
  )
  (func $Util.tick__V
    nop
  )
)
"#
    );
}

#[test]
fn dangling_call_aborts_module() {
    let main = ClassDef::new("Main").with_method(MethodDef::new("main", "()V").with_code(body("call $Util.tick()V", 1)));
    let err = generate(&[main]).unwrap_err();
    assert!(matches!(err.kind(), TranslationErrorKind::UnresolvedFunction(_)));
}

#[test]
fn failing_unit_reports_location() {
    let text = ClassDef::new("Text").with_source_file("Text.java").with_method(
        MethodDef::new("concat", "(Ljava/lang/String;)V").with_code(body("nop", 14)),
    );
    let err = generate(&[text]).unwrap_err();
    assert_eq!(err.line(), LineNumber::new(14));
    assert_eq!(
        err.to_string(),
        "Text.java:14: not supported data type in method signature: java/lang/String (in Text)"
    );
}

#[test]
fn overloads_get_distinct_ids() {
    let calc = ClassDef::new("Calc")
        .with_method(MethodDef::new("add", "(II)I").with_code(body("local.get 0\nlocal.get 1\ni32.add", 1)))
        .with_method(MethodDef::new("add", "(JJ)J").with_code(body("local.get 0\nlocal.get 1\ni64.add", 2)))
        .with_method(
            MethodDef::new("run", "()J")
                .with_export(None)
                .with_code(body("i64.const 1\ni64.const 2\ncall $Calc.add(JJ)J", 3)),
        );

    let wat = generate(&[calc]).unwrap();
    assert_eq!(wat.matches("(func $Calc.add_II_I").count(), 1);
    assert_eq!(wat.matches("(func $Calc.add_JJ_J").count(), 1);
    assert_eq!(
        wat,
        r#"(module
  (func $Calc.add_II_I (param i32) (param i32) (result i32)
    local.get 0
    local.get 1
    i32.add
  )
  (func $Calc.add_JJ_J (param i64) (param i64) (result i64)
    local.get 0
    local.get 1
    i64.add
  )
  (export "run" (func $Calc.run__J))
  (func $Calc.run__J (result i64)
    i64.const 1
    i64.const 2
    call $Calc.add_JJ_J
  )
)
"#
    );
}
