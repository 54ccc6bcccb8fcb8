//! WebAssembly text format writer.
//!
//! Renders the module as WAT. Imports are collected ahead of all functions,
//! which the text format requires. Each function (with its exports) is
//! buffered and only committed on `write_method_finish`; a function that was
//! abandoned mid-way is dropped when the next one starts. Function ids are
//! [`FunctionName::symbol`]s, so overloads get distinct ids.
//!
//! ```text
//! (module
//!   (import "env" "print" (func $Calc.log_I_V (param i32)))
//!   (export "add" (func $Calc.add_II_I))
//!   (func $Calc.add_II_I (param $a i32) (param $b i32) (result i32)
//!     local.get 0
//!     local.get 1
//!     i32.add
//!   )
//! )
//! ```

use std::fmt::Write as _;
use std::io;

use cwasm_ir::{FunctionName, Instruction, ValueType};
use tracing::warn;

use crate::signature::ParamKind;
use crate::writer::ModuleWriter;

/// Buffers the module text in memory.
#[derive(Debug, Default)]
pub struct TextModuleWriter {
    imports: String,
    functions: String,
    exports: Vec<String>,
    state: State,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    /// An import whose signature is being declared.
    Import(String),
    /// A function whose signature is being declared.
    Signature(PendingFunction),
    /// A function whose instructions are being written.
    Body(PendingFunction),
}

#[derive(Debug)]
struct PendingFunction {
    exports: Vec<String>,
    header: String,
    body: String,
}

impl TextModuleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the module and return its text.
    ///
    /// A function that was never finished is left out.
    pub fn finish(self) -> String {
        if !matches!(self.state, State::Idle) {
            warn!("module finished with an incomplete declaration; dropping it");
        }
        let mut out = String::with_capacity(self.imports.len() + self.functions.len() + 16);
        out.push_str("(module\n");
        out.push_str(&self.imports);
        out.push_str(&self.functions);
        out.push_str(")\n");
        out
    }

    fn expect_idle(&self, operation: &str) -> io::Result<()> {
        match self.state {
            State::Idle => Ok(()),
            _ => Err(misuse(operation)),
        }
    }
}

impl ModuleWriter for TextModuleWriter {
    fn prepare_import(&mut self, name: &FunctionName, module: &str, import_name: &str) -> io::Result<()> {
        self.expect_idle("prepare_import")?;
        self.state = State::Import(format!(
            "  (import {} {} (func {}",
            quote(module),
            quote(import_name),
            function_id(name)
        ));
        Ok(())
    }

    fn prepare_finish(&mut self) -> io::Result<()> {
        self.expect_idle("prepare_finish")
    }

    fn write_export(&mut self, name: &FunctionName, export_name: &str) -> io::Result<()> {
        if matches!(self.state, State::Import(_)) {
            return Err(misuse("write_export"));
        }
        self.exports.push(format!(
            "  (export {} (func {}))\n",
            quote(export_name),
            function_id(name)
        ));
        Ok(())
    }

    fn write_method_start(&mut self, name: &FunctionName) -> io::Result<()> {
        if matches!(self.state, State::Import(_)) {
            return Err(misuse("write_method_start"));
        }
        if let State::Signature(stale) | State::Body(stale) = std::mem::take(&mut self.state) {
            warn!(function = %stale.header.trim(), "dropping unfinished function");
        }
        self.state = State::Signature(PendingFunction {
            exports: std::mem::take(&mut self.exports),
            header: format!("  (func {}", function_id(name)),
            body: String::new(),
        });
        Ok(())
    }

    fn write_method_param(&mut self, kind: ParamKind, ty: ValueType, name: Option<&str>) -> io::Result<()> {
        let header = match &mut self.state {
            State::Import(header) if kind != ParamKind::Local => header,
            State::Signature(function) => &mut function.header,
            _ => return Err(misuse("write_method_param")),
        };
        match name {
            Some(name) if kind != ParamKind::Result => {
                let _ = write!(header, " ({kind} ${name} {ty})");
            }
            _ => {
                let _ = write!(header, " ({kind} {ty})");
            }
        }
        Ok(())
    }

    fn write_method_param_finish(&mut self) -> io::Result<()> {
        match std::mem::take(&mut self.state) {
            State::Import(header) => {
                self.imports.push_str(&header);
                self.imports.push_str("))\n");
                Ok(())
            }
            State::Signature(function) => {
                self.state = State::Body(function);
                Ok(())
            }
            other => {
                self.state = other;
                Err(misuse("write_method_param_finish"))
            }
        }
    }

    fn write_instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
        let State::Body(function) = &mut self.state else {
            return Err(misuse("write_instruction"));
        };
        let _ = writeln!(function.body, "    {}", instruction.kind);
        Ok(())
    }

    fn write_method_finish(&mut self) -> io::Result<()> {
        let function = match std::mem::take(&mut self.state) {
            State::Body(function) => function,
            other => {
                self.state = other;
                return Err(misuse("write_method_finish"));
            }
        };
        for export in &function.exports {
            self.functions.push_str(export);
        }
        self.functions.push_str(&function.header);
        self.functions.push('\n');
        self.functions.push_str(&function.body);
        self.functions.push_str("  )\n");
        Ok(())
    }
}

fn misuse(operation: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("`{operation}` called out of order"),
    )
}

fn function_id(name: &FunctionName) -> String {
    format!("${}", name.symbol())
}

/// Quote a string literal, escaping `"` and `\`.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
