//! The module writer interface.
//!
//! A writer receives declarative calls in a fixed order and is the only
//! component that produces the final artifact. Per module:
//!
//! ```text
//! prepare:  (prepare_import, write_method_param*, write_method_param_finish
//!            | prepare_function)*
//!           prepare_finish
//! write:    (write_export? write_method_start write_method_param*
//!            write_method_param_finish write_instruction* write_method_finish)*
//! ```

use std::io;

use cwasm_ir::{FunctionName, Instruction, ValueType};

use crate::signature::ParamKind;

/// Sink for a generated module.
pub trait ModuleWriter {
    /// Declare a host import. Its signature follows immediately.
    fn prepare_import(&mut self, name: &FunctionName, module: &str, import_name: &str) -> io::Result<()>;

    /// Declare a function whose body is written later.
    fn prepare_function(&mut self, _name: &FunctionName) -> io::Result<()> {
        Ok(())
    }

    /// All declarations of the module are final.
    fn prepare_finish(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Export `name` under `export_name`. Precedes `write_method_start`.
    fn write_export(&mut self, name: &FunctionName, export_name: &str) -> io::Result<()>;

    /// Open the body of `name`.
    fn write_method_start(&mut self, name: &FunctionName) -> io::Result<()>;

    /// Declare one param, result or local of the current function.
    fn write_method_param(&mut self, kind: ParamKind, ty: ValueType, name: Option<&str>) -> io::Result<()>;

    /// No further declarations follow for the current function.
    fn write_method_param_finish(&mut self) -> io::Result<()>;

    fn write_instruction(&mut self, instruction: &Instruction) -> io::Result<()>;

    /// Close the current function.
    fn write_method_finish(&mut self) -> io::Result<()>;
}

impl<W: ModuleWriter + ?Sized> ModuleWriter for &mut W {
    fn prepare_import(&mut self, name: &FunctionName, module: &str, import_name: &str) -> io::Result<()> {
        (**self).prepare_import(name, module, import_name)
    }

    fn prepare_function(&mut self, name: &FunctionName) -> io::Result<()> {
        (**self).prepare_function(name)
    }

    fn prepare_finish(&mut self) -> io::Result<()> {
        (**self).prepare_finish()
    }

    fn write_export(&mut self, name: &FunctionName, export_name: &str) -> io::Result<()> {
        (**self).write_export(name, export_name)
    }

    fn write_method_start(&mut self, name: &FunctionName) -> io::Result<()> {
        (**self).write_method_start(name)
    }

    fn write_method_param(&mut self, kind: ParamKind, ty: ValueType, name: Option<&str>) -> io::Result<()> {
        (**self).write_method_param(kind, ty, name)
    }

    fn write_method_param_finish(&mut self) -> io::Result<()> {
        (**self).write_method_param_finish()
    }

    fn write_instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
        (**self).write_instruction(instruction)
    }

    fn write_method_finish(&mut self) -> io::Result<()> {
        (**self).write_method_finish()
    }
}
