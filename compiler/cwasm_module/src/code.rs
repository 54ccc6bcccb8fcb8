//! Instruction-producing strategies.
//!
//! Both strategies, bytecode translation and text-code parsing, yield the
//! same [`TranslatedCode`]. The generator only depends on these two traits;
//! the algorithms behind them live outside this crate (or, for text code, in
//! [`crate::wat`]).

use cwasm_diagnostic::{LineNumber, Result};
use cwasm_ir::{Instruction, ValueType};

/// Instructions of one function body plus the types of all its locals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranslatedCode {
    instructions: Vec<Instruction>,
    /// Types of every local slot, declared parameters first.
    locals: Vec<ValueType>,
}

impl TranslatedCode {
    /// `locals` covers every slot, including the declared parameters.
    pub fn new(instructions: Vec<Instruction>, locals: Vec<ValueType>) -> Self {
        Self {
            instructions,
            locals,
        }
    }

    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Types of the locals beyond the first `param_count` slots.
    pub fn local_types(&self, param_count: usize) -> &[ValueType] {
        self.locals.get(param_count..).unwrap_or_default()
    }
}

/// Translates a bytecode body into target instructions.
pub trait BytecodeTranslator<C: ?Sized> {
    /// `expects_return` is false for methods whose result is void.
    fn translate(&mut self, code: &C, expects_return: bool) -> Result<TranslatedCode>;
}

impl<C: ?Sized, F> BytecodeTranslator<C> for F
where
    F: FnMut(&C, bool) -> Result<TranslatedCode>,
{
    fn translate(&mut self, code: &C, expects_return: bool) -> Result<TranslatedCode> {
        self(code, expects_return)
    }
}

/// Parses literal text code into target instructions.
pub trait TextCodeParser {
    /// Parse `text`, attributing its first line to `first_line`.
    fn parse(&mut self, text: &str, first_line: LineNumber) -> Result<TranslatedCode>;
}
