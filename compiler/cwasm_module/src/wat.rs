//! Text-code parser.
//!
//! Parses the flat instruction subset accepted in `TextCode` annotations.
//! Instructions are separated by whitespace, may share a line, and `;;`
//! starts a comment running to the end of the line. Calls name their target
//! with its full signature so it can be resolved against the module:
//!
//! ```text
//! local.get 0      ;; the argument
//! i64.const 1
//! i64.add
//! call $com/example/Calc.log(J)V
//! ```

use std::str::SplitWhitespace;

use cwasm_diagnostic::{LineNumber, Result, TranslationError};
use cwasm_ir::{Constant, FunctionName, InstrKind, Instruction, NumericOp, ValueType};
use tracing::trace;

use crate::code::{TextCodeParser, TranslatedCode};

/// Parser for the flat text-code subset.
#[derive(Clone, Copy, Debug, Default)]
pub struct WatParser;

impl WatParser {
    pub fn new() -> Self {
        Self
    }
}

impl TextCodeParser for WatParser {
    fn parse(&mut self, text: &str, first_line: LineNumber) -> Result<TranslatedCode> {
        let mut instructions = Vec::new();
        for (index, source_line) in text.lines().enumerate() {
            let line = first_line.offset(u32::try_from(index).unwrap_or(u32::MAX));
            let code = source_line
                .split_once(";;")
                .map_or(source_line, |(code, _comment)| code);
            let mut tokens = code.split_whitespace();
            while let Some(mnemonic) = tokens.next() {
                let kind = parse_instruction(mnemonic, &mut tokens)
                    .map_err(|message| TranslationError::syntax(message, line))?;
                instructions.push(Instruction::new(kind, line));
            }
        }
        trace!(count = instructions.len(), "parsed text code");
        // Text code declares no locals beyond its parameters.
        Ok(TranslatedCode::new(instructions, Vec::new()))
    }
}

fn parse_instruction(mnemonic: &str, operands: &mut SplitWhitespace<'_>) -> std::result::Result<InstrKind, String> {
    let kind = match mnemonic {
        "local.get" => InstrKind::LocalGet(index_operand(mnemonic, operands)?),
        "local.set" => InstrKind::LocalSet(index_operand(mnemonic, operands)?),
        "local.tee" => InstrKind::LocalTee(index_operand(mnemonic, operands)?),
        "br" => InstrKind::Br(index_operand(mnemonic, operands)?),
        "br_if" => InstrKind::BrIf(index_operand(mnemonic, operands)?),
        "call" => InstrKind::Call(call_target(operands.next().ok_or_else(|| missing(mnemonic))?)?),
        "block" => InstrKind::Block,
        "loop" => InstrKind::Loop,
        "if" => InstrKind::If,
        "else" => InstrKind::Else,
        "end" => InstrKind::End,
        "return" => InstrKind::Return,
        "drop" => InstrKind::Drop,
        "unreachable" => InstrKind::Unreachable,
        "nop" => InstrKind::Nop,
        _ => typed_instruction(mnemonic, operands)?,
    };
    Ok(kind)
}

/// `<ty>.const V` and `<ty>.<op>`.
fn typed_instruction(mnemonic: &str, operands: &mut SplitWhitespace<'_>) -> std::result::Result<InstrKind, String> {
    let unknown = || format!("unknown instruction `{mnemonic}`");
    let (ty, op) = mnemonic.split_once('.').ok_or_else(unknown)?;
    let ty = ValueType::from_name(ty).ok_or_else(unknown)?;
    if op == "const" {
        let literal = operands.next().ok_or_else(|| missing(mnemonic))?;
        return Constant::parse(ty, literal)
            .map(InstrKind::Const)
            .ok_or_else(|| invalid(mnemonic, literal));
    }
    let op = NumericOp::from_mnemonic(ty, op).ok_or_else(unknown)?;
    Ok(InstrKind::Numeric { ty, op })
}

fn index_operand(mnemonic: &str, operands: &mut SplitWhitespace<'_>) -> std::result::Result<u32, String> {
    let operand = operands.next().ok_or_else(|| missing(mnemonic))?;
    operand.parse().map_err(|_| invalid(mnemonic, operand))
}

/// `$owner.name(descriptor)`
fn call_target(operand: &str) -> std::result::Result<FunctionName, String> {
    operand
        .strip_prefix('$')
        .and_then(FunctionName::parse_signature_name)
        .ok_or_else(|| invalid("call", operand))
}

fn missing(mnemonic: &str) -> String {
    format!("missing operand for `{mnemonic}`")
}

fn invalid(mnemonic: &str, operand: &str) -> String {
    format!("invalid operand `{operand}` for `{mnemonic}`")
}
