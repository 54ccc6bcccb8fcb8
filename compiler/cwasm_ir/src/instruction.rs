//! Target instructions.
//!
//! The generator treats instructions as opaque apart from [`InstrKind::Call`],
//! which it inspects to record call-graph edges. The remaining variants are a
//! compact flat subset of the stack machine's operations, enough for the
//! text-code parser and the text writer to agree on.

use std::fmt;

use crate::function_name::FunctionName;
use crate::line::LineNumber;
use crate::value_type::ValueType;

/// One instruction with the source line it was produced from.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub kind: InstrKind,
    pub line: LineNumber,
}

impl Instruction {
    #[inline]
    pub fn new(kind: InstrKind, line: LineNumber) -> Self {
        Self { kind, line }
    }

    /// The called function, if this is a call.
    #[inline]
    pub fn callee(&self) -> Option<&FunctionName> {
        match &self.kind {
            InstrKind::Call(name) => Some(name),
            _ => None,
        }
    }
}

impl From<InstrKind> for Instruction {
    fn from(kind: InstrKind) -> Self {
        Self::new(kind, LineNumber::UNRESOLVED)
    }
}

/// Instruction operation.
#[derive(Clone, Debug, PartialEq)]
pub enum InstrKind {
    Const(Constant),
    LocalGet(u32),
    LocalSet(u32),
    LocalTee(u32),
    Numeric { ty: ValueType, op: NumericOp },
    Call(FunctionName),
    Block,
    Loop,
    If,
    Else,
    End,
    Br(u32),
    BrIf(u32),
    Return,
    Drop,
    Unreachable,
    Nop,
}

impl fmt::Display for InstrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(c) => write!(f, "{}.const {c}", c.value_type()),
            Self::LocalGet(idx) => write!(f, "local.get {idx}"),
            Self::LocalSet(idx) => write!(f, "local.set {idx}"),
            Self::LocalTee(idx) => write!(f, "local.tee {idx}"),
            Self::Numeric { ty, op } => match op.mnemonic(*ty) {
                Some(mnemonic) => write!(f, "{ty}.{mnemonic}"),
                // Only reachable for hand-built instructions; keep it visible.
                None => write!(f, "{ty}.<invalid {op:?}>"),
            },
            Self::Call(name) => write!(f, "call ${}", name.symbol()),
            Self::Block => f.write_str("block"),
            Self::Loop => f.write_str("loop"),
            Self::If => f.write_str("if"),
            Self::Else => f.write_str("else"),
            Self::End => f.write_str("end"),
            Self::Br(depth) => write!(f, "br {depth}"),
            Self::BrIf(depth) => write!(f, "br_if {depth}"),
            Self::Return => f.write_str("return"),
            Self::Drop => f.write_str("drop"),
            Self::Unreachable => f.write_str("unreachable"),
            Self::Nop => f.write_str("nop"),
        }
    }
}

/// A typed constant operand.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Constant {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Constant {
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::I32(_) => ValueType::I32,
            Self::I64(_) => ValueType::I64,
            Self::F32(_) => ValueType::F32,
            Self::F64(_) => ValueType::F64,
        }
    }

    /// Parse a constant literal of type `ty`.
    ///
    /// Accepts decimal integers and the float spellings `nan`, `inf`, `-inf`.
    pub fn parse(ty: ValueType, literal: &str) -> Option<Self> {
        match ty {
            ValueType::I32 => literal.parse().ok().map(Self::I32),
            ValueType::I64 => literal.parse().ok().map(Self::I64),
            ValueType::F32 => parse_float(literal).map(|v| Self::F32(v as f32)),
            ValueType::F64 => parse_float(literal).map(Self::F64),
        }
    }
}

fn parse_float(literal: &str) -> Option<f64> {
    match literal {
        "nan" | "+nan" | "-nan" => Some(f64::NAN),
        "inf" | "+inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => literal.parse().ok(),
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) if v.is_nan() => f.write_str("nan"),
            Self::F64(v) if v.is_nan() => f.write_str("nan"),
            // `inf` / `-inf` already match the text format
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Numeric operator, combined with a [`ValueType`] in [`InstrKind::Numeric`].
///
/// Integer division, remainder, shifts and comparisons are the signed forms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Neg,
    Eqz,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl NumericOp {
    const ALL: [NumericOp; 18] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Shl,
        Self::Shr,
        Self::Neg,
        Self::Eqz,
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Ge,
    ];

    /// Text mnemonic for this operator on `ty`, or `None` if the stack
    /// machine has no such operation (e.g. `f32.rem`, `i32.neg`).
    pub fn mnemonic(self, ty: ValueType) -> Option<&'static str> {
        let int = ty.is_integer();
        Some(match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div if int => "div_s",
            Self::Div => "div",
            Self::Rem if int => "rem_s",
            Self::And if int => "and",
            Self::Or if int => "or",
            Self::Xor if int => "xor",
            Self::Shl if int => "shl",
            Self::Shr if int => "shr_s",
            Self::Neg if !int => "neg",
            Self::Eqz if int => "eqz",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt if int => "lt_s",
            Self::Lt => "lt",
            Self::Gt if int => "gt_s",
            Self::Gt => "gt",
            Self::Le if int => "le_s",
            Self::Le => "le",
            Self::Ge if int => "ge_s",
            Self::Ge => "ge",
            Self::Rem | Self::And | Self::Or | Self::Xor | Self::Shl | Self::Shr | Self::Neg
            | Self::Eqz => return None,
        })
    }

    /// Inverse of [`mnemonic`](Self::mnemonic).
    pub fn from_mnemonic(ty: ValueType, mnemonic: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic(ty) == Some(mnemonic))
    }
}
