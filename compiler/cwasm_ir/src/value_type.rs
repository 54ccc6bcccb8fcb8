//! Target value types.
//!
//! The stack machine knows four primitive value kinds. Descriptor fragments
//! map onto them as follows:
//!
//! | Fragment | Value type |
//! |----------|------------|
//! | `Z` `B` `C` `S` `I` | `i32` |
//! | `J` | `i64` |
//! | `F` | `f32` |
//! | `D` | `f64` |
//! | `V` | no value |
//!
//! Object (`L…;`) and array (`[…`) fragments are well formed but have no
//! value type and are rejected with [`DescriptorError::UnsupportedType`].

use std::fmt;

use crate::descriptor::DescriptorError;

/// A primitive value kind of the target format.
///
/// "No value" (a void result) is represented as `Option::<ValueType>::None`
/// by every API that can produce it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
}

impl ValueType {
    /// All value types in binary-code order.
    pub const ALL: [ValueType; 4] = [Self::I32, Self::I64, Self::F32, Self::F64];

    /// Map one descriptor fragment to a value type.
    ///
    /// Returns `Ok(None)` for `V`.
    pub fn from_fragment(fragment: &str) -> Result<Option<Self>, DescriptorError> {
        let ty = match fragment.as_bytes() {
            [b'Z' | b'B' | b'C' | b'S' | b'I'] => Self::I32,
            [b'J'] => Self::I64,
            [b'F'] => Self::F32,
            [b'D'] => Self::F64,
            [b'V'] => return Ok(None),
            [b'L', .., b';'] if fragment.len() > 2 => {
                return Err(DescriptorError::UnsupportedType {
                    type_name: fragment[1..fragment.len() - 1].to_owned(),
                });
            }
            [b'[', ..] => {
                return Err(DescriptorError::UnsupportedType {
                    type_name: fragment.to_owned(),
                });
            }
            _ => {
                return Err(DescriptorError::MalformedType {
                    descriptor: fragment.to_owned(),
                    offset: 0,
                });
            }
        };
        Ok(Some(ty))
    }

    /// Binary type code.
    pub const fn code(self) -> u8 {
        match self {
            Self::I32 => 0x7f,
            Self::I64 => 0x7e,
            Self::F32 => 0x7d,
            Self::F64 => 0x7c,
        }
    }

    /// Text-format keyword.
    pub const fn name(self) -> &'static str {
        match self {
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Parse a text-format keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// Whether this is an integer type.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::I32 | Self::I64)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
