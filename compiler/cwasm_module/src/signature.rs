//! Descriptor to signature translation.
//!
//! # Architecture
//!
//! A [`Signature`] is computed in full before anything is written, so a bad
//! descriptor never leaves a half-declared function in the writer. Writing
//! it is then infallible apart from writer I/O:
//!
//! ```text
//! "(IJ)D" + names + locals
//!     → param i32 $a, param i64 $b, result f64, local i32 $tmp
//!     → write_method_param × 4, write_method_param_finish
//! ```

use std::fmt;
use std::io;

use cwasm_ir::{DescriptorError, MethodDescriptor, ValueType};

use crate::code::TranslatedCode;
use crate::unit::CodeBody;
use crate::writer::ModuleWriter;

/// Role of one signature entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Param,
    Result,
    Local,
}

impl ParamKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Param => "param",
            Self::Result => "result",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared parameter, result or local.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureEntry {
    pub kind: ParamKind,
    pub ty: ValueType,
    /// Debug name. Results are never named.
    pub name: Option<String>,
}

/// Ordered params, result and locals of one function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    entries: Vec<SignatureEntry>,
    param_count: usize,
}

impl Signature {
    /// Translate `descriptor`.
    ///
    /// `names` supplies debug names by local slot; `code` supplies the
    /// additional locals of a translated body. Imports pass neither.
    pub fn translate(
        descriptor: &str,
        names: Option<&dyn CodeBody>,
        code: Option<&TranslatedCode>,
    ) -> Result<Self, DescriptorError> {
        let descriptor = MethodDescriptor::parse(descriptor)?;
        let name_at = |slot: usize| names.and_then(|names| names.local_variable_name(slot)).map(str::to_owned);

        let mut entries = Vec::with_capacity(descriptor.params().len() + 1);
        let mut param_count = 0;
        for fragment in descriptor.params() {
            let ty = ValueType::from_fragment(fragment)?.ok_or_else(|| {
                DescriptorError::VoidParameter {
                    descriptor: descriptor.as_str().to_owned(),
                }
            })?;
            entries.push(SignatureEntry {
                kind: ParamKind::Param,
                ty,
                name: name_at(param_count),
            });
            param_count += 1;
        }

        // A void result declares nothing.
        if let Some(ty) = ValueType::from_fragment(descriptor.result())? {
            entries.push(SignatureEntry {
                kind: ParamKind::Result,
                ty,
                name: None,
            });
        }

        if let Some(code) = code {
            let mut slot = param_count;
            for &ty in code.local_types(param_count) {
                entries.push(SignatureEntry {
                    kind: ParamKind::Local,
                    ty,
                    name: name_at(slot),
                });
                slot += 1;
            }
        }

        Ok(Self {
            entries,
            param_count,
        })
    }

    #[inline]
    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    #[inline]
    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Declare every entry, then close the declaration list.
    ///
    /// `write_method_param_finish` is called even for an empty signature.
    pub fn write_to<W: ModuleWriter + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writer.write_method_param(entry.kind, entry.ty, entry.name.as_deref())?;
        }
        writer.write_method_param_finish()
    }
}

#[cfg(test)]
mod tests;
