//! Per-method choice of instruction source.

use cwasm_ir::{AnnotationError, AnnotationKind, ImportBinding, LineNumber, TextCodeBody};

use crate::unit::{CodeBody, MethodUnit};

/// Where the body of a method comes from.
///
/// Exactly one variant applies to every method.
#[derive(Debug)]
pub enum CodeSource<'m, C> {
    /// Host import; no body is written.
    Import(ImportBinding),
    /// Literal text code, parsed starting at `first_line`.
    TextCode {
        body: TextCodeBody,
        first_line: LineNumber,
    },
    /// Bytecode translated by the external translator.
    Bytecode { code: &'m C, expects_return: bool },
    /// Abstract, native or interface method.
    NoBody,
}

impl<C> CodeSource<'_, C> {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Import(_) => "import",
            Self::TextCode { .. } => "text code",
            Self::Bytecode { .. } => "bytecode",
            Self::NoBody => "no body",
        }
    }
}

/// The import binding of `method`, if it carries an `Import` annotation.
pub fn import_binding<M: MethodUnit>(method: &M) -> Result<Option<ImportBinding>, AnnotationError> {
    method
        .annotation(AnnotationKind::Import)
        .map(|values| ImportBinding::decode(values, method.name()))
        .transpose()
}

/// Select the code source of `method`.
///
/// Precedence: import, text code, bytecode, no body.
pub fn select<M: MethodUnit>(method: &M) -> Result<CodeSource<'_, M::Code>, AnnotationError> {
    if let Some(binding) = import_binding(method)? {
        return Ok(CodeSource::Import(binding));
    }

    if let Some(values) = method.annotation(AnnotationKind::TextCode) {
        let body = TextCodeBody::decode(values)?;
        let first_line = method
            .code()
            .map_or(LineNumber::UNRESOLVED, CodeBody::first_line_number);
        return Ok(CodeSource::TextCode { body, first_line });
    }

    Ok(match method.code() {
        Some(code) => CodeSource::Bytecode {
            code,
            expects_return: !method.descriptor().ends_with(")V"),
        },
        None => CodeSource::NoBody,
    })
}
