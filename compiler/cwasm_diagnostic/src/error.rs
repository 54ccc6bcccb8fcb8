//! The translation diagnostic.
//!
//! Every failure the generator can report is a [`TranslationError`]: a cause
//! ([`TranslationErrorKind`]) plus where it happened. Location fields are
//! filled in as the error travels outwards through the method and unit
//! boundaries; [`TranslationError::with_context`] never overwrites a field
//! that an inner layer already set, so the innermost location wins.

use std::error::Error;
use std::fmt;
use std::io;

use cwasm_ir::{AnnotationError, DescriptorError, FunctionName, LineNumber};
use thiserror::Error;

/// What went wrong.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranslationErrorKind {
    /// Reading a unit or writing the module failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A malformed or unsupported method descriptor.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    /// An annotation table lacks a required field.
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
    /// A called function was never declared or imported.
    #[error("missing function: {0}")]
    UnresolvedFunction(FunctionName),
    /// Text code could not be parsed.
    #[error("{message}")]
    Syntax { message: String },
    /// A bytecode translator reported a failure.
    #[error("{0}")]
    Translator(#[source] Box<dyn Error + Send + Sync>),
    /// A generator operation was called out of order.
    #[error("`{operation}` is not allowed in the {phase} phase")]
    Phase {
        operation: &'static str,
        phase: &'static str,
    },
}

/// A translation failure with its source location.
#[derive(Debug)]
pub struct TranslationError {
    kind: Box<TranslationErrorKind>,
    source_file: Option<String>,
    type_name: Option<String>,
    line: LineNumber,
}

impl TranslationError {
    /// Create an error with no location yet.
    pub fn new(kind: TranslationErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
            source_file: None,
            type_name: None,
            line: LineNumber::UNRESOLVED,
        }
    }

    /// Create an error attributed to `line`.
    pub fn at_line(kind: TranslationErrorKind, line: LineNumber) -> Self {
        Self {
            line,
            ..Self::new(kind)
        }
    }

    /// A text-code syntax error.
    pub fn syntax(message: impl Into<String>, line: LineNumber) -> Self {
        Self::at_line(
            TranslationErrorKind::Syntax {
                message: message.into(),
            },
            line,
        )
    }

    /// Wrap a failure reported by a bytecode translator.
    pub fn translator(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::new(TranslationErrorKind::Translator(err.into()))
    }

    /// A call to a function that was never declared.
    pub fn unresolved(name: FunctionName) -> Self {
        Self::new(TranslationErrorKind::UnresolvedFunction(name))
    }

    /// A generator operation called in the wrong phase.
    pub fn phase(operation: &'static str, phase: &'static str) -> Self {
        Self::new(TranslationErrorKind::Phase { operation, phase })
    }

    /// Fill in location fields that are still unknown.
    ///
    /// Fields set by an inner layer are kept as they are.
    #[must_use]
    pub fn with_context(
        mut self,
        source_file: Option<&str>,
        type_name: Option<&str>,
        line: LineNumber,
    ) -> Self {
        if self.source_file.is_none() {
            self.source_file = source_file.map(str::to_owned);
        }
        if self.type_name.is_none() {
            self.type_name = type_name.map(str::to_owned);
        }
        self.line = self.line.or(line);
        self
    }

    #[inline]
    pub fn kind(&self) -> &TranslationErrorKind {
        &self.kind
    }

    #[inline]
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    #[inline]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    #[inline]
    pub fn line(&self) -> LineNumber {
        self.line
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source_file, self.line.get()) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}: ")?,
            (Some(file), None) => write!(f, "{file}: ")?,
            (None, Some(line)) => write!(f, "line {line}: ")?,
            (None, None) => {}
        }
        write!(f, "{}", self.kind)?;
        if let Some(type_name) = &self.type_name {
            write!(f, " (in {type_name})")?;
        }
        Ok(())
    }
}

impl Error for TranslationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &*self.kind {
            // Transparent kinds display as their inner error; that error is the cause.
            TranslationErrorKind::Descriptor(err) => Some(err as &(dyn Error + 'static)),
            TranslationErrorKind::Annotation(err) => Some(err as &(dyn Error + 'static)),
            kind => kind.source(),
        }
    }
}

impl From<TranslationErrorKind> for TranslationError {
    fn from(kind: TranslationErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<io::Error> for TranslationError {
    fn from(err: io::Error) -> Self {
        Self::new(TranslationErrorKind::Io(err))
    }
}

impl From<DescriptorError> for TranslationError {
    fn from(err: DescriptorError) -> Self {
        Self::new(TranslationErrorKind::Descriptor(err))
    }
}

impl From<AnnotationError> for TranslationError {
    fn from(err: AnnotationError) -> Self {
        Self::new(TranslationErrorKind::Annotation(err))
    }
}

#[cfg(test)]
mod tests;
