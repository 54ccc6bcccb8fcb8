//! Diagnostics for the cwasm module generator.
//!
//! The generator reports exactly one diagnostic type, [`TranslationError`],
//! regardless of where a failure originates: reading a unit, decoding an
//! annotation, translating a descriptor, translating a body, writing the
//! module, or finding a dangling call when the module is finished.

mod error;

pub use cwasm_ir::LineNumber;
pub use error::{TranslationError, TranslationErrorKind};

/// Result alias used throughout the generator.
pub type Result<T, E = TranslationError> = std::result::Result<T, E>;
