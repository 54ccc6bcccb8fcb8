//! Two-phase module generation for cwasm
//!
//! Translates compiled class units (methods, bytecode bodies, annotations)
//! into a stack-machine module through a [`ModuleWriter`]. All functions of
//! the module are declared before any body is written, so calls may target
//! functions that are written later or come from another unit.
//!
//! ```text
//! let mut generator = ModuleGenerator::new(TextModuleWriter::new(), translator);
//! for unit in &units { generator.prepare(unit)?; }
//! generator.prepare_finish()?;
//! for unit in &units { generator.write(unit)?; }
//! let wat = generator.finish()?.finish();
//! ```
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=cwasm_module=debug`: unit and phase boundaries.
//! - `RUST_LOG=cwasm_module=trace`: every method, its code source and new
//!   call targets.

mod code;
mod code_source;
mod config;
mod function_manager;
mod generator;
pub mod memory;
mod signature;
mod text;
mod unit;
mod wat;
mod writer;

#[cfg(test)]
mod recording;

use std::sync::Once;

pub use code::{BytecodeTranslator, TextCodeParser, TranslatedCode};
pub use code_source::{import_binding, select as select_code_source, CodeSource};
pub use config::GeneratorConfig;
pub use cwasm_diagnostic::{Result, TranslationError, TranslationErrorKind};
pub use function_manager::FunctionManager;
pub use generator::ModuleGenerator;
pub use signature::{ParamKind, Signature, SignatureEntry};
pub use text::TextModuleWriter;
pub use unit::{
    is_default_constructor, ClassUnit, CodeBody, MethodUnit, CONSTRUCTOR_NAME,
    DEFAULT_CONSTRUCTOR_DESCRIPTOR,
};
pub use wat::WatParser;
pub use writer::ModuleWriter;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
