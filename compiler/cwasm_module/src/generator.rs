//! The two-phase module generator.
//!
//! # Architecture
//!
//! Generation runs in two passes over every unit of a module, split by a
//! single barrier:
//!
//! ```text
//! prepare(unit)*   declare every function; emit imports with their signature
//! prepare_finish() all declarations are final
//! write(unit)*     emit exports and bodies, recording call targets
//! finish()         every call target must have been declared
//! ```
//!
//! Declaring everything first lets a body call a function that is written
//! later, possibly from another unit.
//!
//! Within a method, all fallible pure work (code selection, translation,
//! signature) runs before the first writer call, so a bad method never leaves
//! a half-written function behind. Failures are wrapped with the current
//! unit's source file, type name and best known line.

use cwasm_diagnostic::{LineNumber, Result, TranslationError};
use cwasm_ir::{AnnotationKind, ExportBinding, FunctionName};
use tracing::{debug, trace, warn};

use crate::code::{BytecodeTranslator, TextCodeParser};
use crate::code_source::{self, CodeSource};
use crate::config::GeneratorConfig;
use crate::function_manager::FunctionManager;
use crate::signature::Signature;
use crate::unit::{is_default_constructor, ClassUnit, CodeBody, MethodUnit};
use crate::wat::WatParser;
use crate::writer::ModuleWriter;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Prepare,
    Write,
}

impl Phase {
    const fn name(self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::Write => "write",
        }
    }
}

/// Source file and type of the unit being processed, for diagnostics.
#[derive(Debug, Default)]
struct UnitContext {
    source_file: Option<String>,
    type_name: Option<String>,
}

impl UnitContext {
    fn wrap(&self, err: TranslationError, line: LineNumber) -> TranslationError {
        err.with_context(self.source_file.as_deref(), self.type_name.as_deref(), line)
    }
}

/// Drives one module generation run.
///
/// `W` receives the output, `B` translates bytecode bodies and `P` parses
/// text code. A generator is good for exactly one module.
pub struct ModuleGenerator<W, B, P = WatParser> {
    writer: W,
    bytecode: B,
    text_parser: P,
    functions: FunctionManager,
    config: GeneratorConfig,
    context: UnitContext,
    phase: Phase,
}

impl<W: ModuleWriter, B> ModuleGenerator<W, B> {
    /// Create a generator with the default configuration and text parser.
    pub fn new(writer: W, bytecode: B) -> Self {
        Self {
            writer,
            bytecode,
            text_parser: WatParser::new(),
            functions: FunctionManager::new(),
            config: GeneratorConfig::default(),
            context: UnitContext::default(),
            phase: Phase::Prepare,
        }
    }
}

impl<W: ModuleWriter, B, P: TextCodeParser> ModuleGenerator<W, B, P> {
    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the text-code parser.
    #[must_use]
    pub fn with_text_parser<Q: TextCodeParser>(self, text_parser: Q) -> ModuleGenerator<W, B, Q> {
        ModuleGenerator {
            writer: self.writer,
            bytecode: self.bytecode,
            text_parser,
            functions: self.functions,
            config: self.config,
            context: self.context,
            phase: self.phase,
        }
    }

    #[inline]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[inline]
    pub fn functions(&self) -> &FunctionManager {
        &self.functions
    }

    #[inline]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Declare every method of `unit`.
    ///
    /// Imports are emitted in full here, with their signature. Must run for
    /// every unit of the module before [`prepare_finish`](Self::prepare_finish).
    pub fn prepare<U: ClassUnit>(&mut self, unit: &U) -> Result<()> {
        self.expect_phase(Phase::Prepare, "prepare")?;
        self.enter_unit(unit);
        let methods = self.unit_methods(unit)?;
        debug!(unit = unit.qualified_name(), methods = methods.len(), "prepare unit");

        for method in methods {
            if elided(method, unit) {
                continue;
            }
            self.prepare_method(unit.qualified_name(), method)
                .map_err(|err| self.context.wrap(err, LineNumber::UNRESOLVED))?;
        }
        Ok(())
    }

    fn prepare_method<M: MethodUnit>(&mut self, owner: &str, method: &M) -> Result<()> {
        let name = FunctionName::new(owner, method.name(), method.descriptor());
        match code_source::import_binding(method)? {
            Some(binding) => {
                // Imports never have locals or debug names.
                let signature = Signature::translate(method.descriptor(), None, None)?;
                trace!(function = %name, module = %binding.module, import = %binding.name, "prepare import");
                self.functions.declare(&name);
                self.writer.prepare_import(&name, &binding.module, &binding.name)?;
                signature.write_to(&mut self.writer)?;
            }
            None => {
                trace!(function = %name, "prepare function");
                self.functions.declare(&name);
                self.writer.prepare_function(&name)?;
            }
        }
        Ok(())
    }

    /// Close the declaration phase. Exactly once, between prepare and write.
    pub fn prepare_finish(&mut self) -> Result<()> {
        self.expect_phase(Phase::Prepare, "prepare_finish")?;
        self.writer.prepare_finish()?;
        self.phase = Phase::Write;
        debug!(declared = self.functions.declared_count(), "declarations finished");
        Ok(())
    }

    /// Write the body of every method of `unit`, in declaration order.
    ///
    /// A failing method aborts this call; functions written before it stay
    /// intact and the caller decides whether to continue with other units.
    pub fn write<U>(&mut self, unit: &U) -> Result<()>
    where
        U: ClassUnit,
        B: BytecodeTranslator<<U::Method as MethodUnit>::Code>,
    {
        self.expect_phase(Phase::Write, "write")?;
        self.enter_unit(unit);
        let methods = self.unit_methods(unit)?;
        debug!(unit = unit.qualified_name(), methods = methods.len(), "write unit");

        for method in methods {
            if elided(method, unit) {
                continue;
            }
            let mut line = LineNumber::UNRESOLVED;
            self.write_method(unit.qualified_name(), method, &mut line)
                .map_err(|err| self.context.wrap(err, line))?;
        }
        Ok(())
    }

    /// `line` tracks the best known line for diagnostics.
    fn write_method<M>(&mut self, owner: &str, method: &M, line: &mut LineNumber) -> Result<()>
    where
        M: MethodUnit,
        B: BytecodeTranslator<M::Code>,
    {
        let name = FunctionName::new(owner, method.name(), method.descriptor());
        let source = code_source::select(method)?;
        trace!(function = %name, source = source.label(), "write method");

        let (code, descriptor) = match source {
            CodeSource::Import(_) | CodeSource::NoBody => return Ok(()),
            CodeSource::TextCode { body, first_line } => {
                *line = first_line;
                let code = self.text_parser.parse(&body.value, first_line)?;
                (code, body.signature_or(method.descriptor()).to_owned())
            }
            CodeSource::Bytecode {
                code,
                expects_return,
            } => {
                *line = code.first_line_number();
                let translated = self.bytecode.translate(code, expects_return)?;
                (translated, method.descriptor().to_owned())
            }
        };

        let names = match method.code() {
            Some(body) if self.config.debug_names => Some(body as &dyn CodeBody),
            _ => None,
        };
        let signature = Signature::translate(&descriptor, names, Some(&code))?;

        if let Some(values) = method.annotation(AnnotationKind::Export) {
            let export = ExportBinding::decode(values);
            let export_name = export.export_name(method.name());
            trace!(function = %name, export = export_name, "export");
            self.writer.write_export(&name, export_name)?;
        }
        self.writer.write_method_start(&name)?;
        self.functions.declare(&name);
        signature.write_to(&mut self.writer)?;

        for instruction in code.instructions() {
            *line = instruction.line.or(*line);
            if let Some(callee) = instruction.callee() {
                if self.functions.call(callee) {
                    trace!(caller = %name, callee = %callee, "new call target");
                }
            }
            self.writer.write_instruction(instruction)?;
        }
        self.writer.write_method_finish()?;
        Ok(())
    }

    /// End the run and hand back the writer.
    ///
    /// Fails if any called function was never declared or imported.
    pub fn finish(self) -> Result<W> {
        self.expect_phase(Phase::Write, "finish")?;
        for name in self.functions.unresolved() {
            warn!(function = %name, "call to a function that was never declared");
        }
        self.functions.check_resolved()?;
        debug!(
            declared = self.functions.declared_count(),
            called = self.functions.called_count(),
            "module generation finished"
        );
        Ok(self.writer)
    }

    fn expect_phase(&self, expected: Phase, operation: &'static str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(TranslationError::phase(operation, self.phase.name()))
        }
    }

    fn enter_unit<U: ClassUnit>(&mut self, unit: &U) {
        self.context = UnitContext {
            source_file: unit.source_file().map(str::to_owned),
            type_name: Some(unit.qualified_name().to_owned()),
        };
    }

    fn unit_methods<'u, U: ClassUnit>(&self, unit: &'u U) -> Result<&'u [U::Method]> {
        unit.methods()
            .map_err(|err| self.context.wrap(err.into(), LineNumber::UNRESOLVED))
    }
}

/// Whether `method` is a no-op default constructor of `unit`.
fn elided<U: ClassUnit>(method: &U::Method, unit: &U) -> bool {
    let elide = is_default_constructor(method, unit.super_type_name());
    if elide {
        trace!(unit = unit.qualified_name(), "skip default constructor");
    }
    elide
}
