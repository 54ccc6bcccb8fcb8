//! A writer that records every call, for tests.

use std::io;

use cwasm_ir::{FunctionName, Instruction, ValueType};

use crate::signature::ParamKind;
use crate::writer::ModuleWriter;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Import {
        name: String,
        module: String,
        import_name: String,
    },
    Function(String),
    PrepareFinish,
    Export {
        name: String,
        export_name: String,
    },
    Start(String),
    Param {
        kind: ParamKind,
        ty: ValueType,
        name: Option<String>,
    },
    ParamFinish,
    Instruction(String),
    Finish,
}

impl Event {
    pub fn param(kind: ParamKind, ty: ValueType, name: Option<&str>) -> Self {
        Self::Param {
            kind,
            ty,
            name: name.map(str::to_owned),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub events: Vec<Event>,
    /// Fail the n-th `write_instruction` call (zero based).
    pub fail_instruction: Option<usize>,
    pub(crate) instructions: usize,
}

impl RecordingWriter {
    /// Names passed to `write_method_start`, in order.
    pub fn started(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Start(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ModuleWriter for RecordingWriter {
    fn prepare_import(&mut self, name: &FunctionName, module: &str, import_name: &str) -> io::Result<()> {
        self.events.push(Event::Import {
            name: name.signature_name(),
            module: module.to_owned(),
            import_name: import_name.to_owned(),
        });
        Ok(())
    }

    fn prepare_function(&mut self, name: &FunctionName) -> io::Result<()> {
        self.events.push(Event::Function(name.signature_name()));
        Ok(())
    }

    fn prepare_finish(&mut self) -> io::Result<()> {
        self.events.push(Event::PrepareFinish);
        Ok(())
    }

    fn write_export(&mut self, name: &FunctionName, export_name: &str) -> io::Result<()> {
        self.events.push(Event::Export {
            name: name.signature_name(),
            export_name: export_name.to_owned(),
        });
        Ok(())
    }

    fn write_method_start(&mut self, name: &FunctionName) -> io::Result<()> {
        self.events.push(Event::Start(name.signature_name()));
        Ok(())
    }

    fn write_method_param(&mut self, kind: ParamKind, ty: ValueType, name: Option<&str>) -> io::Result<()> {
        self.events.push(Event::param(kind, ty, name));
        Ok(())
    }

    fn write_method_param_finish(&mut self) -> io::Result<()> {
        self.events.push(Event::ParamFinish);
        Ok(())
    }

    fn write_instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
        let index = self.instructions;
        self.instructions += 1;
        if self.fail_instruction == Some(index) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.events.push(Event::Instruction(instruction.kind.to_string()));
        Ok(())
    }

    fn write_method_finish(&mut self) -> io::Result<()> {
        self.events.push(Event::Finish);
        Ok(())
    }
}
