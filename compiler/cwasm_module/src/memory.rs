//! In-memory unit model.
//!
//! [`ClassDef`], [`MethodDef`] and [`CodeDef`] implement the unit traits over
//! owned data, so units can be assembled without a class-file parser:
//!
//! ```text
//! let unit = ClassDef::new("com/example/Calc")
//!     .with_source_file("Calc.java")
//!     .with_method(
//!         MethodDef::new("add", "(II)I")
//!             .with_export(None)
//!             .with_code(CodeDef::new(bytes).with_local_name(0, "a")),
//!     );
//! ```

use std::io;

use cwasm_ir::{AnnotationKind, AnnotationValues, LineNumber};
use rustc_hash::FxHashMap;

use crate::unit::{ClassUnit, CodeBody, MethodUnit, CONSTRUCTOR_NAME, DEFAULT_CONSTRUCTOR_DESCRIPTOR};

/// Supertype assumed when none is given.
pub const ROOT_TYPE: &str = "java/lang/Object";

/// `aload_0; invokespecial #idx; return` with the constant-pool index masked.
const SUPER_INIT_RETURN: [u8; 5] = [0x2a, 0xb7, 0x00, 0x01, 0xb1];

/// An owned class unit.
#[derive(Clone, Debug)]
pub struct ClassDef {
    name: String,
    source_file: Option<String>,
    super_type: Option<String>,
    methods: Vec<MethodDef>,
}

impl ClassDef {
    /// A class named `name` extending [`ROOT_TYPE`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_file: None,
            super_type: Some(ROOT_TYPE.to_owned()),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    /// Set the supertype; `None` makes this a root type.
    #[must_use]
    pub fn with_super_type(mut self, super_type: Option<&str>) -> Self {
        self.super_type = super_type.map(str::to_owned);
        self
    }

    /// Append a method. Declaration order is insertion order.
    #[must_use]
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Append a default constructor calling the current supertype.
    #[must_use]
    pub fn with_default_constructor(self) -> Self {
        let code = match &self.super_type {
            Some(super_type) => CodeDef::super_init_return(super_type),
            None => CodeDef::new(vec![0xb1]),
        };
        self.with_method(
            MethodDef::new(CONSTRUCTOR_NAME, DEFAULT_CONSTRUCTOR_DESCRIPTOR).with_code(code),
        )
    }
}

impl ClassUnit for ClassDef {
    type Method = MethodDef;

    fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    fn qualified_name(&self) -> &str {
        &self.name
    }

    fn super_type_name(&self) -> Option<&str> {
        self.super_type.as_deref()
    }

    fn methods(&self) -> io::Result<&[MethodDef]> {
        Ok(&self.methods)
    }
}

/// An owned method.
#[derive(Clone, Debug)]
pub struct MethodDef {
    name: String,
    descriptor: String,
    annotations: FxHashMap<AnnotationKind, AnnotationValues>,
    code: Option<CodeDef>,
}

impl MethodDef {
    /// A method without annotations or code.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            annotations: FxHashMap::default(),
            code: None,
        }
    }

    /// Attach a raw annotation table.
    #[must_use]
    pub fn with_annotation(mut self, kind: AnnotationKind, fields: &[(&str, &str)]) -> Self {
        let values = fields
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        self.annotations.insert(kind, values);
        self
    }

    #[must_use]
    pub fn with_import(self, module: &str, name: &str) -> Self {
        self.with_annotation(AnnotationKind::Import, &[("module", module), ("name", name)])
    }

    #[must_use]
    pub fn with_export(self, name: Option<&str>) -> Self {
        match name {
            Some(name) => self.with_annotation(AnnotationKind::Export, &[("name", name)]),
            None => self.with_annotation(AnnotationKind::Export, &[]),
        }
    }

    #[must_use]
    pub fn with_text_code(self, value: &str, signature: Option<&str>) -> Self {
        match signature {
            Some(signature) => self.with_annotation(
                AnnotationKind::TextCode,
                &[("value", value), ("signature", signature)],
            ),
            None => self.with_annotation(AnnotationKind::TextCode, &[("value", value)]),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: CodeDef) -> Self {
        self.code = Some(code);
        self
    }
}

impl MethodUnit for MethodDef {
    type Code = CodeDef;

    fn name(&self) -> &str {
        &self.name
    }

    fn descriptor(&self) -> &str {
        &self.descriptor
    }

    fn annotation(&self, kind: AnnotationKind) -> Option<&AnnotationValues> {
        self.annotations.get(&kind)
    }

    fn code(&self) -> Option<&CodeDef> {
        self.code.as_ref()
    }
}

/// An owned code body.
#[derive(Clone, Debug, Default)]
pub struct CodeDef {
    bytes: Vec<u8>,
    first_line: LineNumber,
    local_names: Vec<Option<String>>,
    /// Target type of the single `invokespecial` in a super-init-return body.
    super_init_target: Option<String>,
}

impl CodeDef {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            ..Self::default()
        }
    }

    /// A body that only calls `super_type`'s default constructor and returns.
    pub fn super_init_return(super_type: &str) -> Self {
        Self {
            bytes: SUPER_INIT_RETURN.to_vec(),
            super_init_target: Some(super_type.to_owned()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_first_line(mut self, line: u32) -> Self {
        self.first_line = LineNumber::new(line);
        self
    }

    /// Record the debug name of local `slot`.
    #[must_use]
    pub fn with_local_name(mut self, slot: usize, name: &str) -> Self {
        if self.local_names.len() <= slot {
            self.local_names.resize(slot + 1, None);
        }
        self.local_names[slot] = Some(name.to_owned());
        self
    }
}

impl CodeBody for CodeDef {
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn first_line_number(&self) -> LineNumber {
        self.first_line
    }

    fn local_variable_name(&self, slot: usize) -> Option<&str> {
        self.local_names.get(slot)?.as_deref()
    }

    fn is_super_init_return(&self, super_type: &str) -> bool {
        let shape_matches = matches!(
            self.bytes.as_slice(),
            [0x2a, 0xb7, _, _, 0xb1]
        );
        shape_matches && self.super_init_target.as_deref() == Some(super_type)
    }
}
