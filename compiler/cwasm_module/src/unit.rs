//! The compiled-unit model consumed by the generator.
//!
//! The generator never parses class files itself. A front end hands it
//! values implementing these traits; [`crate::memory`] provides a plain
//! in-memory implementation.

use std::io;

use cwasm_ir::{AnnotationKind, AnnotationValues, LineNumber};

/// Member name of instance constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Descriptor of a constructor without parameters.
pub const DEFAULT_CONSTRUCTOR_DESCRIPTOR: &str = "()V";

/// A compiled type: a class or interface.
pub trait ClassUnit {
    type Method: MethodUnit;

    /// Name of the source file the unit was compiled from, if recorded.
    fn source_file(&self) -> Option<&str>;

    /// Fully qualified type name, e.g. `com/example/Calc`.
    fn qualified_name(&self) -> &str;

    /// Fully qualified supertype name. `None` only for the root type.
    fn super_type_name(&self) -> Option<&str>;

    /// Methods in declaration order.
    ///
    /// Lazily parsed units may fail here.
    fn methods(&self) -> io::Result<&[Self::Method]>;
}

/// A method of a [`ClassUnit`].
pub trait MethodUnit {
    type Code: CodeBody;

    fn name(&self) -> &str;

    /// Method descriptor, e.g. `(II)I`.
    fn descriptor(&self) -> &str;

    /// Raw fields of the annotation of `kind`, if the method carries one.
    fn annotation(&self, kind: AnnotationKind) -> Option<&AnnotationValues>;

    /// The code body. Abstract, native and interface methods have none.
    fn code(&self) -> Option<&Self::Code>;
}

/// The code attribute of a method.
pub trait CodeBody {
    /// Raw bytecode.
    fn bytes(&self) -> &[u8];

    /// Line of the first instruction, from the line-number table.
    fn first_line_number(&self) -> LineNumber;

    /// Debug name of the local variable in `slot`, from the local-variable table.
    fn local_variable_name(&self, slot: usize) -> Option<&str>;

    /// Whether the body is exactly "invoke `super_type`'s default
    /// constructor, then return".
    fn is_super_init_return(&self, super_type: &str) -> bool;
}

/// Whether `method` is a default constructor that contributes nothing.
///
/// Only the exact shape `<init>()V { super.<init>(); return; }` against the
/// immediate supertype matches. Constructors with parameters or with any
/// other statement are kept.
pub fn is_default_constructor<M: MethodUnit>(method: &M, super_type: Option<&str>) -> bool {
    if method.name() != CONSTRUCTOR_NAME || method.descriptor() != DEFAULT_CONSTRUCTOR_DESCRIPTOR {
        return false;
    }
    match (method.code(), super_type) {
        (Some(code), Some(super_type)) => code.is_super_init_return(super_type),
        _ => false,
    }
}
