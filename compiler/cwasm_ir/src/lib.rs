//! cwasm IR - shared vocabulary of the module generator
//!
//! This crate holds the value-level types every other cwasm crate speaks:
//! - [`ValueType`]: the stack machine's primitive value kinds
//! - [`MethodDescriptor`]: validated `(<params>)<result>` descriptors
//! - [`FunctionName`]: the (owner, name, descriptor) identity of a callable
//! - [`Instruction`]: target instructions tagged with their source line
//! - Typed annotation bindings decoded from raw annotation tables
//!
//! Everything here is pure data; nothing performs I/O.

mod annotation;
mod descriptor;
mod function_name;
mod instruction;
mod line;
mod value_type;

pub use annotation::{
    AnnotationError, AnnotationKind, AnnotationValues, ExportBinding, ImportBinding, TextCodeBody,
};
pub use descriptor::{DescriptorError, MethodDescriptor};
pub use function_name::FunctionName;
pub use instruction::{Constant, InstrKind, Instruction, NumericOp};
pub use line::LineNumber;
pub use value_type::ValueType;
