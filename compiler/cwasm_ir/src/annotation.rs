//! Declarative method annotations.
//!
//! Units expose annotations as raw `field → value` tables. They are decoded
//! exactly once, at the boundary, into the typed bindings below; nothing past
//! the boundary looks at annotation fields by string key.

use std::fmt;

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Raw annotation fields as read from a compiled unit.
pub type AnnotationValues = FxHashMap<String, String>;

/// The annotation types the generator understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// Bind the method to a host function: `module`, optional `name`.
    Import,
    /// Export the method: optional `name`.
    Export,
    /// Replace the body with literal text code: `value`, optional `signature`.
    TextCode,
}

impl AnnotationKind {
    /// Qualified annotation type name as it appears in compiled units.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Import => "cwasm.api.annotation.Import",
            Self::Export => "cwasm.api.annotation.Export",
            Self::TextCode => "cwasm.api.annotation.TextCode",
        }
    }

    /// Short display name.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Import => "Import",
            Self::Export => "Export",
            Self::TextCode => "TextCode",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Error decoding an annotation table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("@{annotation} annotation is missing required field `{field}`")]
    MissingField {
        annotation: AnnotationKind,
        field: &'static str,
    },
}

/// Host import binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportBinding {
    pub module: String,
    pub name: String,
}

impl ImportBinding {
    /// Decode an `Import` table. `name` falls back to `method_name`.
    pub fn decode(values: &AnnotationValues, method_name: &str) -> Result<Self, AnnotationError> {
        let module = values
            .get("module")
            .ok_or(AnnotationError::MissingField {
                annotation: AnnotationKind::Import,
                field: "module",
            })?
            .clone();
        let name = values
            .get("name")
            .map_or_else(|| method_name.to_owned(), Clone::clone);
        Ok(Self { module, name })
    }
}

/// Export binding. The exported name is optional at this level; the
/// generator decides the default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportBinding {
    pub name: Option<String>,
}

impl ExportBinding {
    pub fn decode(values: &AnnotationValues) -> Self {
        Self {
            name: values.get("name").cloned(),
        }
    }

    /// The exported name, defaulting to the method's own name.
    pub fn export_name<'a>(&'a self, method_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(method_name)
    }
}

/// Literal text code replacing a method body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextCodeBody {
    /// The code text.
    pub value: String,
    /// Descriptor overriding the method's own, if supplied.
    pub signature: Option<String>,
}

impl TextCodeBody {
    pub fn decode(values: &AnnotationValues) -> Result<Self, AnnotationError> {
        let value = values
            .get("value")
            .ok_or(AnnotationError::MissingField {
                annotation: AnnotationKind::TextCode,
                field: "value",
            })?
            .clone();
        Ok(Self {
            value,
            signature: values.get("signature").cloned(),
        })
    }

    /// The descriptor to translate: the override, else `method_descriptor`.
    pub fn signature_or<'a>(&'a self, method_descriptor: &'a str) -> &'a str {
        self.signature.as_deref().unwrap_or(method_descriptor)
    }
}
