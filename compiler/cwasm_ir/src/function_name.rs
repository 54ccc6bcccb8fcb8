//! Function identity.
//!
//! A [`FunctionName`] names a callable across the whole module before its
//! body exists: the owning type, the member name and the descriptor. Two
//! overloads of the same member differ only in their descriptor, so all three
//! fields take part in equality and hashing.

use std::fmt;
use std::sync::Arc;

/// Stable identity of a callable unit.
///
/// Cheap to clone; the three parts are shared behind one allocation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionName(Arc<Parts>);

#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Parts {
    owner: String,
    name: String,
    descriptor: String,
}

impl FunctionName {
    /// Create an identity from owner type, member name and descriptor.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self(Arc::new(Parts {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }))
    }

    /// Parse a signature name of the form `owner.name(descriptor)`.
    ///
    /// The owner is everything before the last `.` that precedes the
    /// opening parenthesis, so owners may themselves contain dots.
    pub fn parse_signature_name(signature_name: &str) -> Option<Self> {
        let paren = signature_name.find('(')?;
        let (full_name, descriptor) = signature_name.split_at(paren);
        let dot = full_name.rfind('.')?;
        let (owner, name) = (&full_name[..dot], &full_name[dot + 1..]);
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(owner, name, descriptor))
    }

    /// The owning type, e.g. `com/example/Calc`.
    #[inline]
    pub fn owner(&self) -> &str {
        &self.0.owner
    }

    /// The member name, e.g. `add`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The method descriptor, e.g. `(II)I`.
    #[inline]
    pub fn descriptor(&self) -> &str {
        &self.0.descriptor
    }

    /// `owner.name`, shared by all overloads.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.owner(), self.name())
    }

    /// Symbol in the text output, unique across overloads.
    ///
    /// The descriptor is appended with its punctuation mapped to identifier
    /// characters: `(` and `)` become `_`, `[` becomes `@` and `;` becomes
    /// `!`. `Calc.add(II)I` becomes `Calc.add_II_I`.
    pub fn symbol(&self) -> String {
        let mut symbol = self.full_name();
        symbol.extend(self.descriptor().chars().map(|c| match c {
            '(' | ')' => '_',
            '[' => '@',
            ';' => '!',
            c => c,
        }));
        symbol
    }

    /// `owner.name(descriptor)`, unique across overloads.
    pub fn signature_name(&self) -> String {
        format!("{}.{}{}", self.owner(), self.name(), self.descriptor())
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.owner(), self.name(), self.descriptor())
    }
}

impl fmt::Debug for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionName({self})")
    }
}
