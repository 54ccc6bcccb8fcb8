//! Method descriptor scanning.
//!
//! A method descriptor encodes the parameter and result types of a callable
//! as `(<params>)<result>`, for example `(IJ)D` or `(Ljava/lang/String;)V`.
//!
//! [`MethodDescriptor::parse`] validates the structure once and splits the
//! descriptor into borrowed type fragments. Mapping a fragment to a target
//! value type is the job of [`ValueType::from_fragment`](crate::ValueType::from_fragment).
//!
//! # Fragment grammar
//!
//! ```text
//! fragment  := base | object | array
//! base      := 'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z' | 'V'
//! object    := 'L' <internal name> ';'
//! array     := '[' fragment        (element must not be 'V')
//! ```

use std::fmt;

use thiserror::Error;

/// Error raised for a malformed or unsupported method descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor does not start with `(`.
    #[error("method descriptor `{descriptor}` does not start with `(`")]
    MissingOpenParen { descriptor: String },
    /// The parameter list is never closed.
    #[error("method descriptor `{descriptor}` has no closing `)`")]
    MissingCloseParen { descriptor: String },
    /// Nothing follows the closing parenthesis.
    #[error("method descriptor `{descriptor}` has no result type")]
    MissingResult { descriptor: String },
    /// More than one fragment follows the closing parenthesis.
    #[error("method descriptor `{descriptor}` has trailing characters after its result type")]
    TrailingCharacters { descriptor: String },
    /// An unknown type character or an unterminated object/array fragment.
    #[error("malformed type at offset {offset} in method descriptor `{descriptor}`")]
    MalformedType { descriptor: String, offset: usize },
    /// `V` used as a parameter type.
    #[error("`void` is not a valid parameter type in method descriptor `{descriptor}`")]
    VoidParameter { descriptor: String },
    /// A well-formed type that has no value type in the target format.
    #[error("not supported data type in method signature: {type_name}")]
    UnsupportedType { type_name: String },
}

/// A structurally valid method descriptor, split into type fragments.
///
/// Fragments borrow from the original descriptor string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor<'a> {
    source: &'a str,
    params: Vec<&'a str>,
    result: &'a str,
}

impl<'a> MethodDescriptor<'a> {
    /// Parse and validate a method descriptor.
    pub fn parse(descriptor: &'a str) -> Result<Self, DescriptorError> {
        let bytes = descriptor.as_bytes();
        if bytes.first() != Some(&b'(') {
            return Err(DescriptorError::MissingOpenParen {
                descriptor: descriptor.to_owned(),
            });
        }

        let mut params = Vec::new();
        let mut pos = 1;
        loop {
            match bytes.get(pos) {
                None => {
                    return Err(DescriptorError::MissingCloseParen {
                        descriptor: descriptor.to_owned(),
                    });
                }
                Some(b')') => {
                    pos += 1;
                    break;
                }
                Some(b'V') => {
                    return Err(DescriptorError::VoidParameter {
                        descriptor: descriptor.to_owned(),
                    });
                }
                Some(_) => {
                    let len = fragment_len(bytes, pos).ok_or_else(|| malformed(descriptor, pos))?;
                    params.push(&descriptor[pos..pos + len]);
                    pos += len;
                }
            }
        }

        if pos >= bytes.len() {
            return Err(DescriptorError::MissingResult {
                descriptor: descriptor.to_owned(),
            });
        }
        let len = fragment_len(bytes, pos).ok_or_else(|| malformed(descriptor, pos))?;
        if pos + len != bytes.len() {
            return Err(DescriptorError::TrailingCharacters {
                descriptor: descriptor.to_owned(),
            });
        }

        Ok(Self {
            source: descriptor,
            params,
            result: &descriptor[pos..],
        })
    }

    /// The descriptor text this was parsed from.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.source
    }

    /// Parameter fragments in declaration order.
    #[inline]
    pub fn params(&self) -> &[&'a str] {
        &self.params
    }

    /// The single result fragment (`V` for void).
    #[inline]
    pub fn result(&self) -> &'a str {
        self.result
    }

    /// Whether the result position carries a value.
    #[inline]
    pub fn returns_value(&self) -> bool {
        self.result != "V"
    }
}

impl fmt::Display for MethodDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source)
    }
}

/// Length of the type fragment starting at `start`, or `None` if malformed.
fn fragment_len(bytes: &[u8], start: usize) -> Option<usize> {
    match *bytes.get(start)? {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b'V' => Some(1),
        b'L' => {
            let semi = bytes[start..].iter().position(|&b| b == b';')?;
            // `L;` names no type
            (semi > 1).then_some(semi + 1)
        }
        b'[' => {
            if bytes.get(start + 1) == Some(&b'V') {
                return None;
            }
            fragment_len(bytes, start + 1).map(|len| len + 1)
        }
        _ => None,
    }
}

fn malformed(descriptor: &str, offset: usize) -> DescriptorError {
    DescriptorError::MalformedType {
        descriptor: descriptor.to_owned(),
        offset,
    }
}
