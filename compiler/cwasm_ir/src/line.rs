//! Source line numbers.

use std::fmt;

/// A 1-based source line, or unresolved.
///
/// Unresolved lines render as `-1`, which is how diagnostics report a
/// location that could not be attributed to a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineNumber(i32);

impl LineNumber {
    /// No line information available.
    pub const UNRESOLVED: LineNumber = LineNumber(-1);

    /// Create a resolved line number. Values beyond `i32::MAX` saturate.
    #[inline]
    pub fn new(line: u32) -> Self {
        Self(i32::try_from(line).unwrap_or(i32::MAX))
    }

    /// The line, if resolved.
    #[inline]
    pub fn get(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }

    /// The raw value, `-1` when unresolved.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_resolved(self) -> bool {
        self.0 >= 0
    }

    /// This line, or `fallback` when unresolved.
    #[inline]
    #[must_use]
    pub fn or(self, fallback: LineNumber) -> LineNumber {
        if self.is_resolved() {
            self
        } else {
            fallback
        }
    }

    /// Advance by `lines`. Unresolved stays unresolved.
    #[inline]
    #[must_use]
    pub fn offset(self, lines: u32) -> LineNumber {
        match self.get() {
            Some(line) => Self::new(line.saturating_add(lines)),
            None => self,
        }
    }
}

impl Default for LineNumber {
    fn default() -> Self {
        Self::UNRESOLVED
    }
}

impl From<u32> for LineNumber {
    fn from(line: u32) -> Self {
        Self::new(line)
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
