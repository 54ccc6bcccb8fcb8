//! Module-wide function bookkeeping.
//!
//! Tracks which functions exist in the output (declared by `prepare` or by
//! the start of a written body) and which are referenced by a call. Both sets
//! only grow. At finish every called function must have been declared.

use cwasm_diagnostic::{Result, TranslationError};
use cwasm_ir::FunctionName;
use rustc_hash::FxHashSet;

/// Declared and called functions of one generation run.
#[derive(Debug, Default)]
pub struct FunctionManager {
    declared: FxHashSet<FunctionName>,
    called: FxHashSet<FunctionName>,
}

impl FunctionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `name` exists in the output. Returns `true` the first time.
    pub fn declare(&mut self, name: &FunctionName) -> bool {
        if self.declared.contains(name) {
            return false;
        }
        self.declared.insert(name.clone())
    }

    /// Record a call to `name`. Returns `true` the first time.
    pub fn call(&mut self, name: &FunctionName) -> bool {
        if self.called.contains(name) {
            return false;
        }
        self.called.insert(name.clone())
    }

    #[inline]
    pub fn is_declared(&self, name: &FunctionName) -> bool {
        self.declared.contains(name)
    }

    #[inline]
    pub fn is_called(&self, name: &FunctionName) -> bool {
        self.called.contains(name)
    }

    #[inline]
    pub fn declared_count(&self) -> usize {
        self.declared.len()
    }

    #[inline]
    pub fn called_count(&self) -> usize {
        self.called.len()
    }

    /// Called functions that were never declared, sorted.
    pub fn unresolved(&self) -> Vec<&FunctionName> {
        let mut unresolved: Vec<_> = self.called.difference(&self.declared).collect();
        unresolved.sort();
        unresolved
    }

    /// Fail with the first unresolved call, if any.
    pub fn check_resolved(&self) -> Result<()> {
        match self.unresolved().first() {
            Some(name) => Err(TranslationError::unresolved((*name).clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;
