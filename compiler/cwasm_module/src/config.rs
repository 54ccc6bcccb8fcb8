//! Generator configuration.

/// Options for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Emit debug names for params and locals.
    pub debug_names: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { debug_names: true }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug names. Disabled, every declaration is unnamed.
    #[must_use]
    pub fn with_debug_names(mut self, enabled: bool) -> Self {
        self.debug_names = enabled;
        self
    }
}
