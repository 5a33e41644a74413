//! Builder configuration.

/// Configuration for a dictionary build.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DictConfig {
    /// Maximum number of diagnostics kept (0 = unlimited). Diagnostics past
    /// the limit are counted in `ParseOutput::suppressed_diagnostics`.
    pub diagnostic_limit: usize,
    /// Emit a `tracing` warning for every kept diagnostic.
    pub log_diagnostics: bool,
}

impl Default for DictConfig {
    fn default() -> Self {
        DictConfig {
            diagnostic_limit: 100,
            log_diagnostics: true,
        }
    }
}

impl DictConfig {
    /// Keep every diagnostic.
    pub fn unlimited() -> Self {
        DictConfig {
            diagnostic_limit: 0,
            ..Self::default()
        }
    }

    /// Keep diagnostics but never log them (for callers that render their own).
    pub fn quiet() -> Self {
        DictConfig {
            log_diagnostics: false,
            ..Self::default()
        }
    }

    /// Override the diagnostic limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.diagnostic_limit = limit;
        self
    }
}
