//! Collector for accumulating diagnostics during validation.
//!
//! The [`DiagnosticCollector`] lets validation report every problem in a
//! snapshot instead of stopping at the first one.

use crate::error::{Diagnostic, LoadError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(LoadError)` with all diagnostics.
    /// - Otherwise returns the collected warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, LoadError> {
        if self.has_errors {
            Err(LoadError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_empty_finish_ok() {
        let warnings = DiagnosticCollector::new().finish().unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_collector_warnings_are_returned() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::new(ErrorCode::E300, "warning 1"));
        collector.emit(Diagnostic::new(ErrorCode::E301, "warning 2"));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_collector_errors_keep_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::new(ErrorCode::E200, "error 1"));
        collector.emit(Diagnostic::new(ErrorCode::E300, "warning 1"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "error 1");
    }
}
