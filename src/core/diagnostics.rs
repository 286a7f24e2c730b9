// ============================================================================
// spark-bindings - Diagnostics
// Injected sink for failures that bindings absorb instead of propagating
// ============================================================================
//
// A binding whose computation fails caches a default value and keeps going.
// The failure still has to be visible somewhere: it goes to a DiagnosticSink.
// The default sink forwards to `tracing`; tests install a RecordingSink and
// assert on what was reported.
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::error::ComputeError;

/// How loudly a diagnostic should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

/// A computation failure that was replaced by a default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub error: ComputeError,
}

impl Diagnostic {
    pub fn new(severity: Severity, error: ComputeError) -> Self {
        Self { severity, error }
    }

    /// Pick the severity for a failure.
    ///
    /// Absent keys and elements are routine for lookups into collections
    /// that change underneath the binding, so they are informational.
    pub fn for_error(error: ComputeError) -> Self {
        let severity = match error {
            ComputeError::MissingKey { .. } | ComputeError::NullElement { .. } => Severity::Info,
            _ => Severity::Warning,
        };
        Self { severity, error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
        };
        write!(f, "{level}: {}", self.error)
    }
}

// =============================================================================
// SINKS
// =============================================================================

/// Destination for diagnostics.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing`. This is the default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(
                error = %diagnostic.error,
                "binding computation failed, using default value"
            ),
            Severity::Info => tracing::info!(
                error = %diagnostic.error,
                "binding lookup missed, using default value"
            ),
        }
    }
}

/// Drops every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Collects diagnostics in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    records: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Remove and return everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.borrow_mut())
    }

    /// Shorthand for tests: forget everything reported so far.
    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.records.borrow_mut().push(diagnostic.clone());
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_policy() {
        let d = Diagnostic::for_error(ComputeError::IndexOutOfBounds { index: 4, len: 2 });
        assert_eq!(d.severity, Severity::Warning);

        let d = Diagnostic::for_error(ComputeError::MissingKey { key: "a".into() });
        assert_eq!(d.severity, Severity::Info);

        let d = Diagnostic::for_error(ComputeError::DivisionByZero);
        assert_eq!(d.severity, Severity::Warning);
    }

    #[test]
    fn recording_sink_clones_share_buffer() {
        let sink = RecordingSink::new();
        let clone = sink.clone();

        clone.report(&Diagnostic::for_error(ComputeError::DivisionByZero));
        assert_eq!(sink.len(), 1);

        let taken = sink.take();
        assert_eq!(taken.len(), 1);
        assert!(clone.is_empty());
    }

    #[test]
    fn display_includes_level() {
        let d = Diagnostic::for_error(ComputeError::DivisionByZero);
        assert_eq!(d.to_string(), "WARNING: division by zero");
    }

    #[test]
    fn noop_and_tracing_sinks_accept_reports() {
        let d = Diagnostic::for_error(ComputeError::Failed("boom".into()));
        NoopSink.report(&d);
        TracingSink.report(&d);
    }
}
