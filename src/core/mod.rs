// ============================================================================
// spark-bindings - Core Module
// Capability traits, flags, errors, diagnostics and thread-local context
// ============================================================================

pub mod constants;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use context::{
    default_sink, invalidations, recomputations, set_default_sink, with_context, BindingContext,
    BindingOptions, SinkGuard,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, NoopSink, RecordingSink, Severity, TracingSink};
pub use error::{BindingError, ComputeError, Result};
pub use types::{
    change_listener, default_equals, invalidation_listener, observable_id, same_observable,
    ChangeListener, EqualsFn, InvalidationListener, Observable, ObservableValue,
};
