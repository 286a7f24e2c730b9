// ============================================================================
// spark-bindings - Binding Context
// Thread-local defaults and counters shared by every binding on a thread
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::diagnostics::{DiagnosticSink, TracingSink};
use super::types::{default_equals, EqualsFn};

// =============================================================================
// BINDING CONTEXT
// =============================================================================

/// Thread-local state for the binding engine.
///
/// The engine is single-threaded: every graph lives on one thread, so
/// per-thread defaults are the natural configuration scope.
pub struct BindingContext {
    /// Sink used by bindings created without an explicit one
    default_sink: RefCell<Rc<dyn DiagnosticSink>>,

    /// Total number of binding recomputations on this thread
    recomputations: Cell<u64>,

    /// Total number of effective invalidations (valid -> invalid) on this thread
    invalidations: Cell<u64>,
}

impl BindingContext {
    /// Create a new context with the tracing sink as default
    pub fn new() -> Self {
        Self {
            default_sink: RefCell::new(Rc::new(TracingSink)),
            recomputations: Cell::new(0),
            invalidations: Cell::new(0),
        }
    }

    // =========================================================================
    // DIAGNOSTICS
    // =========================================================================

    /// Get the default sink
    pub fn default_sink(&self) -> Rc<dyn DiagnosticSink> {
        self.default_sink.borrow().clone()
    }

    /// Replace the default sink, returning the previous one
    pub fn replace_default_sink(&self, sink: Rc<dyn DiagnosticSink>) -> Rc<dyn DiagnosticSink> {
        self.default_sink.replace(sink)
    }

    // =========================================================================
    // COUNTERS
    // =========================================================================

    /// Record one recomputation, returning the new total
    pub fn record_recomputation(&self) -> u64 {
        let n = self.recomputations.get() + 1;
        self.recomputations.set(n);
        n
    }

    /// Get the number of recomputations so far
    pub fn recomputations(&self) -> u64 {
        self.recomputations.get()
    }

    /// Record one invalidation, returning the new total
    pub fn record_invalidation(&self) -> u64 {
        let n = self.invalidations.get() + 1;
        self.invalidations.set(n);
        n
    }

    /// Get the number of invalidations so far
    pub fn invalidations(&self) -> u64 {
        self.invalidations.get()
    }
}

impl Default for BindingContext {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// THREAD-LOCAL ACCESS
// =============================================================================

thread_local! {
    /// The thread-local binding context
    static CONTEXT: BindingContext = BindingContext::new();
}

/// Access the thread-local binding context.
pub fn with_context<R>(f: impl FnOnce(&BindingContext) -> R) -> R {
    CONTEXT.with(f)
}

// =============================================================================
// DEFAULT SINK
// =============================================================================

/// Restores the previous default sink when dropped.
#[must_use = "the sink is uninstalled as soon as the guard is dropped"]
pub struct SinkGuard {
    previous: Option<Rc<dyn DiagnosticSink>>,
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            with_context(|ctx| ctx.replace_default_sink(previous));
        }
    }
}

/// Install a default diagnostic sink for this thread.
///
/// Only bindings created while the guard is alive pick it up; a binding
/// keeps the sink it was created with.
///
/// # Example
///
/// ```
/// use spark_bindings::{set_default_sink, RecordingSink};
/// use std::rc::Rc;
///
/// let sink = RecordingSink::new();
/// let _guard = set_default_sink(Rc::new(sink.clone()));
/// ```
pub fn set_default_sink(sink: Rc<dyn DiagnosticSink>) -> SinkGuard {
    let previous = with_context(|ctx| ctx.replace_default_sink(sink));
    SinkGuard {
        previous: Some(previous),
    }
}

/// Get the sink new bindings on this thread will use.
pub fn default_sink() -> Rc<dyn DiagnosticSink> {
    with_context(|ctx| ctx.default_sink())
}

/// Number of binding recomputations on this thread so far
pub fn recomputations() -> u64 {
    with_context(|ctx| ctx.recomputations())
}

/// Number of effective binding invalidations on this thread so far
pub fn invalidations() -> u64 {
    with_context(|ctx| ctx.invalidations())
}

// =============================================================================
// PER-BINDING OPTIONS
// =============================================================================

/// Configuration for a single binding.
///
/// `sink: None` means "the thread's default sink at creation time".
pub struct BindingOptions<T> {
    /// Decides whether a recomputed value is a change for change listeners
    pub equals: EqualsFn<T>,

    /// Where computation failures are reported
    pub sink: Option<Rc<dyn DiagnosticSink>>,
}

impl<T: PartialEq> BindingOptions<T> {
    pub fn new() -> Self {
        Self::with_equals(default_equals)
    }
}

impl<T: PartialEq> Default for BindingOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BindingOptions<T> {
    /// Options with a custom equality function and the default sink
    pub fn with_equals(equals: EqualsFn<T>) -> Self {
        Self { equals, sink: None }
    }

    /// Report failures to `sink` instead of the thread default
    pub fn sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub(crate) fn resolve_sink(&self) -> Rc<dyn DiagnosticSink> {
        match &self.sink {
            Some(sink) => sink.clone(),
            None => default_sink(),
        }
    }
}

impl<T> Clone for BindingOptions<T> {
    fn clone(&self) -> Self {
        Self {
            equals: self.equals,
            sink: self.sink.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
