// ============================================================================
// spark-bindings - Lazy Observable Bindings for Rust
// ============================================================================
//
// Properties hold values. Bindings derive values from an explicit list of
// dependencies, compute on demand and cache until a dependency invalidates
// them. Expression factories (arithmetic, comparison, short-circuit logic,
// ternary, string and collection lookups) are all built on the one binding
// core.
// ============================================================================

pub mod collections;
pub mod core;
pub mod expressions;
pub mod primitives;
pub mod reactivity;

mod macros;

// Re-export core items at crate root
pub use crate::core::constants;
pub use crate::core::context::{
    default_sink, invalidations, recomputations, set_default_sink, with_context, BindingContext,
    BindingOptions, SinkGuard,
};
pub use crate::core::diagnostics::{
    Diagnostic, DiagnosticSink, NoopSink, RecordingSink, Severity, TracingSink,
};
pub use crate::core::error::{BindingError, ComputeError, Result};
pub use crate::core::types::{
    change_listener, default_equals, invalidation_listener, observable_id, same_observable,
    ChangeListener, EqualsFn, InvalidationListener, Observable, ObservableValue,
};

// Re-export primitives
pub use crate::primitives::binding::{
    binding, binding_with_options, try_binding, try_binding_with_options, Binding, Dependencies,
};
pub use crate::primitives::operand::{constant, AsDependency, IntoOperand, ObservableHandle, Operand};
pub use crate::primitives::property::{property, property_with_equals, Property};

// Re-export expressions
pub use crate::expressions::{
    add, and, as_object, boolean_equal, boolean_not_equal, concat, convert, divide, equal,
    equal_eps, equal_ignore_case, greater_than, greater_than_or_equal, is_empty, is_empty_string,
    is_not_empty, is_not_empty_string, is_not_null, is_null, less_than, less_than_or_equal, max,
    min, multiply, negate, not, not_equal, not_equal_eps, not_equal_ignore_case, number_of,
    object_binding, object_equal, object_not_equal, or, part, present_value_at, set_contains,
    size, string_equal, string_greater_than, string_greater_than_or_equal, string_length,
    string_less_than, string_less_than_or_equal, string_not_equal, subtract, value_at,
    value_at_key, value_at_key_or_default, value_at_or_default, when, Number,
    NumberExpressionExt, NumberKind, Numeric, Part, Promote, Promoted, Then, When,
};

// Re-export reactivity
pub use crate::reactivity::equality::{
    always_equals, equals_ignore_case, never_equals, option_rc_ptr_equals, rc_ptr_equals,
    safe_equals_f32, safe_equals_f64,
};
pub use crate::reactivity::ListenerHelper;

// Re-export collections
pub use crate::collections::{ObservableCollection, ObservableList, ObservableMap, ObservableSet};

// =============================================================================
// TESTS
// =============================================================================
