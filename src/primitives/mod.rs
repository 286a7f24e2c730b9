// ============================================================================
// spark-bindings - Primitives Module
// Properties, lazy bindings and the operands expressions are built from
// ============================================================================

pub mod binding;
pub mod operand;
pub mod property;

// Re-export for convenience
pub use binding::{
    binding, binding_with_options, try_binding, try_binding_with_options, Binding, BindingInner,
    Dependencies, DependencyObserver,
};
pub use operand::{constant, AsDependency, IntoOperand, ObservableHandle, Operand};
pub use property::{property, property_with_equals, Property, PropertyInner};
