// ============================================================================
// spark-bindings - Reactivity Module
// Listener aggregation and change-detection equality
// ============================================================================

pub mod equality;
pub mod helper;

pub use helper::ListenerHelper;
