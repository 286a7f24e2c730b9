// ============================================================================
// spark-bindings - Constants
// Flag constants for observable kinds and binding validity
// ============================================================================

// =============================================================================
// KIND FLAGS
// =============================================================================

/// Writable source value (a property)
pub const PROPERTY: u32 = 1 << 0;

/// Lazily computed binding
pub const BINDING: u32 = 1 << 1;

/// Binding whose invalidation is filtered by a short-circuit gate (and/or)
pub const SHORT_CIRCUIT: u32 = 1 << 2;

/// Binding whose invalidation follows the active branch of a condition
pub const TERNARY: u32 = 1 << 3;

/// Observable collection (list, set, map)
pub const COLLECTION: u32 = 1 << 4;

// =============================================================================
// STATE FLAGS
// =============================================================================

/// Cached value matches the current upstream state
pub const VALID: u32 = 1 << 10;

/// Cached value is stale or unset; next read recomputes
pub const INVALID: u32 = 1 << 11;

/// Binding released its upstream subscriptions
pub const DISPOSED: u32 = 1 << 12;

// =============================================================================
// STATUS MASK
// =============================================================================

/// Mask to clear the validity bits (VALID, INVALID)
pub const STATUS_MASK: u32 = !(VALID | INVALID);

// =============================================================================
// TESTS
// =============================================================================
