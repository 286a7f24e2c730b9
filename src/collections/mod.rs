// ============================================================================
// spark-bindings - Observable Collections
// Lists, sets and maps that invalidate their listeners on mutation
// ============================================================================
//
// Each collection is a cheap clonable handle over shared storage. A mutation
// that changes the contents fires one notification; a no-op mutation (writing
// an equal element, removing an absent key) fires nothing.
// ============================================================================

mod list;
mod map;
mod set;

pub use list::{ListInner, ObservableList};
pub use map::{MapInner, ObservableMap};
pub use set::{ObservableSet, SetInner};

use crate::primitives::operand::AsDependency;

/// A collection whose element count can be observed.
pub trait ObservableCollection: AsDependency + Clone + 'static {
    fn size(&self) -> usize;
}
