// ============================================================================
// spark-bindings - Ergonomic Macros
// ============================================================================

/// Clone handles into a move closure.
///
/// # Usage
///
/// ```rust
/// use spark_bindings::{binding, cloned, property};
///
/// let a = property(1);
/// let b = property(2);
///
/// let sum = binding(&[&a, &b], cloned!(a, b => move || a.get() + b.get()));
/// assert_eq!(sum.get(), 3);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}

/// Create a binding whose dependencies are exactly the listed handles.
///
/// Wraps `binding(&[&a, &b], cloned!(a, b => move || ...))`.
///
/// # Usage
///
/// ```rust
/// use spark_bindings::{binding, property};
///
/// let a = property(1);
/// let b = property(2);
///
/// let sum = binding!(a, b => a.get() + b.get());
/// assert_eq!(sum.get(), 3);
///
/// a.set(10);
/// assert_eq!(sum.get(), 12);
/// ```
#[macro_export]
macro_rules! binding {
    // With dependencies
    ($($deps:ident),+ => $body:expr) => {
        $crate::binding(
            &[$(&$deps as &dyn $crate::AsDependency),+],
            $crate::cloned!($($deps),+ => move || $body),
        )
    };
    // No dependencies: never invalidated by anything but `invalidate()`
    ($body:expr) => {
        $crate::binding(&[], move || $body)
    };
}

/// Like [`binding!`] for a computation returning `Result`.
///
/// ```rust
/// use spark_bindings::{property, try_binding, ComputeError};
///
/// let text = property(String::from("4"));
/// let n = try_binding!(text => text.get().parse::<i32>().map_err(ComputeError::failed));
/// assert_eq!(n.get(), 4);
/// ```
#[macro_export]
macro_rules! try_binding {
    ($($deps:ident),+ => $body:expr) => {
        $crate::try_binding(
            &[$(&$deps as &dyn $crate::AsDependency),+],
            $crate::cloned!($($deps),+ => move || $body),
        )
    };
}
