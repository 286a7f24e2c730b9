// ============================================================================
// spark-bindings - Type Definitions
// Capability traits for the observable graph
// ============================================================================

use std::any::Any;
use std::rc::Rc;

use super::constants::*;

// =============================================================================
// CAPABILITY TRAITS
// =============================================================================
//
// Two independent capabilities:
// - Observable: can be watched for invalidation (no payload)
// - ObservableValue<T>: can be read on demand and watched for value change
//
// Graph wiring only needs Observable, so a binding stores its dependencies as
// Vec<Rc<dyn Observable>> regardless of their value types. Only reading
// needs T.
// =============================================================================

/// Something that can be watched for invalidation.
///
/// Implemented by properties, bindings and observable collections.
pub trait Observable: Any {
    /// Register an invalidation listener.
    ///
    /// The same listener may be registered more than once; it is then
    /// invoked once per registration.
    fn add_listener(&self, listener: Rc<dyn InvalidationListener>);

    /// Remove one registration of an invalidation listener.
    /// Removing a listener that was never added is a no-op.
    fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>);

    /// Get the flags bitmask (kind + validity)
    fn flags(&self) -> u32;

    /// Check if this observable is a lazily computed binding
    fn is_binding(&self) -> bool {
        self.flags() & BINDING != 0
    }

    /// Check if the current value is up to date
    fn is_valid(&self) -> bool {
        self.flags() & VALID != 0
    }

    /// Upcast to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// An observable that can be read and watched for value changes.
pub trait ObservableValue<T>: Observable {
    /// Pull the current value.
    ///
    /// For bindings this may trigger a recomputation.
    fn value(&self) -> T;

    /// Register a change listener.
    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>);

    /// Remove one registration of a change listener (no-op when absent).
    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>);
}

// =============================================================================
// LISTENERS
// =============================================================================

/// Receives the fact that an observable became invalid.
pub trait InvalidationListener {
    /// Called with the observable that was invalidated.
    fn invalidated(&self, source: &dyn Observable);

    /// True once this listener can never do anything useful again (for
    /// example a weak listener whose owner was dropped). Listener
    /// containers prune stale listeners.
    fn is_stale(&self) -> bool {
        false
    }
}

impl<F> InvalidationListener for F
where
    F: Fn(&dyn Observable),
{
    fn invalidated(&self, source: &dyn Observable) {
        self(source)
    }
}

/// Receives old and new value whenever an observable's value changed.
pub trait ChangeListener<T> {
    /// Called with the observable, the previously reported value and the
    /// new value. Only called when the two differ.
    fn changed(&self, observable: &dyn ObservableValue<T>, old: &T, new: &T);

    /// See [`InvalidationListener::is_stale`].
    fn is_stale(&self) -> bool {
        false
    }
}

impl<T, F> ChangeListener<T> for F
where
    F: Fn(&dyn ObservableValue<T>, &T, &T),
{
    fn changed(&self, observable: &dyn ObservableValue<T>, old: &T, new: &T) {
        self(observable, old, new)
    }
}

/// Wrap a closure as a shareable invalidation listener.
///
/// Keep the returned `Rc` to remove the listener later.
pub fn invalidation_listener<F>(f: F) -> Rc<dyn InvalidationListener>
where
    F: Fn(&dyn Observable) + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as a shareable change listener.
pub fn change_listener<T, F>(f: F) -> Rc<dyn ChangeListener<T>>
where
    T: 'static,
    F: Fn(&dyn ObservableValue<T>, &T, &T) + 'static,
{
    Rc::new(f)
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Identity of an observable: the address of its data.
///
/// Two handles sharing one allocation have the same id, whatever trait
/// object they were erased to.
pub fn observable_id(observable: &dyn Observable) -> *const () {
    observable as *const dyn Observable as *const ()
}

/// Compare two observables by identity.
pub fn same_observable(a: &dyn Observable, b: &dyn Observable) -> bool {
    observable_id(a) == observable_id(b)
}

/// Identity of a listener allocation (ignores the vtable).
pub(crate) fn rc_id<L: ?Sized>(rc: &Rc<L>) -> *const () {
    Rc::as_ptr(rc) as *const ()
}

// =============================================================================
// EQUALITY
// =============================================================================

/// Equality function type for comparing observable values
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Default equality using PartialEq
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Dummy {
        flags: Cell<u32>,
    }

    impl Observable for Dummy {
        fn add_listener(&self, _listener: Rc<dyn InvalidationListener>) {}
        fn remove_listener(&self, _listener: &Rc<dyn InvalidationListener>) {}
        fn flags(&self) -> u32 {
            self.flags.get()
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn identity_survives_type_erasure() {
        let dummy = Rc::new(Dummy {
            flags: Cell::new(PROPERTY | VALID),
        });
        let erased: Rc<dyn Observable> = dummy.clone();

        assert!(same_observable(&*dummy, &*erased));
        assert_eq!(observable_id(&*erased), rc_id(&dummy));

        let other = Dummy {
            flags: Cell::new(PROPERTY | VALID),
        };
        assert!(!same_observable(&*dummy, &other));
    }

    #[test]
    fn flag_helpers() {
        let dummy = Dummy {
            flags: Cell::new(BINDING | INVALID),
        };
        assert!(dummy.is_binding());
        assert!(!dummy.is_valid());

        dummy.flags.set(PROPERTY | VALID);
        assert!(!dummy.is_binding());
        assert!(dummy.is_valid());
    }

    #[test]
    fn closures_are_listeners() {
        let hits = Rc::new(Cell::new(0));
        let listener = invalidation_listener({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        });
        let dummy = Dummy {
            flags: Cell::new(PROPERTY),
        };

        listener.invalidated(&dummy);
        listener.invalidated(&dummy);
        assert_eq!(hits.get(), 2);
        assert!(!listener.is_stale());
    }

    #[test]
    fn downcast_through_as_any() {
        let erased: Rc<dyn Observable> = Rc::new(Dummy {
            flags: Cell::new(PROPERTY),
        });
        assert!(erased.as_any().downcast_ref::<Dummy>().is_some());
    }
}
