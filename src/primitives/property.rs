// ============================================================================
// spark-bindings - Property Primitive
// The writable observable value at the root of every binding graph
// ============================================================================

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use std::cell::RefCell;

use crate::core::constants::*;
use crate::core::types::{
    default_equals, ChangeListener, EqualsFn, InvalidationListener, Observable, ObservableValue,
};
use crate::primitives::operand::{AsDependency, ObservableHandle};
use crate::reactivity::helper::ListenerHelper;

// =============================================================================
// PROPERTY INNER
// =============================================================================

/// The internal data for a property.
///
/// Separate from `Property<T>` so it can be shared as
/// `Rc<dyn ObservableValue<T>>` and erased to `Rc<dyn Observable>`.
pub struct PropertyInner<T> {
    /// The current value
    value: RefCell<T>,

    /// Equality function deciding whether a set is a change
    equals: EqualsFn<T>,

    /// Registered listeners
    helper: ListenerHelper<T>,
}

impl<T: Clone + 'static> PropertyInner<T> {
    /// Create a new property with a custom equality function
    pub fn new_with_equals(value: T, equals: EqualsFn<T>) -> Self {
        Self {
            value: RefCell::new(value),
            equals,
            helper: ListenerHelper::new(),
        }
    }

    /// Get the current value (cloning)
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Access the current value with a closure (avoids clone)
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Set the value, notifying listeners if it changed.
    /// Returns true if it changed.
    pub fn set(&self, value: T) -> bool {
        let changed = {
            let current = self.value.borrow();
            !(self.equals)(&current, &value)
        };

        if changed {
            *self.value.borrow_mut() = value;
            // Borrow released: listeners may read the new value
            self.helper.fire(self, self.equals);
        }

        changed
    }

    /// Mutate the value in place and notify listeners unconditionally.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut current = self.value.borrow_mut();
            f(&mut current);
        }
        self.helper.fire(self, self.equals);
    }

    /// Get the equality function
    pub fn equals_fn(&self) -> EqualsFn<T> {
        self.equals
    }

    pub fn listener_count(&self) -> usize {
        self.helper.invalidation_listener_count()
    }

    pub fn change_listener_count(&self) -> usize {
        self.helper.change_listener_count()
    }
}

impl<T: Clone + 'static> Observable for PropertyInner<T> {
    fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.helper.add_invalidation_listener(listener);
    }

    fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.helper.remove_invalidation_listener(listener);
    }

    fn flags(&self) -> u32 {
        PROPERTY | VALID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Clone + 'static> ObservableValue<T> for PropertyInner<T> {
    fn value(&self) -> T {
        self.get()
    }

    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>) {
        self.helper.add_change_listener(listener, self);
    }

    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>) {
        self.helper.remove_change_listener(listener);
    }
}

// =============================================================================
// PROPERTY<T> - The public handle
// =============================================================================

/// A writable observable value.
///
/// Properties are the sources of a binding graph. Setting a different value
/// notifies invalidation listeners, then change listeners.
///
/// # Example
///
/// ```
/// use spark_bindings::property;
///
/// let count = property(0);
/// assert_eq!(count.get(), 0);
///
/// assert!(count.set(5));
/// assert!(!count.set(5));
/// assert_eq!(count.get(), 5);
/// ```
pub struct Property<T> {
    inner: Rc<PropertyInner<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> Property<T> {
    /// Create a new property with the given initial value.
    pub fn new(value: T) -> Self
    where
        T: PartialEq,
    {
        Self::new_with_equals(value, default_equals)
    }

    /// Create a new property with a custom equality function.
    pub fn new_with_equals(value: T, equals: EqualsFn<T>) -> Self {
        Self {
            inner: Rc::new(PropertyInner::new_with_equals(value, equals)),
        }
    }

    /// Get the current value (cloning).
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Access the current value with a closure (avoids cloning).
    ///
    /// # Example
    ///
    /// ```
    /// use spark_bindings::property;
    ///
    /// let items = property(vec![1, 2, 3]);
    /// let sum = items.with(|v| v.iter().sum::<i32>());
    /// assert_eq!(sum, 6);
    /// ```
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Set the property's value.
    ///
    /// Returns true if the value changed (based on equality check).
    /// If the value didn't change, no notifications are sent.
    pub fn set(&self, value: T) -> bool {
        self.inner.set(value)
    }

    /// Update the value in place using a closure. Always notifies.
    ///
    /// # Example
    ///
    /// ```
    /// use spark_bindings::property;
    ///
    /// let count = property(0);
    /// count.update(|n| *n += 1);
    /// assert_eq!(count.get(), 1);
    /// ```
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.inner.update(f)
    }

    pub fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.inner.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.inner.remove_listener(listener);
    }

    pub fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>) {
        self.inner.add_change_listener(listener);
    }

    pub fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>) {
        self.inner.remove_change_listener(listener);
    }

    /// Number of registered invalidation listeners (bindings included).
    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }

    /// Get a reference to the inner property (for advanced use).
    pub fn inner(&self) -> &Rc<PropertyInner<T>> {
        &self.inner
    }

    /// Get the property as a type-erased readable observable.
    pub fn as_observable(&self) -> Rc<dyn ObservableValue<T>> {
        self.inner.clone()
    }
}

impl<T: Clone + 'static> ObservableHandle<T> for Property<T> {
    fn observable(&self) -> Rc<dyn ObservableValue<T>> {
        self.as_observable()
    }
}

impl<T: Clone + 'static> AsDependency for Property<T> {
    fn as_dependency(&self) -> Rc<dyn Observable> {
        self.inner.clone()
    }
}

impl<T> fmt::Debug for Property<T>
where
    T: fmt::Debug + Clone + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

// =============================================================================
// PROPERTY CREATION FUNCTIONS
// =============================================================================

/// Create a new property.
///
/// # Example
///
/// ```
/// use spark_bindings::property;
///
/// let name = property(String::from("hello"));
/// name.set(String::from("world"));
/// assert_eq!(name.get(), "world");
/// ```
pub fn property<T>(value: T) -> Property<T>
where
    T: Clone + PartialEq + 'static,
{
    Property::new(value)
}

/// Create a property with a custom equality function.
///
/// # Example
///
/// ```
/// use spark_bindings::primitives::property::property_with_equals;
///
/// // Always considers values different (always notifies)
/// let always_notify = property_with_equals(0, |_, _| false);
/// assert!(always_notify.set(0));
/// ```
pub fn property_with_equals<T>(value: T, equals: EqualsFn<T>) -> Property<T>
where
    T: Clone + 'static,
{
    Property::new_with_equals(value, equals)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{change_listener, invalidation_listener};
    use std::cell::Cell;

    #[test]
    fn property_basic_get_set() {
        let p = property(1);
        assert_eq!(p.get(), 1);

        assert!(p.set(2));
        assert_eq!(p.get(), 2);

        assert!(!p.set(2));
    }

    #[test]
    fn set_fires_invalidation_only_on_change() {
        let p = property(1);
        let hits = Rc::new(Cell::new(0));
        p.add_listener(invalidation_listener({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        }));

        p.set(1);
        assert_eq!(hits.get(), 0);

        p.set(2);
        p.set(3);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn invalidation_source_is_the_property() {
        let p = property(0);
        let seen = Rc::new(Cell::new(false));
        let id = Rc::as_ptr(p.inner()) as *const ();

        p.add_listener(invalidation_listener({
            let seen = seen.clone();
            move |source| seen.set(crate::core::types::observable_id(source) == id)
        }));

        p.set(9);
        assert!(seen.get());
    }

    #[test]
    fn change_listener_receives_old_and_new() {
        let p = property(String::from("a"));
        let log = Rc::new(RefCell::new(Vec::new()));
        p.add_change_listener(change_listener({
            let log = log.clone();
            move |_, old: &String, new: &String| log.borrow_mut().push(format!("{old}->{new}"))
        }));

        p.set("b".into());
        p.set("c".into());
        assert_eq!(*log.borrow(), vec!["a->b", "b->c"]);
    }

    #[test]
    fn update_always_notifies() {
        let p = property(vec![1]);
        let hits = Rc::new(Cell::new(0));
        p.add_listener(invalidation_listener({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        }));

        p.update(|v| v.push(2));
        assert_eq!(hits.get(), 1);
        assert_eq!(p.get(), vec![1, 2]);
    }

    #[test]
    fn listener_can_read_new_value_during_fire() {
        let p = property(1);
        let seen = Rc::new(Cell::new(0));
        p.add_listener(invalidation_listener({
            let p = p.clone();
            let seen = seen.clone();
            move |_| seen.set(p.get())
        }));

        p.set(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn heterogeneous_dependency_storage() {
        let a = property(1i32);
        let b = property(String::from("x"));
        let c = property(true);

        let deps: Vec<Rc<dyn Observable>> =
            vec![a.as_dependency(), b.as_dependency(), c.as_dependency()];

        for dep in &deps {
            assert!(dep.flags() & PROPERTY != 0);
            assert!(dep.is_valid());
            assert!(!dep.is_binding());
        }
    }

    #[test]
    fn debug_shows_value() {
        let p = property(7);
        assert_eq!(format!("{:?}", p), "Property { value: 7 }");
    }
}
