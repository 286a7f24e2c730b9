// ============================================================================
// spark-bindings - ObservableSet
// A HashSet that notifies its listeners when membership changes
// ============================================================================

use std::any::Any;
use std::borrow::Borrow;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::collections::ObservableCollection;
use crate::core::constants::*;
use crate::core::types::{
    default_equals, ChangeListener, InvalidationListener, Observable, ObservableValue,
};
use crate::primitives::operand::{AsDependency, ObservableHandle};
use crate::reactivity::helper::ListenerHelper;

pub struct SetInner<T> {
    items: RefCell<HashSet<T>>,
    helper: ListenerHelper<HashSet<T>>,
}

impl<T: Eq + Hash + Clone + 'static> SetInner<T> {
    fn notify(&self) {
        self.helper.fire(self, default_equals);
    }
}

impl<T: Eq + Hash + Clone + 'static> Observable for SetInner<T> {
    fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.helper.add_invalidation_listener(listener);
    }

    fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.helper.remove_invalidation_listener(listener);
    }

    fn flags(&self) -> u32 {
        COLLECTION | VALID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Eq + Hash + Clone + 'static> ObservableValue<HashSet<T>> for SetInner<T> {
    fn value(&self) -> HashSet<T> {
        self.items.borrow().clone()
    }

    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<HashSet<T>>>) {
        self.helper.add_change_listener(listener, self);
    }

    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<HashSet<T>>>) {
        self.helper.remove_change_listener(listener);
    }
}

/// An observable set of distinct values.
///
/// # Example
///
/// ```
/// use spark_bindings::collections::ObservableSet;
///
/// let tags = ObservableSet::new();
/// assert!(tags.insert("rust"));
/// assert!(!tags.insert("rust"));
/// assert!(tags.contains("rust"));
/// ```
pub struct ObservableSet<T> {
    inner: Rc<SetInner<T>>,
}

impl<T> Clone for ObservableSet<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Eq + Hash + Clone + 'static> ObservableSet<T> {
    pub fn new() -> Self {
        Self::from_set(HashSet::new())
    }

    pub fn from_set(items: HashSet<T>) -> Self {
        Self {
            inner: Rc::new(SetInner {
                items: RefCell::new(items),
                helper: ListenerHelper::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.items.borrow().contains(item)
    }

    pub fn with<R>(&self, f: impl FnOnce(&HashSet<T>) -> R) -> R {
        f(&self.inner.items.borrow())
    }

    pub fn to_set(&self) -> HashSet<T> {
        self.inner.value()
    }

    /// Add an item. Returns true (and notifies) if it was not present.
    pub fn insert(&self, item: T) -> bool {
        let added = self.inner.items.borrow_mut().insert(item);
        if added {
            self.inner.notify();
        }
        added
    }

    /// Remove an item. Returns true (and notifies) if it was present.
    pub fn remove<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.inner.items.borrow_mut().remove(item);
        if removed {
            self.inner.notify();
        }
        removed
    }

    pub fn clear(&self) {
        let had_items = {
            let mut items = self.inner.items.borrow_mut();
            let had_items = !items.is_empty();
            items.clear();
            had_items
        };
        if had_items {
            self.inner.notify();
        }
    }

    pub fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.inner.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.inner.remove_listener(listener);
    }

    pub fn add_change_listener(&self, listener: Rc<dyn ChangeListener<HashSet<T>>>) {
        self.inner.add_change_listener(listener);
    }

    pub fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<HashSet<T>>>) {
        self.inner.remove_change_listener(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.helper.invalidation_listener_count()
    }
}

impl<T: Eq + Hash + Clone + 'static> Default for ObservableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone + 'static> FromIterator<T> for ObservableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inner.items.borrow().iter()).finish()
    }
}

impl<T: Eq + Hash + Clone + 'static> ObservableCollection for ObservableSet<T> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Eq + Hash + Clone + 'static> ObservableHandle<HashSet<T>> for ObservableSet<T> {
    fn observable(&self) -> Rc<dyn ObservableValue<HashSet<T>>> {
        self.inner.clone()
    }
}

impl<T: Eq + Hash + Clone + 'static> AsDependency for ObservableSet<T> {
    fn as_dependency(&self) -> Rc<dyn Observable> {
        self.inner.clone()
    }
}
