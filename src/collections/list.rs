// ============================================================================
// spark-bindings - ObservableList
// A Vec that notifies its listeners on every effective mutation
// ============================================================================

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collections::ObservableCollection;
use crate::core::constants::*;
use crate::core::types::{
    default_equals, ChangeListener, InvalidationListener, Observable, ObservableValue,
};
use crate::primitives::operand::{AsDependency, ObservableHandle};
use crate::reactivity::helper::ListenerHelper;

// =============================================================================
// LIST INNER
// =============================================================================

pub struct ListInner<T> {
    items: RefCell<Vec<T>>,
    helper: ListenerHelper<Vec<T>>,
}

impl<T: Clone + PartialEq + 'static> ListInner<T> {
    fn new(items: Vec<T>) -> Self {
        Self {
            items: RefCell::new(items),
            helper: ListenerHelper::new(),
        }
    }

    /// Apply a mutation, then notify if it reports a change.
    /// The borrow is released before listeners run.
    fn mutate<R>(&self, f: impl FnOnce(&mut Vec<T>) -> (R, bool)) -> R {
        let (result, changed) = f(&mut self.items.borrow_mut());
        if changed {
            self.helper.fire(self, default_equals);
        }
        result
    }

    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }
}

impl<T: Clone + PartialEq + 'static> Observable for ListInner<T> {
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

impl<T: Clone + PartialEq + 'static> ObservableValue<Vec<T>> for ListInner<T> {
    fn value(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<Vec<T>>>) {
        self.helper.add_change_listener(listener, self);
    }

    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<Vec<T>>>) {
        self.helper.remove_change_listener(listener);
    }
}

// =============================================================================
// OBSERVABLE LIST
// =============================================================================

/// An observable, index-addressed sequence.
///
/// Handles are cheap to clone and share one list. Mutators take `&self`.
/// Listeners are notified once per mutation that actually changed the
/// contents.
///
/// # Example
///
/// ```
/// use spark_bindings::collections::ObservableList;
///
/// let items = ObservableList::new();
/// items.push("first".to_string());
/// items.push("second".to_string());
///
/// assert_eq!(items.len(), 2);
/// assert_eq!(items.get(0).as_deref(), Some("first"));
///
/// items.set(0, "updated".to_string());
/// assert_eq!(items.get(0).as_deref(), Some("updated"));
/// ```
pub struct ObservableList<T> {
    inner: Rc<ListInner<T>>,
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> ObservableList<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(ListInner::new(items)),
        }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone of the element at `index`, `None` when out of range.
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.items.borrow().get(index).cloned()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.inner.items.borrow().contains(item)
    }

    /// Borrow the contents for the duration of `f`.
    ///
    /// `f` must not mutate this list.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.inner.with(f)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.inner.value()
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    pub fn push(&self, item: T) {
        self.inner.mutate(|items| {
            items.push(item);
            ((), true)
        })
    }

    pub fn pop(&self) -> Option<T> {
        self.inner.mutate(|items| {
            let popped = items.pop();
            let changed = popped.is_some();
            (popped, changed)
        })
    }

    /// Insert at `index`, shifting later elements.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&self, index: usize, item: T) {
        self.inner.mutate(|items| {
            items.insert(index, item);
            ((), true)
        })
    }

    /// Remove and return the element at `index`; `None` if out of range.
    pub fn remove(&self, index: usize) -> Option<T> {
        self.inner.mutate(|items| {
            if index < items.len() {
                (Some(items.remove(index)), true)
            } else {
                (None, false)
            }
        })
    }

    /// Replace the element at `index`, returning the previous one.
    ///
    /// Out of range is a no-op returning `None`. Writing an equal value does
    /// not notify.
    pub fn set(&self, index: usize, item: T) -> Option<T> {
        self.inner.mutate(|items| match items.get_mut(index) {
            Some(slot) => {
                let changed = *slot != item;
                (Some(std::mem::replace(slot, item)), changed)
            }
            None => (None, false),
        })
    }

    pub fn clear(&self) {
        self.inner.mutate(|items| {
            let changed = !items.is_empty();
            items.clear();
            ((), changed)
        })
    }

    pub fn extend(&self, iter: impl IntoIterator<Item = T>) {
        self.inner.mutate(|items| {
            let before = items.len();
            items.extend(iter);
            ((), items.len() != before)
        })
    }

    pub fn retain(&self, f: impl FnMut(&T) -> bool) {
        self.inner.mutate(|items| {
            let before = items.len();
            items.retain(f);
            ((), items.len() != before)
        })
    }

    /// Replace the whole contents in one notification.
    pub fn replace_all(&self, replacement: Vec<T>) {
        self.inner.mutate(|items| {
            let changed = *items != replacement;
            *items = replacement;
            ((), changed)
        })
    }

    pub fn sort(&self)
    where
        T: Ord,
    {
        self.inner.mutate(|items| {
            let changed = !items.is_sorted();
            items.sort();
            ((), changed)
        })
    }

    // =========================================================================
    // LISTENERS
    // =========================================================================

    pub fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.inner.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.inner.remove_listener(listener);
    }

    pub fn add_change_listener(&self, listener: Rc<dyn ChangeListener<Vec<T>>>) {
        self.inner.add_change_listener(listener);
    }

    pub fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<Vec<T>>>) {
        self.inner.remove_change_listener(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.helper.invalidation_listener_count()
    }

    pub fn inner(&self) -> &Rc<ListInner<T>> {
        &self.inner
    }
}

impl<T: Clone + PartialEq + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + 'static> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.items.borrow().iter()).finish()
    }
}

impl<T: Clone + PartialEq + 'static> ObservableCollection for ObservableList<T> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Clone + PartialEq + 'static> ObservableHandle<Vec<T>> for ObservableList<T> {
    fn observable(&self) -> Rc<dyn ObservableValue<Vec<T>>> {
        self.inner.clone()
    }
}

impl<T: Clone + PartialEq + 'static> AsDependency for ObservableList<T> {
    fn as_dependency(&self) -> Rc<dyn Observable> {
        self.inner.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
