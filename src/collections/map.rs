// ============================================================================
// spark-bindings - ObservableMap
// A HashMap that notifies its listeners when an entry changes
// ============================================================================

use std::any::Any;
use std::borrow::Borrow;
use std::cell::RefCell;
use std::collections::HashMap;
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

pub struct MapInner<K, V> {
    entries: RefCell<HashMap<K, V>>,
    helper: ListenerHelper<HashMap<K, V>>,
}

impl<K, V> MapInner<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    fn notify(&self) {
        self.helper.fire(self, default_equals);
    }
}

impl<K, V> Observable for MapInner<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
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

impl<K, V> ObservableValue<HashMap<K, V>> for MapInner<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    fn value(&self) -> HashMap<K, V> {
        self.entries.borrow().clone()
    }

    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<HashMap<K, V>>>) {
        self.helper.add_change_listener(listener, self);
    }

    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<HashMap<K, V>>>) {
        self.helper.remove_change_listener(listener);
    }
}

/// An observable key-value map.
///
/// # Example
///
/// ```
/// use spark_bindings::collections::ObservableMap;
///
/// let scores = ObservableMap::new();
/// scores.insert("alice", 10);
/// assert_eq!(scores.get("alice"), Some(10));
/// assert_eq!(scores.get("bob"), None);
/// ```
pub struct ObservableMap<K, V> {
    inner: Rc<MapInner<K, V>>,
}

impl<K, V> Clone for ObservableMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    pub fn new() -> Self {
        Self::from_map(HashMap::new())
    }

    pub fn from_map(entries: HashMap<K, V>) -> Self {
        Self {
            inner: Rc::new(MapInner {
                entries: RefCell::new(entries),
                helper: ListenerHelper::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.entries.borrow().contains_key(key)
    }

    /// Clone of the value under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.entries.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<K> {
        self.inner.entries.borrow().keys().cloned().collect()
    }

    pub fn with<R>(&self, f: impl FnOnce(&HashMap<K, V>) -> R) -> R {
        f(&self.inner.entries.borrow())
    }

    pub fn to_map(&self) -> HashMap<K, V> {
        self.inner.value()
    }

    /// Insert or replace an entry, returning the previous value.
    ///
    /// Replacing a value with an equal one does not notify.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let (previous, changed) = {
            let mut entries = self.inner.entries.borrow_mut();
            let changed = entries.get(&key) != Some(&value);
            (entries.insert(key, value), changed)
        };
        if changed {
            self.inner.notify();
        }
        previous
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.inner.entries.borrow_mut().remove(key);
        if removed.is_some() {
            self.inner.notify();
        }
        removed
    }

    pub fn clear(&self) {
        let had_entries = {
            let mut entries = self.inner.entries.borrow_mut();
            let had_entries = !entries.is_empty();
            entries.clear();
            had_entries
        };
        if had_entries {
            self.inner.notify();
        }
    }

    pub fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.inner.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.inner.remove_listener(listener);
    }

    pub fn add_change_listener(&self, listener: Rc<dyn ChangeListener<HashMap<K, V>>>) {
        self.inner.add_change_listener(listener);
    }

    pub fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<HashMap<K, V>>>) {
        self.inner.remove_change_listener(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.helper.invalidation_listener_count()
    }
}

impl<K, V> Default for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ObservableMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.entries.borrow().iter()).finish()
    }
}

impl<K, V> ObservableCollection for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    fn size(&self) -> usize {
        self.len()
    }
}

impl<K, V> ObservableHandle<HashMap<K, V>> for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    fn observable(&self) -> Rc<dyn ObservableValue<HashMap<K, V>>> {
        self.inner.clone()
    }
}

impl<K, V> AsDependency for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    fn as_dependency(&self) -> Rc<dyn Observable> {
        self.inner.clone()
    }
}
