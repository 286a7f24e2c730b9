// ============================================================================
// spark-bindings - Listener Helper
// Zero/one/many listener storage and ordered notification for one observable
// ============================================================================
//
// Most observables have zero or one listener. Listeners live in a
// SmallVec<[_; 1]>: no allocation for the empty and single cases, a heap array
// from the second listener on.
//
// Firing uses the collect-then-invoke pattern: the list is snapshotted and the
// borrow released before any listener runs. Listeners are therefore free to
// add or remove listeners, read values or invalidate other bindings while a
// notification is in flight. A snapshot never skips or repeats an entry.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::core::types::{rc_id, ChangeListener, EqualsFn, InvalidationListener, ObservableValue};

type InvalidationSlots = SmallVec<[Rc<dyn InvalidationListener>; 1]>;
type ChangeSlots<T> = SmallVec<[Rc<dyn ChangeListener<T>>; 1]>;

/// Listener multiplexer owned by a single observable.
pub struct ListenerHelper<T> {
    /// Invalidation listeners in registration order
    invalidation: RefCell<InvalidationSlots>,

    /// Change listeners in registration order
    change: RefCell<ChangeSlots<T>>,

    /// Last value reported to change listeners. Set while change listeners
    /// exist, so "old" in a change event is what listeners last saw.
    current: RefCell<Option<T>>,
}

impl<T> Default for ListenerHelper<T> {
    fn default() -> Self {
        Self {
            invalidation: RefCell::new(SmallVec::new()),
            change: RefCell::new(SmallVec::new()),
            current: RefCell::new(None),
        }
    }
}

impl<T: Clone + 'static> ListenerHelper<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // INVALIDATION LISTENERS
    // =========================================================================

    /// Add an invalidation listener.
    ///
    /// Stale listeners are pruned only when storage is full, which keeps
    /// the add amortized O(1).
    pub fn add_invalidation_listener(&self, listener: Rc<dyn InvalidationListener>) {
        let mut slots = self.invalidation.borrow_mut();
        if !slots.is_empty() && slots.len() == slots.capacity() {
            slots.retain(|l| !l.is_stale());
        }
        slots.push(listener);
    }

    /// Remove the first registration of `listener`; no-op if absent.
    pub fn remove_invalidation_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        let id = rc_id(listener);
        let mut slots = self.invalidation.borrow_mut();
        if let Some(pos) = slots.iter().position(|l| rc_id(l) == id) {
            slots.remove(pos);
        }
    }

    pub fn invalidation_listener_count(&self) -> usize {
        self.invalidation.borrow().len()
    }

    // =========================================================================
    // CHANGE LISTENERS
    // =========================================================================

    /// Add a change listener.
    ///
    /// The first change listener pulls the observable's current value as the
    /// baseline for later change events. For a binding this validates it.
    pub fn add_change_listener(
        &self,
        listener: Rc<dyn ChangeListener<T>>,
        observable: &dyn ObservableValue<T>,
    ) {
        if self.current.borrow().is_none() {
            // Pull before borrowing: value() may recompute and re-enter us
            let baseline = observable.value();
            *self.current.borrow_mut() = Some(baseline);
        }

        let mut slots = self.change.borrow_mut();
        if !slots.is_empty() && slots.len() == slots.capacity() {
            slots.retain(|l| !l.is_stale());
        }
        slots.push(listener);
    }

    /// Remove the first registration of `listener`; no-op if absent.
    pub fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>) {
        let id = rc_id(listener);
        let now_empty = {
            let mut slots = self.change.borrow_mut();
            if let Some(pos) = slots.iter().position(|l| rc_id(l) == id) {
                slots.remove(pos);
            }
            slots.is_empty()
        };
        if now_empty {
            self.current.borrow_mut().take();
        }
    }

    pub fn change_listener_count(&self) -> usize {
        self.change.borrow().len()
    }

    pub fn has_listeners(&self) -> bool {
        self.invalidation_listener_count() > 0 || self.change_listener_count() > 0
    }

    // =========================================================================
    // FIRE
    // =========================================================================

    /// Notify listeners that `observable` changed.
    ///
    /// Invalidation listeners run first, in registration order. Then, if any
    /// change listeners are registered, the new value is pulled and compared
    /// against the last reported value with `equals`; change listeners only
    /// run when the two differ.
    pub fn fire(&self, observable: &dyn ObservableValue<T>, equals: EqualsFn<T>) {
        let invalidation: InvalidationSlots = self.invalidation.borrow().clone();
        for listener in &invalidation {
            listener.invalidated(observable);
        }

        let change: ChangeSlots<T> = self.change.borrow().clone();
        if change.is_empty() {
            return;
        }

        let new_value = observable.value();
        let old_value = self.current.replace(Some(new_value.clone()));

        if let Some(old_value) = old_value {
            if !equals(&old_value, &new_value) {
                for listener in &change {
                    listener.changed(observable, &old_value, &new_value);
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
