// ============================================================================
// spark-bindings - Lazy Bindings
// Cached computed values invalidated by their declared dependencies
// ============================================================================
//
// A binding starts INVALID. Reading it while invalid runs the computation
// once and caches the result; further reads return the cache. An upstream
// invalidation flips it back to INVALID and notifies downstream listeners,
// but nothing is recomputed until someone reads again.
//
// The binding never registers itself with its dependencies. It registers a
// DependencyObserver that only holds a Weak back-reference, so an upstream
// observable never keeps a downstream binding alive. When the binding is
// gone, the observer detaches itself the next time it is notified.
// ============================================================================

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::core::constants::*;
use crate::core::context::{with_context, BindingOptions};
use crate::core::diagnostics::{Diagnostic, DiagnosticSink};
use crate::core::error::ComputeError;
use crate::core::types::{
    observable_id, ChangeListener, EqualsFn, InvalidationListener, Observable, ObservableValue,
};
use crate::primitives::operand::{AsDependency, ObservableHandle};
use crate::reactivity::helper::ListenerHelper;

/// Snapshot of a binding's dependencies, in declaration order.
///
/// No allocation for zero or one dependency.
pub type Dependencies = SmallVec<[Rc<dyn Observable>; 1]>;

type DependencySlots = SmallVec<[Rc<dyn Observable>; 2]>;
type Compute<T> = Box<dyn Fn() -> Result<T, ComputeError>>;

/// Invalidation filter: `(source, binding_is_valid) -> admit`.
pub(crate) type Gate = Box<dyn Fn(&dyn Observable, bool) -> bool>;

// =============================================================================
// BINDING INNER
// =============================================================================

/// The internal data for a binding.
pub struct BindingInner<T> {
    /// Flags bitmask (BINDING | kind | status)
    flags: Cell<u32>,

    /// Cached value, meaningful while VALID
    value: RefCell<T>,

    /// The computation
    compute: Compute<T>,

    /// Optional filter deciding which upstream invalidations count
    gate: Option<Gate>,

    /// Distinct dependencies, in declaration order
    dependencies: RefCell<DependencySlots>,

    /// The one listener registered with every dependency
    observer: Rc<DependencyObserver<T>>,

    /// Downstream listeners
    helper: ListenerHelper<T>,

    /// Equality for change listeners
    equals: EqualsFn<T>,

    /// Where computation failures go
    sink: Rc<dyn DiagnosticSink>,

    /// Number of times the computation ran
    recompute_count: Cell<u64>,
}

impl<T: Clone + Default + 'static> BindingInner<T> {
    fn new(
        kind: u32,
        dependencies: Vec<Rc<dyn Observable>>,
        compute: Compute<T>,
        gate: Option<Gate>,
        options: BindingOptions<T>,
    ) -> Rc<Self> {
        let mut distinct = DependencySlots::new();
        for dep in dependencies {
            let id = observable_id(&*dep);
            if !distinct.iter().any(|d| observable_id(&**d) == id) {
                distinct.push(dep);
            }
        }

        let sink = options.resolve_sink();
        let inner = Rc::new_cyclic(|weak: &Weak<Self>| Self {
            flags: Cell::new(BINDING | kind | INVALID),
            value: RefCell::new(T::default()),
            compute,
            gate,
            dependencies: RefCell::new(distinct),
            observer: DependencyObserver::new(weak.clone()),
            helper: ListenerHelper::new(),
            equals: options.equals,
            sink,
            recompute_count: Cell::new(0),
        });

        let listener = inner.listener();
        for dep in inner.dependencies.borrow().iter() {
            dep.add_listener(listener.clone());
        }

        inner
    }

    fn listener(&self) -> Rc<dyn InvalidationListener> {
        self.observer.clone()
    }

    /// Get the value, computing it first if invalid.
    pub fn get(&self) -> T {
        if self.flags.get() & VALID == 0 {
            self.recompute();
        }
        self.value.borrow().clone()
    }

    fn recompute(&self) {
        // No borrow held: the computation may read other bindings
        let value = match (self.compute)() {
            Ok(value) => value,
            Err(error) => {
                self.sink.report(&Diagnostic::for_error(error));
                T::default()
            }
        };

        *self.value.borrow_mut() = value;
        self.flags.set((self.flags.get() & STATUS_MASK) | VALID);
        self.recompute_count.set(self.recompute_count.get() + 1);
        let total = with_context(|ctx| ctx.record_recomputation());
        tracing::trace!(total, "binding recomputed");
    }

    /// Mark the cached value stale and notify listeners.
    ///
    /// Does nothing if already invalid.
    pub fn invalidate(&self) {
        let flags = self.flags.get();
        if flags & VALID == 0 {
            return;
        }

        self.flags.set((flags & STATUS_MASK) | INVALID);
        with_context(|ctx| ctx.record_invalidation());
        tracing::trace!(listeners = self.helper.invalidation_listener_count(), "binding invalidated");
        self.helper.fire(self, self.equals);
    }

    fn dependency_invalidated(&self, source: &dyn Observable) {
        if let Some(gate) = &self.gate {
            if !gate(source, self.is_valid()) {
                return;
            }
        }
        self.invalidate();
    }

    /// Subscribe to additional dependencies.
    pub fn bind(&self, dependencies: &[Rc<dyn Observable>]) {
        let listener = self.listener();
        for dep in dependencies {
            let id = observable_id(&**dep);
            let known = self
                .dependencies
                .borrow()
                .iter()
                .any(|d| observable_id(&**d) == id);
            if !known {
                dep.add_listener(listener.clone());
                self.dependencies.borrow_mut().push(dep.clone());
            }
        }
    }

    /// Stop listening to the given dependencies.
    pub fn unbind(&self, dependencies: &[Rc<dyn Observable>]) {
        let listener = self.listener();
        for dep in dependencies {
            let id = observable_id(&**dep);
            let position = self
                .dependencies
                .borrow()
                .iter()
                .position(|d| observable_id(&**d) == id);
            if let Some(position) = position {
                let removed = self.dependencies.borrow_mut().remove(position);
                removed.remove_listener(&listener);
            }
        }
    }

    /// Release every upstream subscription. Idempotent.
    pub fn dispose(&self) {
        let flags = self.flags.get();
        if flags & DISPOSED != 0 {
            return;
        }
        self.flags.set(flags | DISPOSED);

        let listener = self.listener();
        let released = std::mem::take(&mut *self.dependencies.borrow_mut());
        for dep in &released {
            dep.remove_listener(&listener);
        }
    }

    pub fn dependencies(&self) -> Dependencies {
        self.dependencies.borrow().iter().cloned().collect()
    }

    pub fn recompute_count(&self) -> u64 {
        self.recompute_count.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.flags.get() & DISPOSED != 0
    }

    pub fn listener_count(&self) -> usize {
        self.helper.invalidation_listener_count()
    }

    pub fn change_listener_count(&self) -> usize {
        self.helper.change_listener_count()
    }
}

impl<T: Clone + Default + 'static> Observable for BindingInner<T> {
    fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.helper.add_invalidation_listener(listener);
    }

    fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.helper.remove_invalidation_listener(listener);
    }

    fn flags(&self) -> u32 {
        self.flags.get()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Clone + Default + 'static> ObservableValue<T> for BindingInner<T> {
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
// DEPENDENCY OBSERVER
// =============================================================================

/// Listener a binding registers with each of its dependencies.
///
/// Holds the binding weakly. Once the binding is dropped the observer reports
/// itself stale and removes itself from whichever observable notifies it.
pub struct DependencyObserver<T> {
    binding: Weak<BindingInner<T>>,
    self_ref: Weak<DependencyObserver<T>>,
}

impl<T> DependencyObserver<T> {
    fn new(binding: Weak<BindingInner<T>>) -> Rc<Self> {
        Rc::new_cyclic(|self_ref| Self {
            binding,
            self_ref: self_ref.clone(),
        })
    }
}

impl<T: Clone + Default + 'static> InvalidationListener for DependencyObserver<T> {
    fn invalidated(&self, source: &dyn Observable) {
        match self.binding.upgrade() {
            Some(binding) => binding.dependency_invalidated(source),
            None => {
                if let Some(me) = self.self_ref.upgrade() {
                    let me: Rc<dyn InvalidationListener> = me;
                    source.remove_listener(&me);
                }
            }
        }
    }

    fn is_stale(&self) -> bool {
        self.binding.strong_count() == 0
    }
}

// =============================================================================
// BINDING<T> - The public handle
// =============================================================================

/// A lazily computed, cached value.
///
/// # Example
///
/// ```
/// use spark_bindings::{binding, property};
///
/// let a = property(2);
/// let b = property(3);
///
/// let sum = binding(&[&a, &b], {
///     let (a, b) = (a.clone(), b.clone());
///     move || a.get() + b.get()
/// });
///
/// assert!(!sum.is_valid());
/// assert_eq!(sum.get(), 5);
///
/// a.set(10);
/// assert!(!sum.is_valid());
/// assert_eq!(sum.get(), 13);
/// ```
pub struct Binding<T> {
    inner: Rc<BindingInner<T>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Default + 'static> Binding<T> {
    /// Build a binding from already-erased parts.
    pub(crate) fn from_parts(
        kind: u32,
        dependencies: Vec<Rc<dyn Observable>>,
        compute: impl Fn() -> Result<T, ComputeError> + 'static,
        gate: Option<Gate>,
        options: BindingOptions<T>,
    ) -> Self {
        Self {
            inner: BindingInner::new(kind, dependencies, Box::new(compute), gate, options),
        }
    }

    /// Plain binding over erased dependencies with default options.
    pub(crate) fn derive(
        dependencies: Vec<Rc<dyn Observable>>,
        compute: impl Fn() -> Result<T, ComputeError> + 'static,
    ) -> Self
    where
        T: PartialEq,
    {
        Self::from_parts(0, dependencies, compute, None, BindingOptions::new())
    }

    /// Get the current value, recomputing if invalid.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Mark the binding invalid and notify listeners (no-op when invalid).
    pub fn invalidate(&self) {
        self.inner.invalidate()
    }

    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    /// The distinct observables this binding listens to.
    pub fn dependencies(&self) -> Dependencies {
        self.inner.dependencies()
    }

    /// Start listening to more observables.
    ///
    /// The cached value is kept; the new dependencies only take effect from
    /// their next invalidation.
    pub fn bind(&self, dependencies: &[&dyn AsDependency]) {
        let deps: Vec<_> = dependencies.iter().map(|d| d.as_dependency()).collect();
        self.inner.bind(&deps);
    }

    /// Stop listening to the given observables.
    pub fn unbind(&self, dependencies: &[&dyn AsDependency]) {
        let deps: Vec<_> = dependencies.iter().map(|d| d.as_dependency()).collect();
        self.inner.unbind(&deps);
    }

    /// Unsubscribe from all dependencies. The last value stays readable.
    pub fn dispose(&self) {
        self.inner.dispose()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// How many times the computation has run.
    pub fn recompute_count(&self) -> u64 {
        self.inner.recompute_count()
    }

    pub fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.inner.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.inner.remove_listener(listener);
    }

    /// Register a change listener. The first one validates the binding.
    pub fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>) {
        self.inner.add_change_listener(listener);
    }

    pub fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>) {
        self.inner.remove_change_listener(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }

    pub fn flags(&self) -> u32 {
        self.inner.flags()
    }

    pub fn inner(&self) -> &Rc<BindingInner<T>> {
        &self.inner
    }

    pub fn as_observable(&self) -> Rc<dyn ObservableValue<T>> {
        self.inner.clone()
    }
}

impl<T: Clone + Default + 'static> ObservableHandle<T> for Binding<T> {
    fn observable(&self) -> Rc<dyn ObservableValue<T>> {
        self.as_observable()
    }
}

impl<T: Clone + Default + 'static> AsDependency for Binding<T> {
    fn as_dependency(&self) -> Rc<dyn Observable> {
        self.inner.clone()
    }
}

impl<T> fmt::Debug for Binding<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // An invalid binding has no current value to show
        let valid = self.inner.flags.get() & VALID != 0;
        let mut out = f.debug_struct("Binding");
        out.field("valid", &valid);
        if valid {
            out.field("value", &self.inner.value.borrow());
        }
        out.finish()
    }
}

// =============================================================================
// BINDING CREATION FUNCTIONS
// =============================================================================

fn erase(dependencies: &[&dyn AsDependency]) -> Vec<Rc<dyn Observable>> {
    dependencies.iter().map(|d| d.as_dependency()).collect()
}

/// Create a binding over `dependencies` computed by `f`.
///
/// `f` is not called until the first read.
pub fn binding<T, F>(dependencies: &[&dyn AsDependency], f: F) -> Binding<T>
where
    T: Clone + Default + PartialEq + 'static,
    F: Fn() -> T + 'static,
{
    binding_with_options(dependencies, f, BindingOptions::new())
}

/// Create a binding whose computation can fail.
///
/// On failure the error is reported to the diagnostic sink and the binding
/// holds `T::default()` until its next recomputation.
///
/// # Example
///
/// ```
/// use spark_bindings::{try_binding, property};
///
/// let text = property(String::from("12"));
/// let parsed = try_binding(&[&text], {
///     let text = text.clone();
///     move || text.get().parse::<i32>().map_err(spark_bindings::ComputeError::failed)
/// });
///
/// assert_eq!(parsed.get(), 12);
/// text.set("twelve".into());
/// assert_eq!(parsed.get(), 0);
/// ```
pub fn try_binding<T, E, F>(dependencies: &[&dyn AsDependency], f: F) -> Binding<T>
where
    T: Clone + Default + PartialEq + 'static,
    E: Into<ComputeError>,
    F: Fn() -> Result<T, E> + 'static,
{
    try_binding_with_options(dependencies, f, BindingOptions::new())
}

/// Create a binding with explicit equality and diagnostic sink.
pub fn binding_with_options<T, F>(
    dependencies: &[&dyn AsDependency],
    f: F,
    options: BindingOptions<T>,
) -> Binding<T>
where
    T: Clone + Default + 'static,
    F: Fn() -> T + 'static,
{
    Binding::from_parts(0, erase(dependencies), move || Ok(f()), None, options)
}

/// Fallible variant of [`binding_with_options`].
pub fn try_binding_with_options<T, E, F>(
    dependencies: &[&dyn AsDependency],
    f: F,
    options: BindingOptions<T>,
) -> Binding<T>
where
    T: Clone + Default + 'static,
    E: Into<ComputeError>,
    F: Fn() -> Result<T, E> + 'static,
{
    Binding::from_parts(
        0,
        erase(dependencies),
        move || f().map_err(Into::into),
        None,
        options,
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::{RecordingSink, Severity};
    use crate::core::types::{change_listener, invalidation_listener};
    use crate::primitives::property::{property, Property};

    fn sum_of(a: &Property<i32>, b: &Property<i32>) -> Binding<i32> {
        binding(&[a, b], {
            let (a, b) = (a.clone(), b.clone());
            move || a.get() + b.get()
        })
    }

    fn counter() -> (Rc<Cell<u32>>, Rc<dyn InvalidationListener>) {
        let hits = Rc::new(Cell::new(0));
        let listener = invalidation_listener({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        });
        (hits, listener)
    }

    #[test]
    fn construction_does_not_compute() {
        let ran = Rc::new(Cell::new(false));
        let b = binding(&[], {
            let ran = ran.clone();
            move || {
                ran.set(true);
                1
            }
        });

        assert!(!ran.get());
        assert!(!b.is_valid());
        assert_eq!(b.recompute_count(), 0);
    }

    #[test]
    fn get_caches_until_invalidated() {
        let a = property(1);
        let b = property(2);
        let sum = sum_of(&a, &b);

        assert_eq!(sum.get(), 3);
        assert_eq!(sum.get(), 3);
        assert_eq!(sum.recompute_count(), 1);
        assert!(sum.is_valid());

        a.set(5);
        assert!(!sum.is_valid());
        assert_eq!(sum.recompute_count(), 1);

        b.set(8);
        assert_eq!(sum.get(), 13);
        assert_eq!(sum.recompute_count(), 2);
    }

    #[test]
    fn invalidate_is_idempotent() {
        let a = property(1);
        let doubled = binding(&[&a], {
            let a = a.clone();
            move || a.get() * 2
        });
        let (hits, listener) = counter();
        doubled.add_listener(listener);

        // Starts invalid: nothing to announce
        doubled.invalidate();
        assert_eq!(hits.get(), 0);

        doubled.get();
        doubled.invalidate();
        doubled.invalidate();
        assert_eq!(hits.get(), 1);

        // Still invalid: upstream changes are absorbed
        a.set(2);
        a.set(3);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn duplicate_dependencies_register_once() {
        let x = property(4);
        let squared = binding(&[&x, &x], {
            let x = x.clone();
            move || x.get() * x.get()
        });

        assert_eq!(squared.dependencies().len(), 1);
        assert_eq!(x.listener_count(), 1);
        assert_eq!(squared.get(), 16);
    }

    #[test]
    fn dependencies_are_ordered() {
        let a = property(1);
        let b = property(2);
        let c = property(3);
        let total = binding(&[&a, &b, &c], {
            let (a, b, c) = (a.clone(), b.clone(), c.clone());
            move || a.get() + b.get() + c.get()
        });

        let ids: Vec<_> = total
            .dependencies()
            .iter()
            .map(|d| observable_id(&**d))
            .collect();
        let expected: Vec<_> = [a.as_dependency(), b.as_dependency(), c.as_dependency()]
            .iter()
            .map(|d| observable_id(&**d))
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn chained_bindings_propagate_lazily() {
        let a = property(1);
        let plus_one = binding(&[&a], {
            let a = a.clone();
            move || a.get() + 1
        });
        let times_ten = binding(&[&plus_one], {
            let plus_one = plus_one.clone();
            move || plus_one.get() * 10
        });

        assert_eq!(times_ten.get(), 20);
        a.set(4);
        assert!(!plus_one.is_valid());
        assert!(!times_ten.is_valid());
        assert_eq!(times_ten.get(), 50);
        assert_eq!(plus_one.recompute_count(), 2);
    }

    #[test]
    fn failure_reports_and_yields_default() {
        let sink = RecordingSink::new();
        let input = property(String::from("7"));
        let parsed = try_binding_with_options(
            &[&input],
            {
                let input = input.clone();
                move || input.get().parse::<i32>().map_err(ComputeError::failed)
            },
            BindingOptions::new().sink(Rc::new(sink.clone())),
        );

        assert_eq!(parsed.get(), 7);
        assert!(sink.is_empty());

        input.set("seven".into());
        assert_eq!(parsed.get(), 0);
        assert!(parsed.is_valid());

        let records = sink.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Warning);
    }

    #[test]
    fn first_change_listener_validates() {
        let a = property(1);
        let b = property(1);
        let sum = sum_of(&a, &b);

        let seen = Rc::new(RefCell::new(Vec::new()));
        sum.add_change_listener(change_listener({
            let seen = seen.clone();
            move |_, old: &i32, new: &i32| seen.borrow_mut().push((*old, *new))
        }));
        assert!(sum.is_valid());
        assert_eq!(sum.recompute_count(), 1);

        a.set(2);
        // Change listeners pull the new value right away
        assert!(sum.is_valid());
        assert_eq!(*seen.borrow(), vec![(2, 3)]);

        a.set(1);
        b.set(2);
        assert_eq!(*seen.borrow(), vec![(2, 3), (3, 2), (2, 3)]);
    }

    #[test]
    fn recompute_to_same_value_is_not_a_change() {
        let a = property(-2);
        let squared = binding(&[&a], {
            let a = a.clone();
            move || a.get() * a.get()
        });
        let hits = Rc::new(Cell::new(0));
        squared.add_change_listener(change_listener({
            let hits = hits.clone();
            move |_, _: &i32, _: &i32| hits.set(hits.get() + 1)
        }));

        a.set(2);
        assert_eq!(hits.get(), 0);
        assert_eq!(squared.recompute_count(), 2);

        a.set(3);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn custom_equality_controls_change_events() {
        let a = property(1);
        let parity = binding_with_options(
            &[&a],
            {
                let a = a.clone();
                move || a.get()
            },
            BindingOptions::<i32>::with_equals(|x, y| x % 2 == y % 2),
        );
        let hits = Rc::new(Cell::new(0));
        parity.add_change_listener(change_listener({
            let hits = hits.clone();
            move |_, _: &i32, _: &i32| hits.set(hits.get() + 1)
        }));

        a.set(3);
        assert_eq!(hits.get(), 0);
        a.set(4);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dispose_detaches_from_dependencies() {
        let a = property(1);
        let b = property(2);
        let sum = sum_of(&a, &b);
        sum.get();

        sum.dispose();
        sum.dispose();
        assert!(sum.is_disposed());
        assert_eq!(a.listener_count(), 0);
        assert_eq!(b.listener_count(), 0);
        assert!(sum.dependencies().is_empty());

        a.set(100);
        assert!(sum.is_valid());
        assert_eq!(sum.get(), 3);
    }

    #[test]
    fn bind_and_unbind_manage_subscriptions() {
        let a = property(1);
        let extra = property(0);
        let b = binding(&[&a], {
            let a = a.clone();
            move || a.get()
        });
        b.get();

        b.bind(&[&extra]);
        b.bind(&[&extra]);
        assert_eq!(extra.listener_count(), 1);
        assert_eq!(b.dependencies().len(), 2);

        extra.set(1);
        assert!(!b.is_valid());
        b.get();

        b.unbind(&[&extra]);
        assert_eq!(extra.listener_count(), 0);
        extra.set(2);
        assert!(b.is_valid());

        // Unbinding something never bound is a no-op
        b.unbind(&[&extra]);
        assert_eq!(b.dependencies().len(), 1);
    }

    #[test]
    fn dropped_binding_detaches_on_next_notification() {
        let a = property(1);
        {
            let doubled = binding(&[&a], {
                let a = a.clone();
                move || a.get() * 2
            });
            doubled.get();
            assert_eq!(a.listener_count(), 1);
        }

        // The observer is still registered until the property fires
        assert_eq!(a.listener_count(), 1);
        a.set(2);
        assert_eq!(a.listener_count(), 0);
    }

    #[test]
    fn stale_observers_are_pruned_on_add() {
        let a = property(1);
        for _ in 0..4 {
            let b = binding(&[&a], {
                let a = a.clone();
                move || a.get()
            });
            drop(b);
        }
        // Pruning keeps the slot count from growing with dead observers
        assert!(a.listener_count() < 4);
    }

    #[test]
    fn invalidation_listener_sees_binding_as_source() {
        let a = property(1);
        let b = binding(&[&a], {
            let a = a.clone();
            move || a.get()
        });
        let id = observable_id(&**b.inner());
        let matched = Rc::new(Cell::new(false));
        b.add_listener(invalidation_listener({
            let matched = matched.clone();
            move |source| matched.set(observable_id(source) == id)
        }));

        b.get();
        a.set(2);
        assert!(matched.get());
    }

    #[test]
    fn debug_reports_validity() {
        let b = binding(&[], || 5);
        assert_eq!(format!("{:?}", b), "Binding { valid: false, value: 0 }");
        b.get();
        assert_eq!(format!("{:?}", b), "Binding { valid: true, value: 5 }");
    }

    #[test]
    fn debug_shows_value_only_while_valid() {
        let a = property(2);
        let doubled = binding(&[&a], {
            let a = a.clone();
            move || a.get() * 2
        });
        assert_eq!(format!("{doubled:?}"), "Binding { valid: false }");

        doubled.get();
        assert_eq!(format!("{doubled:?}"), "Binding { valid: true, value: 4 }");

        a.set(3);
        assert_eq!(format!("{doubled:?}"), "Binding { valid: false }");
    }
}
