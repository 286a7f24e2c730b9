// ============================================================================
// spark-bindings - Object Expressions
// Nullability and equality bindings over arbitrary values
// ============================================================================

use std::rc::Rc;

use crate::core::context::BindingOptions;
use crate::core::types::Observable;
use crate::primitives::binding::Binding;
use crate::primitives::operand::{dependencies_of, AsDependency, IntoOperand};
use crate::reactivity::equality::option_rc_ptr_equals;

pub fn is_null<T>(op: impl IntoOperand<Option<T>>) -> Binding<bool>
where
    T: Clone + 'static,
{
    let op = op.into_operand();
    let deps = dependencies_of([op.dependency()]);
    Binding::derive(deps, move || Ok(op.get().is_none()))
}

pub fn is_not_null<T>(op: impl IntoOperand<Option<T>>) -> Binding<bool>
where
    T: Clone + 'static,
{
    let op = op.into_operand();
    let deps = dependencies_of([op.dependency()]);
    Binding::derive(deps, move || Ok(op.get().is_some()))
}

/// Value equality (`PartialEq`) of two operands.
pub fn object_equal<T>(a: impl IntoOperand<T>, b: impl IntoOperand<T>) -> Binding<bool>
where
    T: Clone + PartialEq + 'static,
{
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || Ok(a.get() == b.get()))
}

pub fn object_not_equal<T>(a: impl IntoOperand<T>, b: impl IntoOperand<T>) -> Binding<bool>
where
    T: Clone + PartialEq + 'static,
{
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || Ok(a.get() != b.get()))
}

/// The operand's value as a nullable object (always `Some`).
pub fn as_object<T>(op: impl IntoOperand<T>) -> Binding<Option<T>>
where
    T: Clone + PartialEq + 'static,
{
    let op = op.into_operand();
    let deps = dependencies_of([op.dependency()]);
    Binding::derive(deps, move || Ok(Some(op.get())))
}

/// A binding over a shared object, compared by reference.
///
/// Change listeners fire when the computation returns a different
/// allocation, even one with equal contents.
///
/// # Example
///
/// ```
/// use spark_bindings::{object_binding, property};
/// use std::rc::Rc;
///
/// let config = Rc::new(String::from("v1"));
/// let source = property(1);
/// let current = object_binding(&[&source], {
///     let config = config.clone();
///     move || Some(config.clone())
/// });
///
/// assert!(Rc::ptr_eq(&current.get().unwrap(), &config));
/// ```
pub fn object_binding<T, F>(dependencies: &[&dyn AsDependency], f: F) -> Binding<Option<Rc<T>>>
where
    T: ?Sized + 'static,
    F: Fn() -> Option<Rc<T>> + 'static,
{
    let deps: Vec<Rc<dyn Observable>> = dependencies.iter().map(|d| d.as_dependency()).collect();
    Binding::from_parts(
        0,
        deps,
        move || Ok(f()),
        None,
        BindingOptions::with_equals(option_rc_ptr_equals),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::change_listener;
    use crate::primitives::operand::constant;
    use crate::primitives::property::property;
    use std::cell::Cell;

    #[test]
    fn nullability() {
        let slot = property(None::<String>);
        let null = is_null(&slot);
        let present = is_not_null(&slot);

        assert!(null.get());
        assert!(!present.get());

        slot.set(Some("x".into()));
        assert!(!null.get());
        assert!(present.get());

        assert!(is_null(constant(None::<u8>)).get());
    }

    #[test]
    fn equality() {
        let a = property(vec![1, 2]);
        let b = property(vec![1, 2]);
        let eq = object_equal(&a, &b);
        let ne = object_not_equal(&a, &b);

        assert!(eq.get());
        assert!(!ne.get());

        b.update(|v| v.push(3));
        assert!(!eq.get());
        assert!(ne.get());
    }

    #[test]
    fn as_object_wraps() {
        let p = property('q');
        assert_eq!(as_object(&p).get(), Some('q'));
    }

    #[test]
    fn object_binding_compares_by_reference() {
        let tick = property(0);
        let shared = Rc::new(vec![1]);
        let fresh = Rc::new(Cell::new(false));

        let obj = object_binding(&[&tick], {
            let shared = shared.clone();
            let fresh = fresh.clone();
            move || {
                if fresh.get() {
                    Some(Rc::new(vec![1]))
                } else {
                    Some(shared.clone())
                }
            }
        });

        let changes = Rc::new(Cell::new(0));
        obj.add_change_listener(change_listener({
            let changes = changes.clone();
            move |_, _: &Option<Rc<Vec<i32>>>, _: &Option<Rc<Vec<i32>>>| {
                changes.set(changes.get() + 1)
            }
        }));

        tick.set(1);
        assert_eq!(changes.get(), 0);

        fresh.set(true);
        tick.set(2);
        assert_eq!(changes.get(), 1);
    }
}
