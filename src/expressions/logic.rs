// ============================================================================
// spark-bindings - Boolean Expressions
// Short-circuit AND/OR plus negation and equality over booleans
// ============================================================================
//
// `and`/`or` subscribe to both operands but filter what they hear. While the
// first operand already decides the result (false for AND, true for OR), a
// change of the second operand cannot change the result, so it does not
// invalidate the binding. Evaluation short-circuits the same way.
// ============================================================================

use crate::core::constants::SHORT_CIRCUIT;
use crate::core::context::BindingOptions;
use crate::core::types::observable_id;
use crate::primitives::binding::{Binding, Gate};
use crate::primitives::operand::{dependencies_of, IntoOperand, Operand};

fn short_circuit(op1: Operand<bool>, op2: Operand<bool>, decisive: bool) -> Binding<bool> {
    let deps = dependencies_of([op1.dependency(), op2.dependency()]);

    let first = op1.clone();
    let first_id = op1.id();
    // Admit anything from op1; admit op2 only while op1 leaves the result open
    let gate: Gate = Box::new(move |source, valid| {
        Some(observable_id(source)) == first_id || (valid && first.get() != decisive)
    });

    Binding::from_parts(
        SHORT_CIRCUIT,
        deps,
        move || {
            let lhs = op1.get();
            Ok(if lhs == decisive { decisive } else { op2.get() })
        },
        Some(gate),
        BindingOptions::new(),
    )
}

/// Short-circuit conjunction.
///
/// `op2` is neither read nor listened to while `op1` is false.
///
/// # Example
///
/// ```
/// use spark_bindings::{and, property};
///
/// let a = property(false);
/// let b = property(true);
/// let both = and(&a, &b);
///
/// assert!(!both.get());
/// b.set(false);
/// assert!(both.is_valid());
///
/// a.set(true);
/// b.set(true);
/// assert!(both.get());
/// ```
pub fn and(op1: impl IntoOperand<bool>, op2: impl IntoOperand<bool>) -> Binding<bool> {
    short_circuit(op1.into_operand(), op2.into_operand(), false)
}

/// Short-circuit disjunction. `op2` is ignored while `op1` is true.
pub fn or(op1: impl IntoOperand<bool>, op2: impl IntoOperand<bool>) -> Binding<bool> {
    short_circuit(op1.into_operand(), op2.into_operand(), true)
}

pub fn not(op: impl IntoOperand<bool>) -> Binding<bool> {
    let op = op.into_operand();
    let deps = dependencies_of([op.dependency()]);
    Binding::derive(deps, move || Ok(!op.get()))
}

pub fn boolean_equal(a: impl IntoOperand<bool>, b: impl IntoOperand<bool>) -> Binding<bool> {
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || Ok(a.get() == b.get()))
}

pub fn boolean_not_equal(a: impl IntoOperand<bool>, b: impl IntoOperand<bool>) -> Binding<bool> {
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || Ok(a.get() != b.get()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{BINDING, SHORT_CIRCUIT};
    use crate::core::types::invalidation_listener;
    use crate::primitives::binding::binding;
    use crate::primitives::property::property;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn and_truth_table() {
        for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
            let a = property(x);
            let b = property(y);
            assert_eq!(and(&a, &b).get(), x && y);
            assert_eq!(or(&a, &b).get(), x || y);
        }
    }

    #[test]
    fn and_ignores_second_operand_while_first_is_false() {
        let a = property(false);
        let b = property(false);
        let both = and(&a, &b);
        let hits = Rc::new(Cell::new(0));
        both.add_listener(invalidation_listener({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        }));

        assert!(!both.get());
        b.set(true);
        b.set(false);
        assert!(both.is_valid());
        assert_eq!(hits.get(), 0);

        a.set(true);
        assert_eq!(hits.get(), 1);
        assert!(!both.get());

        b.set(true);
        assert_eq!(hits.get(), 2);
        assert!(both.get());
    }

    #[test]
    fn or_ignores_second_operand_while_first_is_true() {
        let a = property(true);
        let b = property(false);
        let either = or(&a, &b);

        assert!(either.get());
        b.set(true);
        assert!(either.is_valid());

        a.set(false);
        assert!(!either.is_valid());
        assert!(either.get());
        b.set(false);
        assert!(!either.is_valid());
        assert!(!either.get());
    }

    #[test]
    fn second_operand_not_evaluated_when_decided() {
        let a = property(false);
        let reads = Rc::new(Cell::new(0));
        let b = binding(&[], {
            let reads = reads.clone();
            move || {
                reads.set(reads.get() + 1);
                true
            }
        });

        let both = and(&a, &b);
        assert!(!both.get());
        assert_eq!(reads.get(), 0);

        a.set(true);
        assert!(both.get());
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn subscribes_to_both_and_disposes_both() {
        let a = property(true);
        let b = property(true);
        let both = and(&a, &b);

        assert_eq!(both.flags() & (BINDING | SHORT_CIRCUIT), BINDING | SHORT_CIRCUIT);
        assert_eq!(a.listener_count(), 1);
        assert_eq!(b.listener_count(), 1);

        both.dispose();
        assert_eq!(a.listener_count(), 0);
        assert_eq!(b.listener_count(), 0);
    }

    #[test]
    fn same_operand_twice() {
        let a = property(true);
        let both = and(&a, &a);
        assert_eq!(both.dependencies().len(), 1);
        assert!(both.get());
        a.set(false);
        assert!(!both.get());
    }

    #[test]
    fn negation_and_equality() {
        let a = property(true);
        let b = property(false);
        let na = not(&a);
        let eq = boolean_equal(&a, &b);
        let ne = boolean_not_equal(&a, &b);

        assert!(!na.get());
        assert!(!eq.get());
        assert!(ne.get());

        b.set(true);
        assert!(eq.get());
        assert!(!ne.get());
        assert!(not(false).get());
    }
}
