// ============================================================================
// spark-bindings - Ternary Expressions
// when(condition).then(a).otherwise(b)
// ============================================================================
//
// The builder is a typestate: `When` only offers `then`, `Then` only offers
// `otherwise`, and only `otherwise` produces a binding. A half-built
// expression cannot be read.
//
// The binding listens to the condition and to both branches, but a change of
// the inactive branch does not invalidate it.
// ============================================================================

use crate::core::constants::TERNARY;
use crate::core::context::BindingOptions;
use crate::core::types::{default_equals, observable_id, EqualsFn};
use crate::primitives::binding::{Binding, Gate};
use crate::primitives::operand::{dependencies_of, IntoOperand, Operand};

/// Start a conditional expression.
///
/// # Example
///
/// ```
/// use spark_bindings::{property, when};
///
/// let metric = property(true);
/// let km = property(1.0f64);
/// let miles = property(0.62f64);
///
/// let distance = when(&metric).then(&km).otherwise(&miles);
/// assert_eq!(distance.get(), 1.0);
///
/// metric.set(false);
/// assert_eq!(distance.get(), 0.62);
/// ```
pub fn when(condition: impl IntoOperand<bool>) -> When {
    When {
        condition: condition.into_operand(),
    }
}

/// A condition waiting for its `then` branch.
#[must_use = "a condition does nothing until `.then(..).otherwise(..)` builds the binding"]
pub struct When {
    condition: Operand<bool>,
}

impl When {
    pub fn then<T>(self, value: impl IntoOperand<T>) -> Then<T> {
        Then {
            condition: self.condition,
            then: value.into_operand(),
        }
    }
}

/// A condition and its `then` branch, waiting for `otherwise`.
#[must_use = "call `.otherwise(..)` to build the binding"]
pub struct Then<T> {
    condition: Operand<bool>,
    then: Operand<T>,
}

impl<T: Clone + Default + 'static> Then<T> {
    /// Finish the expression with the `otherwise` branch.
    pub fn otherwise(self, value: impl IntoOperand<T>) -> Binding<T>
    where
        T: PartialEq,
    {
        self.otherwise_with_equals(value, default_equals)
    }

    /// Finish the expression with a custom equality for change listeners.
    pub fn otherwise_with_equals(self, value: impl IntoOperand<T>, equals: EqualsFn<T>) -> Binding<T> {
        let condition = self.condition;
        let then = self.then;
        let otherwise = value.into_operand();

        let deps = dependencies_of([
            condition.dependency(),
            then.dependency(),
            otherwise.dependency(),
        ]);

        let condition_id = condition.id();
        let then_id = then.id();
        let otherwise_id = otherwise.id();
        let active = condition.clone();
        let gate: Gate = Box::new(move |source, valid| {
            let source = Some(observable_id(source));
            if source == condition_id {
                return true;
            }
            // Only a valid binding reads the condition to find its branch
            if !valid {
                return false;
            }
            let branch = if active.get() { then_id } else { otherwise_id };
            source == branch
        });

        Binding::from_parts(
            TERNARY,
            deps,
            move || {
                Ok(if condition.get() {
                    then.get()
                } else {
                    otherwise.get()
                })
            },
            Some(gate),
            BindingOptions::with_equals(equals),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
