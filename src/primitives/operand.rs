// ============================================================================
// spark-bindings - Operands
// Constant-or-observable inputs to expression factories
// ============================================================================

use std::fmt;
use std::rc::Rc;

use crate::core::types::{observable_id, Observable, ObservableValue};

// =============================================================================
// OPERAND
// =============================================================================

/// One input of a derived expression: a fixed value or an observable.
///
/// Constants are never subscribed to and never appear among a binding's
/// dependencies.
pub enum Operand<T> {
    Constant(T),
    Observable(Rc<dyn ObservableValue<T>>),
}

impl<T: Clone + 'static> Operand<T> {
    /// Current value (pulls from the observable).
    pub fn get(&self) -> T {
        match self {
            Operand::Constant(value) => value.clone(),
            Operand::Observable(observable) => observable.value(),
        }
    }

    pub fn observable(&self) -> Option<&Rc<dyn ObservableValue<T>>> {
        match self {
            Operand::Constant(_) => None,
            Operand::Observable(observable) => Some(observable),
        }
    }

    /// The operand as a dependency, if it is observable.
    pub fn dependency(&self) -> Option<Rc<dyn Observable>> {
        self.observable()
            .map(|observable| -> Rc<dyn Observable> { observable.clone() })
    }

    /// Identity of the observable, `None` for constants.
    pub fn id(&self) -> Option<*const ()> {
        self.observable()
            .map(|observable| observable_id(&**observable))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Operand::Constant(_))
    }
}

impl<T: Clone> Clone for Operand<T> {
    fn clone(&self) -> Self {
        match self {
            Operand::Constant(value) => Operand::Constant(value.clone()),
            Operand::Observable(observable) => Operand::Observable(observable.clone()),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Operand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Operand::Observable(observable) => f
                .debug_tuple("Observable")
                .field(&observable_id(&**observable))
                .finish(),
        }
    }
}

/// Wrap any value as a constant operand.
///
/// Needed for types without a direct `IntoOperand` impl.
///
/// # Example
///
/// ```
/// use spark_bindings::{constant, when, property};
///
/// let flag = property(true);
/// let picked = when(&flag).then(constant('y')).otherwise(constant('n'));
/// assert_eq!(picked.get(), 'y');
/// ```
pub fn constant<T>(value: T) -> Operand<T> {
    Operand::Constant(value)
}

/// Collect the observable operands' dependencies, in order.
pub(crate) fn dependencies_of(
    operands: impl IntoIterator<Item = Option<Rc<dyn Observable>>>,
) -> Vec<Rc<dyn Observable>> {
    operands.into_iter().flatten().collect()
}

// =============================================================================
// CONVERSIONS
// =============================================================================

/// A handle that can hand out its observable as a readable trait object.
pub trait ObservableHandle<T> {
    fn observable(&self) -> Rc<dyn ObservableValue<T>>;
}

impl<T: 'static> ObservableHandle<T> for Rc<dyn ObservableValue<T>> {
    fn observable(&self) -> Rc<dyn ObservableValue<T>> {
        self.clone()
    }
}

/// Anything that can be a binding dependency.
pub trait AsDependency {
    fn as_dependency(&self) -> Rc<dyn Observable>;
}

impl AsDependency for Rc<dyn Observable> {
    fn as_dependency(&self) -> Rc<dyn Observable> {
        self.clone()
    }
}

impl<T: 'static> AsDependency for Rc<dyn ObservableValue<T>> {
    fn as_dependency(&self) -> Rc<dyn Observable> {
        self.clone()
    }
}

/// Conversion into an [`Operand`].
///
/// Observable handles convert by reference; the plain value types convert
/// by value into constants.
pub trait IntoOperand<T> {
    fn into_operand(self) -> Operand<T>;
}

impl<T> IntoOperand<T> for Operand<T> {
    fn into_operand(self) -> Operand<T> {
        self
    }
}

impl<T, H> IntoOperand<T> for &H
where
    H: ObservableHandle<T> + ?Sized,
{
    fn into_operand(self) -> Operand<T> {
        Operand::Observable(self.observable())
    }
}

macro_rules! constant_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoOperand<$ty> for $ty {
                fn into_operand(self) -> Operand<$ty> {
                    Operand::Constant(self)
                }
            }
        )*
    };
}

constant_operand!(bool, i32, i64, f32, f64, String);

// =============================================================================
// TESTS
// =============================================================================
