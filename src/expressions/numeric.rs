// ============================================================================
// spark-bindings - Numeric Expressions
// Arithmetic and comparison bindings across int, long, float and double
// ============================================================================
//
// Result kind rule: the wider operand wins, double > float > long > int.
// With static types this is resolved at compile time by `Promote`; `Number`
// does the same at runtime for values whose kind is only known dynamically.
//
// Integer arithmetic wraps. Integer division by zero is a computation
// failure (reported, result 0); float division follows IEEE 754.
// ============================================================================

use std::cmp::Ordering;
use std::fmt;

use crate::core::error::ComputeError;
use crate::core::types::ObservableValue;
use crate::expressions::text::convert;
use crate::primitives::binding::Binding;
use crate::primitives::operand::{dependencies_of, IntoOperand, ObservableHandle};

// =============================================================================
// NUMBER KIND
// =============================================================================

/// The four numeric kinds, ordered by promotion rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumberKind {
    Int,
    Long,
    Float,
    Double,
}

impl NumberKind {
    /// The kind an operation on `self` and `other` produces.
    pub fn widest(self, other: NumberKind) -> NumberKind {
        self.max(other)
    }

    pub fn is_integral(self) -> bool {
        matches!(self, NumberKind::Int | NumberKind::Long)
    }
}

// =============================================================================
// NUMBER (runtime-tagged)
// =============================================================================

/// A numeric value whose kind is carried at runtime.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    pub fn kind(self) -> NumberKind {
        match self {
            Number::Int(_) => NumberKind::Int,
            Number::Long(_) => NumberKind::Long,
            Number::Float(_) => NumberKind::Float,
            Number::Double(_) => NumberKind::Double,
        }
    }

    /// Convert to `kind`, with `as`-cast semantics when narrowing.
    pub fn to_kind(self, kind: NumberKind) -> Number {
        match kind {
            NumberKind::Int => Number::Int(i32::from_number(self)),
            NumberKind::Long => Number::Long(i64::from_number(self)),
            NumberKind::Float => Number::Float(f32::from_number(self)),
            NumberKind::Double => Number::Double(f64::from_number(self)),
        }
    }

    pub fn to_f64(self) -> f64 {
        f64::from_number(self)
    }

    fn promote(self, rhs: Number) -> (Number, Number) {
        let kind = self.kind().widest(rhs.kind());
        (self.to_kind(kind), rhs.to_kind(kind))
    }

    pub fn add(self, rhs: Number) -> Number {
        binary(self, rhs, i32::num_add, i64::num_add, f32::num_add, f64::num_add)
    }

    pub fn subtract(self, rhs: Number) -> Number {
        binary(self, rhs, i32::num_sub, i64::num_sub, f32::num_sub, f64::num_sub)
    }

    pub fn multiply(self, rhs: Number) -> Number {
        binary(self, rhs, i32::num_mul, i64::num_mul, f32::num_mul, f64::num_mul)
    }

    pub fn divide(self, rhs: Number) -> Result<Number, ComputeError> {
        Ok(match self.promote(rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.num_div(b)?),
            (Number::Long(a), Number::Long(b)) => Number::Long(a.num_div(b)?),
            (Number::Float(a), Number::Float(b)) => Number::Float(a.num_div(b)?),
            (a, b) => Number::Double(a.to_f64().num_div(b.to_f64())?),
        })
    }

    pub fn negate(self) -> Number {
        match self {
            Number::Int(v) => Number::Int(v.num_neg()),
            Number::Long(v) => Number::Long(v.num_neg()),
            Number::Float(v) => Number::Float(v.num_neg()),
            Number::Double(v) => Number::Double(v.num_neg()),
        }
    }
}

fn binary(
    lhs: Number,
    rhs: Number,
    int: fn(i32, i32) -> i32,
    long: fn(i64, i64) -> i64,
    float: fn(f32, f32) -> f32,
    double: fn(f64, f64) -> f64,
) -> Number {
    match lhs.promote(rhs) {
        (Number::Int(a), Number::Int(b)) => Number::Int(int(a, b)),
        (Number::Long(a), Number::Long(b)) => Number::Long(long(a, b)),
        (Number::Float(a), Number::Float(b)) => Number::Float(float(a, b)),
        (a, b) => Number::Double(double(a.to_f64(), b.to_f64())),
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        match self.promote(*other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(&b),
            (Number::Long(a), Number::Long(b)) => a.partial_cmp(&b),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => v.fmt(f),
            Number::Long(v) => v.fmt(f),
            Number::Float(v) => v.fmt(f),
            Number::Double(v) => v.fmt(f),
        }
    }
}

// =============================================================================
// NUMERIC TRAIT
// =============================================================================

/// The primitive numeric types usable in numeric expressions.
pub trait Numeric:
    Copy + Default + PartialEq + PartialOrd + fmt::Display + fmt::Debug + 'static
{
    const KIND: NumberKind;

    fn to_number(self) -> Number;
    fn from_number(n: Number) -> Self;

    fn to_f64(self) -> f64 {
        f64::from_number(self.to_number())
    }

    fn num_add(self, rhs: Self) -> Self;
    fn num_sub(self, rhs: Self) -> Self;
    fn num_mul(self, rhs: Self) -> Self;
    fn num_div(self, rhs: Self) -> Result<Self, ComputeError>;
    fn num_neg(self) -> Self;
    fn num_min(self, rhs: Self) -> Self;
    fn num_max(self, rhs: Self) -> Self;

    fn cast<U: Numeric>(self) -> U {
        U::from_number(self.to_number())
    }
}

macro_rules! from_number_body {
    ($ty:ty, $n:expr) => {
        match $n {
            Number::Int(v) => v as $ty,
            Number::Long(v) => v as $ty,
            Number::Float(v) => v as $ty,
            Number::Double(v) => v as $ty,
        }
    };
}

macro_rules! integral {
    ($ty:ty, $kind:ident) => {
        impl Numeric for $ty {
            const KIND: NumberKind = NumberKind::$kind;

            fn to_number(self) -> Number {
                Number::$kind(self)
            }

            fn from_number(n: Number) -> Self {
                from_number_body!($ty, n)
            }

            fn num_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            fn num_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            fn num_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            fn num_div(self, rhs: Self) -> Result<Self, ComputeError> {
                if rhs == 0 {
                    return Err(ComputeError::DivisionByZero);
                }
                Ok(self.wrapping_div(rhs))
            }

            fn num_neg(self) -> Self {
                self.wrapping_neg()
            }

            fn num_min(self, rhs: Self) -> Self {
                Ord::min(self, rhs)
            }

            fn num_max(self, rhs: Self) -> Self {
                Ord::max(self, rhs)
            }
        }
    };
}

macro_rules! floating {
    ($ty:ty, $kind:ident) => {
        impl Numeric for $ty {
            const KIND: NumberKind = NumberKind::$kind;

            fn to_number(self) -> Number {
                Number::$kind(self)
            }

            fn from_number(n: Number) -> Self {
                from_number_body!($ty, n)
            }

            fn num_add(self, rhs: Self) -> Self {
                self + rhs
            }

            fn num_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            fn num_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            fn num_div(self, rhs: Self) -> Result<Self, ComputeError> {
                Ok(self / rhs)
            }

            fn num_neg(self) -> Self {
                -self
            }

            // NaN is contagious, unlike f64::min
            fn num_min(self, rhs: Self) -> Self {
                if self.is_nan() || rhs.is_nan() {
                    <$ty>::NAN
                } else {
                    self.min(rhs)
                }
            }

            fn num_max(self, rhs: Self) -> Self {
                if self.is_nan() || rhs.is_nan() {
                    <$ty>::NAN
                } else {
                    self.max(rhs)
                }
            }
        }
    };
}

integral!(i32, Int);
integral!(i64, Long);
floating!(f32, Float);
floating!(f64, Double);

// =============================================================================
// PROMOTION
// =============================================================================

/// Compile-time result kind of a binary numeric operation.
pub trait Promote<Rhs: Numeric>: Numeric {
    type Output: Numeric;
}

macro_rules! promote {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(
            impl Promote<$rhs> for $lhs {
                type Output = $out;
            }
        )*
    };
}

promote! {
    i32, i32 => i32;
    i32, i64 => i64;
    i32, f32 => f32;
    i32, f64 => f64;
    i64, i32 => i64;
    i64, i64 => i64;
    i64, f32 => f32;
    i64, f64 => f64;
    f32, i32 => f32;
    f32, i64 => f32;
    f32, f32 => f32;
    f32, f64 => f64;
    f64, i32 => f64;
    f64, i64 => f64;
    f64, f32 => f64;
    f64, f64 => f64;
}

/// Shorthand for the promoted type of `A op B`.
pub type Promoted<A, B> = <A as Promote<B>>::Output;

// =============================================================================
// FACTORIES
// =============================================================================

fn arithmetic<A, B>(
    a: impl IntoOperand<A>,
    b: impl IntoOperand<B>,
    op: fn(Promoted<A, B>, Promoted<A, B>) -> Result<Promoted<A, B>, ComputeError>,
) -> Binding<Promoted<A, B>>
where
    A: Promote<B>,
    B: Numeric,
{
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || op(a.get().cast(), b.get().cast()))
}

fn comparison<A, B>(
    a: impl IntoOperand<A>,
    b: impl IntoOperand<B>,
    test: fn(Promoted<A, B>, Promoted<A, B>) -> bool,
) -> Binding<bool>
where
    A: Promote<B>,
    B: Numeric,
{
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || Ok(test(a.get().cast(), b.get().cast())))
}

/// `a + b` in the wider of the two kinds.
///
/// # Example
///
/// ```
/// use spark_bindings::{add, property};
///
/// let a = property(2i32);
/// let b = property(0.5f64);
/// let sum = add(&a, &b);
/// assert_eq!(sum.get(), 2.5);
/// ```
pub fn add<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<Promoted<A, B>>
where
    A: Promote<B>,
    B: Numeric,
{
    arithmetic(a, b, |x, y| Ok(x.num_add(y)))
}

pub fn subtract<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<Promoted<A, B>>
where
    A: Promote<B>,
    B: Numeric,
{
    arithmetic(a, b, |x, y| Ok(x.num_sub(y)))
}

pub fn multiply<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<Promoted<A, B>>
where
    A: Promote<B>,
    B: Numeric,
{
    arithmetic(a, b, |x, y| Ok(x.num_mul(y)))
}

/// `a / b`. Integer division by zero yields 0 and reports a warning.
pub fn divide<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<Promoted<A, B>>
where
    A: Promote<B>,
    B: Numeric,
{
    arithmetic(a, b, <Promoted<A, B> as Numeric>::num_div)
}

pub fn min<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<Promoted<A, B>>
where
    A: Promote<B>,
    B: Numeric,
{
    arithmetic(a, b, |x, y| Ok(x.num_min(y)))
}

pub fn max<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<Promoted<A, B>>
where
    A: Promote<B>,
    B: Numeric,
{
    arithmetic(a, b, |x, y| Ok(x.num_max(y)))
}

pub fn negate<N: Numeric>(a: impl IntoOperand<N>) -> Binding<N> {
    let a = a.into_operand();
    let deps = dependencies_of([a.dependency()]);
    Binding::derive(deps, move || Ok(a.get().num_neg()))
}

// =============================================================================
// COMPARISONS
// =============================================================================

pub fn equal<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<bool>
where
    A: Promote<B>,
    B: Numeric,
{
    comparison(a, b, |x, y| x == y)
}

pub fn not_equal<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<bool>
where
    A: Promote<B>,
    B: Numeric,
{
    comparison(a, b, |x, y| x != y)
}

/// `|a - b| <= epsilon`, compared in double precision.
pub fn equal_eps<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>, epsilon: f64) -> Binding<bool>
where
    A: Numeric,
    B: Numeric,
{
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || {
        Ok((a.get().to_f64() - b.get().to_f64()).abs() <= epsilon)
    })
}

pub fn not_equal_eps<A, B>(
    a: impl IntoOperand<A>,
    b: impl IntoOperand<B>,
    epsilon: f64,
) -> Binding<bool>
where
    A: Numeric,
    B: Numeric,
{
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || {
        Ok((a.get().to_f64() - b.get().to_f64()).abs() > epsilon)
    })
}

pub fn greater_than<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<bool>
where
    A: Promote<B>,
    B: Numeric,
{
    comparison(a, b, |x, y| x > y)
}

pub fn greater_than_or_equal<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<bool>
where
    A: Promote<B>,
    B: Numeric,
{
    comparison(a, b, |x, y| x >= y)
}

pub fn less_than<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<bool>
where
    A: Promote<B>,
    B: Numeric,
{
    comparison(a, b, |x, y| x < y)
}

pub fn less_than_or_equal<A, B>(a: impl IntoOperand<A>, b: impl IntoOperand<B>) -> Binding<bool>
where
    A: Promote<B>,
    B: Numeric,
{
    comparison(a, b, |x, y| x <= y)
}

// =============================================================================
// EXTENSION METHODS
// =============================================================================

/// Fluent numeric expressions on any numeric observable handle.
///
/// # Example
///
/// ```
/// use spark_bindings::{property, NumberExpressionExt};
///
/// let width = property(4i32);
/// let area = width.multiply(&width);
/// let big = area.greater_than(10i32);
///
/// assert!(big.get());
/// width.set(3);
/// assert!(!big.get());
/// ```
pub trait NumberExpressionExt<N: Numeric> {
    fn add<B>(&self, other: impl IntoOperand<B>) -> Binding<Promoted<N, B>>
    where
        N: Promote<B>,
        B: Numeric;

    fn subtract<B>(&self, other: impl IntoOperand<B>) -> Binding<Promoted<N, B>>
    where
        N: Promote<B>,
        B: Numeric;

    fn multiply<B>(&self, other: impl IntoOperand<B>) -> Binding<Promoted<N, B>>
    where
        N: Promote<B>,
        B: Numeric;

    fn divide<B>(&self, other: impl IntoOperand<B>) -> Binding<Promoted<N, B>>
    where
        N: Promote<B>,
        B: Numeric;

    fn negate(&self) -> Binding<N>;

    fn is_equal_to<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric;

    fn is_not_equal_to<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric;

    fn greater_than<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric;

    fn greater_than_or_equal_to<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric;

    fn less_than<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric;

    fn less_than_or_equal_to<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric;

    /// The value rendered with `Display`.
    fn as_string(&self) -> Binding<String>;

    /// The value wrapped as a nullable object.
    fn as_object(&self) -> Binding<Option<N>>;
}

impl<N, H> NumberExpressionExt<N> for H
where
    N: Numeric,
    H: ObservableHandle<N> + ?Sized,
{
    fn add<B>(&self, other: impl IntoOperand<B>) -> Binding<Promoted<N, B>>
    where
        N: Promote<B>,
        B: Numeric,
    {
        self::add::<N, B>(self, other)
    }

    fn subtract<B>(&self, other: impl IntoOperand<B>) -> Binding<Promoted<N, B>>
    where
        N: Promote<B>,
        B: Numeric,
    {
        self::subtract::<N, B>(self, other)
    }

    fn multiply<B>(&self, other: impl IntoOperand<B>) -> Binding<Promoted<N, B>>
    where
        N: Promote<B>,
        B: Numeric,
    {
        self::multiply::<N, B>(self, other)
    }

    fn divide<B>(&self, other: impl IntoOperand<B>) -> Binding<Promoted<N, B>>
    where
        N: Promote<B>,
        B: Numeric,
    {
        self::divide::<N, B>(self, other)
    }

    fn negate(&self) -> Binding<N> {
        self::negate::<N>(self)
    }

    fn is_equal_to<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric,
    {
        equal::<N, B>(self, other)
    }

    fn is_not_equal_to<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric,
    {
        not_equal::<N, B>(self, other)
    }

    fn greater_than<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric,
    {
        self::greater_than::<N, B>(self, other)
    }

    fn greater_than_or_equal_to<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric,
    {
        greater_than_or_equal::<N, B>(self, other)
    }

    fn less_than<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric,
    {
        self::less_than::<N, B>(self, other)
    }

    fn less_than_or_equal_to<B>(&self, other: impl IntoOperand<B>) -> Binding<bool>
    where
        N: Promote<B>,
        B: Numeric,
    {
        less_than_or_equal::<N, B>(self, other)
    }

    fn as_string(&self) -> Binding<String> {
        convert::<N>(self)
    }

    fn as_object(&self) -> Binding<Option<N>> {
        crate::expressions::object::as_object::<N>(self)
    }
}

/// Read a numeric observable as a runtime-tagged [`Number`].
pub fn number_of<N: Numeric>(observable: &dyn ObservableValue<N>) -> Number {
    observable.value().to_number()
}

// =============================================================================
// TESTS
// =============================================================================
