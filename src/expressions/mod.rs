// ============================================================================
// spark-bindings - Expressions Module
// Derived-expression factories built on the generic binding
// ============================================================================
//
// Every factory takes operands (observable handles or constants), subscribes
// to the observable ones only, and returns a lazy `Binding`.
// ============================================================================

pub mod logic;
pub mod lookup;
pub mod numeric;
pub mod object;
pub mod ternary;
pub mod text;

pub use logic::{and, boolean_equal, boolean_not_equal, not, or};
pub use lookup::{
    is_empty, is_not_empty, present_value_at, set_contains, size, value_at, value_at_key,
    value_at_key_or_default, value_at_or_default,
};
pub use numeric::{
    add, divide, equal, equal_eps, greater_than, greater_than_or_equal, less_than,
    less_than_or_equal, max, min, multiply, negate, not_equal, not_equal_eps, number_of,
    subtract, Number, NumberExpressionExt, NumberKind, Numeric, Promote, Promoted,
};
pub use object::{as_object, is_not_null, is_null, object_binding, object_equal, object_not_equal};
pub use ternary::{when, Then, When};
pub use text::{
    concat, convert, equal_ignore_case, is_empty_string, is_not_empty_string,
    not_equal_ignore_case, part, string_equal, string_greater_than, string_greater_than_or_equal,
    string_length, string_less_than, string_less_than_or_equal, string_not_equal, Part,
};
