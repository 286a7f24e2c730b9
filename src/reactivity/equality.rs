// ============================================================================
// spark-bindings - Equality Functions
// Comparisons deciding whether a change listener sees a change
// ============================================================================

use std::rc::Rc;

// =============================================================================
// REFERENCE EQUALITY (object values)
// =============================================================================

/// Reference equality for shared objects: equal only if both point at the
/// same allocation. The content is never compared.
///
/// # Example
/// ```
/// use spark_bindings::reactivity::equality::rc_ptr_equals;
/// use std::rc::Rc;
///
/// let a = Rc::new(vec![1]);
/// let b = Rc::new(vec![1]);
/// assert!(rc_ptr_equals(&a, &a.clone()));
/// assert!(!rc_ptr_equals(&a, &b));
/// ```
pub fn rc_ptr_equals<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    Rc::ptr_eq(a, b)
}

/// Reference equality for nullable objects. Two `None`s are equal.
pub fn option_rc_ptr_equals<T: ?Sized>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

// =============================================================================
// SAFE EQUALITY (Handles NaN)
// =============================================================================

/// Safe equality for f64 values.
/// NaN == NaN returns true, so a NaN-valued binding does not report a
/// change every time it is invalidated.
///
/// # Example
/// ```
/// use spark_bindings::reactivity::equality::safe_equals_f64;
///
/// assert!(safe_equals_f64(&1.0, &1.0));
/// assert!(safe_equals_f64(&f64::NAN, &f64::NAN));
/// assert!(!safe_equals_f64(&f64::NAN, &1.0));
/// ```
pub fn safe_equals_f64(a: &f64, b: &f64) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    a == b
}

/// Safe equality for f32 values.
pub fn safe_equals_f32(a: &f32, b: &f32) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    a == b
}

// =============================================================================
// STRINGS
// =============================================================================

/// Case-insensitive string equality (Unicode lowercase comparison).
pub fn equals_ignore_case(a: &String, b: &String) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

// =============================================================================
// FACTORY FUNCTIONS
// =============================================================================

/// Never equal - every recomputation is reported as a change.
pub fn never_equals<T>(_a: &T, _b: &T) -> bool {
    false
}

/// Always equal - change listeners never fire.
pub fn always_equals<T>(_a: &T, _b: &T) -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EqualsFn;

    #[test]
    fn test_rc_ptr_equals_ignores_content() {
        let a = Rc::new(String::from("same"));
        let b = Rc::new(String::from("same"));
        assert!(rc_ptr_equals(&a, &a.clone()));
        assert!(!rc_ptr_equals(&a, &b));
    }

    #[test]
    fn test_option_rc_ptr_equals() {
        let a = Rc::new(1);
        assert!(option_rc_ptr_equals::<i32>(&None, &None));
        assert!(option_rc_ptr_equals(&Some(a.clone()), &Some(a.clone())));
        assert!(!option_rc_ptr_equals(&Some(a.clone()), &None));
        assert!(!option_rc_ptr_equals(&Some(a), &Some(Rc::new(1))));
    }

    #[test]
    fn test_safe_equals_nan() {
        assert!(safe_equals_f64(&f64::NAN, &f64::NAN));
        assert!(!safe_equals_f64(&1.0, &f64::NAN));
        assert!(safe_equals_f64(&-0.0, &0.0));
        assert!(safe_equals_f32(&f32::NAN, &f32::NAN));
        assert!(!safe_equals_f32(&f32::NAN, &1.0));
    }

    #[test]
    fn test_equals_ignore_case() {
        assert!(equals_ignore_case(&"Hello".to_string(), &"hELLO".to_string()));
        assert!(!equals_ignore_case(&"Hello".to_string(), &"Hello World".to_string()));
    }

    #[test]
    fn test_factories() {
        assert!(!never_equals(&1, &1));
        assert!(always_equals(&1, &2));

        let eq: EqualsFn<String> = equals_ignore_case;
        assert!(eq(&String::from("A"), &String::from("a")));
    }
}
