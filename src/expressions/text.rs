// ============================================================================
// spark-bindings - String Expressions
// Concatenation, conversion and comparison bindings over text
// ============================================================================

use std::fmt;
use std::rc::Rc;

use crate::core::types::Observable;
use crate::primitives::binding::Binding;
use crate::primitives::operand::{dependencies_of, IntoOperand};
use crate::reactivity::equality::equals_ignore_case;

// =============================================================================
// CONCAT
// =============================================================================

/// One piece of a concatenation: literal text or a rendered observable.
pub struct Part {
    dependency: Option<Rc<dyn Observable>>,
    render: Rc<dyn Fn() -> String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            dependency: None,
            render: Rc::new(move || text.clone()),
        }
    }
}

/// Render any `Display` operand as a concatenation part.
pub fn part<T>(operand: impl IntoOperand<T>) -> Part
where
    T: fmt::Display + Clone + 'static,
{
    let operand = operand.into_operand();
    Part {
        dependency: operand.dependency(),
        render: Rc::new(move || operand.get().to_string()),
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Part::text(text)
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Part::text(text)
    }
}

/// Concatenate the rendered parts, in order. No parts yields `""`.
///
/// # Example
///
/// ```
/// use spark_bindings::{concat, part, property};
///
/// let name = property(String::from("Ada"));
/// let age = property(36);
/// let line = concat([part(&name), " is ".into(), part(&age)]);
///
/// assert_eq!(line.get(), "Ada is 36");
/// age.set(37);
/// assert_eq!(line.get(), "Ada is 37");
/// ```
pub fn concat(parts: impl IntoIterator<Item = Part>) -> Binding<String> {
    let parts: Vec<Part> = parts.into_iter().collect();
    let deps = dependencies_of(parts.iter().map(|p| p.dependency.clone()));
    Binding::derive(deps, move || {
        let mut out = String::new();
        for part in &parts {
            out.push_str(&(part.render)());
        }
        Ok(out)
    })
}

/// The operand's `Display` rendering (locale-independent).
pub fn convert<T>(operand: impl IntoOperand<T>) -> Binding<String>
where
    T: fmt::Display + Clone + 'static,
{
    let operand = operand.into_operand();
    let deps = dependencies_of([operand.dependency()]);
    Binding::derive(deps, move || Ok(operand.get().to_string()))
}

// =============================================================================
// DERIVED PROPERTIES
// =============================================================================

fn unary<R>(op: impl IntoOperand<String>, f: fn(&str) -> R) -> Binding<R>
where
    R: Clone + Default + PartialEq + 'static,
{
    let op = op.into_operand();
    let deps = dependencies_of([op.dependency()]);
    Binding::derive(deps, move || Ok(f(&op.get())))
}

/// Length in characters.
pub fn string_length(op: impl IntoOperand<String>) -> Binding<i32> {
    unary(op, |s| i32::try_from(s.chars().count()).unwrap_or(i32::MAX))
}

pub fn is_empty_string(op: impl IntoOperand<String>) -> Binding<bool> {
    unary(op, str::is_empty)
}

pub fn is_not_empty_string(op: impl IntoOperand<String>) -> Binding<bool> {
    unary(op, |s| !s.is_empty())
}

// =============================================================================
// COMPARISONS
// =============================================================================

fn compare(
    a: impl IntoOperand<String>,
    b: impl IntoOperand<String>,
    test: fn(&String, &String) -> bool,
) -> Binding<bool> {
    let a = a.into_operand();
    let b = b.into_operand();
    let deps = dependencies_of([a.dependency(), b.dependency()]);
    Binding::derive(deps, move || Ok(test(&a.get(), &b.get())))
}

pub fn string_equal(a: impl IntoOperand<String>, b: impl IntoOperand<String>) -> Binding<bool> {
    compare(a, b, |x, y| x == y)
}

pub fn string_not_equal(a: impl IntoOperand<String>, b: impl IntoOperand<String>) -> Binding<bool> {
    compare(a, b, |x, y| x != y)
}

pub fn equal_ignore_case(a: impl IntoOperand<String>, b: impl IntoOperand<String>) -> Binding<bool> {
    compare(a, b, equals_ignore_case)
}

pub fn not_equal_ignore_case(
    a: impl IntoOperand<String>,
    b: impl IntoOperand<String>,
) -> Binding<bool> {
    compare(a, b, |x, y| !equals_ignore_case(x, y))
}

/// Lexicographic comparison by code point.
pub fn string_greater_than(a: impl IntoOperand<String>, b: impl IntoOperand<String>) -> Binding<bool> {
    compare(a, b, |x, y| x > y)
}

pub fn string_greater_than_or_equal(
    a: impl IntoOperand<String>,
    b: impl IntoOperand<String>,
) -> Binding<bool> {
    compare(a, b, |x, y| x >= y)
}

pub fn string_less_than(a: impl IntoOperand<String>, b: impl IntoOperand<String>) -> Binding<bool> {
    compare(a, b, |x, y| x < y)
}

pub fn string_less_than_or_equal(
    a: impl IntoOperand<String>,
    b: impl IntoOperand<String>,
) -> Binding<bool> {
    compare(a, b, |x, y| x <= y)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::property::property;

    #[test]
    fn concat_of_nothing_is_empty() {
        let empty = concat(Vec::new());
        assert_eq!(empty.get(), "");
        assert!(empty.dependencies().is_empty());
    }

    #[test]
    fn concat_subscribes_only_to_observables() {
        let a = property(String::from("x"));
        let n = property(1.5f64);
        let joined = concat([part(&a), "-".into(), part(&n), part(&a)]);

        assert_eq!(joined.dependencies().len(), 2);
        assert_eq!(joined.get(), "x-1.5x");

        n.set(2.0);
        assert_eq!(joined.get(), "x-2x");
    }

    #[test]
    fn convert_uses_display() {
        let flag = property(true);
        let text = convert(&flag);
        assert_eq!(text.get(), "true");
        flag.set(false);
        assert_eq!(text.get(), "false");
    }

    #[test]
    fn length_and_emptiness() {
        let s = property(String::new());
        let len = string_length(&s);
        let empty = is_empty_string(&s);
        let not_empty = is_not_empty_string(&s);

        assert_eq!(len.get(), 0);
        assert!(empty.get());
        assert!(!not_empty.get());

        s.set("héllo".into());
        assert_eq!(len.get(), 5);
        assert!(!empty.get());
        assert!(not_empty.get());
    }

    #[test]
    fn case_insensitive_equality() {
        let a = property(String::from("Hello"));
        let eq = equal_ignore_case(&a, String::from("HELLO"));
        let ne = not_equal_ignore_case(&a, String::from("HELLO"));
        assert!(eq.get());
        assert!(!ne.get());

        a.set("Help".into());
        assert!(!eq.get());
        assert!(ne.get());
    }

    #[test]
    fn ordering_comparisons() {
        let a = property(String::from("apple"));
        let b = property(String::from("banana"));

        assert!(string_less_than(&a, &b).get());
        assert!(string_less_than_or_equal(&a, &a).get());
        assert!(!string_greater_than(&a, &b).get());
        assert!(string_greater_than_or_equal(&b, &a).get());
        assert!(string_not_equal(&a, &b).get());
        assert!(string_equal(&a, String::from("apple")).get());
    }
}
