use spark_bindings::{
    binding, change_listener, cloned, concat, constant, convert, part, property, string_length,
    try_binding, when, ComputeError, NumberExpressionExt, RecordingSink, Severity,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn ergonomic_cloned_macro() {
    let a = property(10);
    let b = property(20);

    // Without the macro
    let _sum_manual = binding(&[&a, &b], {
        let a = a.clone();
        let b = b.clone();
        move || a.get() + b.get()
    });

    let sum = binding(&[&a, &b], cloned!(a, b => move || a.get() + b.get()));
    assert_eq!(sum.get(), 30);

    a.set(15);
    assert_eq!(sum.get(), 35);
}

#[test]
fn binding_macro_lists_dependencies_once() {
    let first = property(String::from("Ada"));
    let last = property(String::from("Lovelace"));

    let full = binding!(first, last => format!("{} {}", first.get(), last.get()));
    assert_eq!(full.dependencies().len(), 2);
    assert_eq!(full.get(), "Ada Lovelace");

    last.set(String::from("Byron"));
    assert_eq!(full.get(), "Ada Byron");
}

#[test]
fn binding_macro_without_dependencies() {
    let answer = binding!(6 * 7);
    assert!(answer.dependencies().is_empty());
    assert_eq!(answer.get(), 42);
}

#[test]
fn try_binding_macro_recovers_after_failure() {
    let sink = RecordingSink::new();
    let _guard = spark_bindings::set_default_sink(Rc::new(sink.clone()));

    let text = property(String::from("12"));
    let n = try_binding!(text => text.get().trim().parse::<i32>().map_err(ComputeError::failed));

    assert_eq!(n.get(), 12);
    text.set(String::from("twelve"));
    assert_eq!(n.get(), 0);
    assert_eq!(sink.records()[0].severity, Severity::Warning);

    text.set(String::from(" 7 "));
    assert_eq!(n.get(), 7);
    assert_eq!(sink.len(), 1);
}

#[test]
fn fluent_number_expressions() {
    let width = property(4i32);
    let height = property(2.5f64);

    let area = width.multiply(&height);
    let big = area.greater_than_or_equal_to(10i64);

    assert_eq!(area.get(), 10.0);
    assert!(big.get());

    width.set(3);
    assert_eq!(area.get(), 7.5);
    assert!(!big.get());
}

#[test]
fn mixing_constants_and_observables() {
    let count = property(1i32);
    let plural = count.is_not_equal_to(1i32);
    let suffix = when(&plural)
        .then(constant(String::from("s")))
        .otherwise(String::new());
    let label = concat([part(&count), " item".into(), part(&suffix)]);

    assert_eq!(label.get(), "1 item");
    count.set(3);
    assert_eq!(label.get(), "3 items");

    let width = string_length(&label);
    assert_eq!(width.get(), 7);
}

#[test]
fn convert_renders_with_display() {
    let ratio = property(0.5f64);
    let text = convert(&ratio);
    assert_eq!(text.get(), "0.5");
    ratio.set(2.0);
    assert_eq!(text.get(), "2");
}

#[test]
fn change_listener_on_a_fluent_chain() {
    let celsius = property(20.0f64);
    let fahrenheit = celsius.multiply(9.0f64).divide(5.0f64).add(32i32);
    let seen = Rc::new(RefCell::new(Vec::new()));
    fahrenheit.add_change_listener(change_listener({
        let seen = seen.clone();
        move |_, old: &f64, new: &f64| seen.borrow_mut().push((*old, *new))
    }));

    celsius.set(20.0);
    assert!(seen.borrow().is_empty(), "same value is not a change");

    celsius.set(100.0);
    assert_eq!(*seen.borrow(), vec![(68.0, 212.0)]);
}
