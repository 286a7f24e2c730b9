// ============================================================================
// spark-bindings - Collection Lookups
// Size, element and membership bindings over observable collections
// ============================================================================
//
// Lookups depend on the collection and, when observable, on the index or key.
// A lookup that cannot be satisfied at computation time yields the default
// value; whether that is reported depends on the lookup:
//
//   value_at            out of range        -> None, warning
//   present_value_at    out of range        -> default, warning
//                       absent element      -> default, info
//   value_at_key        missing key         -> None, silent
//   value_at_key_or_default  missing key    -> default, info
//
// A constant negative index is rejected when the binding is built.
// ============================================================================

use std::fmt;
use std::hash::Hash;

use crate::collections::{ObservableCollection, ObservableList, ObservableMap, ObservableSet};
use crate::core::error::{BindingError, ComputeError, Result};
use crate::primitives::binding::Binding;
use crate::primitives::operand::{dependencies_of, AsDependency, IntoOperand, Operand};

// =============================================================================
// SIZE
// =============================================================================

fn count<C: ObservableCollection>(collection: &C) -> i32 {
    i32::try_from(collection.size()).unwrap_or(i32::MAX)
}

/// Number of elements, re-evaluated on every mutation.
pub fn size<C: ObservableCollection>(collection: &C) -> Binding<i32> {
    let c = collection.clone();
    Binding::derive(vec![collection.as_dependency()], move || Ok(count(&c)))
}

pub fn is_empty<C: ObservableCollection>(collection: &C) -> Binding<bool> {
    let c = collection.clone();
    Binding::derive(vec![collection.as_dependency()], move || Ok(c.size() == 0))
}

pub fn is_not_empty<C: ObservableCollection>(collection: &C) -> Binding<bool> {
    let c = collection.clone();
    Binding::derive(vec![collection.as_dependency()], move || Ok(c.size() != 0))
}

// =============================================================================
// LIST ELEMENTS
// =============================================================================

fn checked_index(index: Operand<i32>) -> Result<Operand<i32>> {
    if let Operand::Constant(i) = index {
        if i < 0 {
            return Err(BindingError::NegativeIndex { index: i64::from(i) });
        }
    }
    Ok(index)
}

fn element<T: Clone + PartialEq + 'static>(
    list: &ObservableList<T>,
    index: i32,
) -> std::result::Result<T, ComputeError> {
    let len = list.len();
    usize::try_from(index)
        .ok()
        .and_then(|i| list.get(i))
        .ok_or(ComputeError::IndexOutOfBounds {
            index: i64::from(index),
            len,
        })
}

/// The element at `index`, `None` while the index is out of range.
///
/// # Errors
///
/// [`BindingError::NegativeIndex`] if `index` is a negative constant.
///
/// # Example
///
/// ```
/// use spark_bindings::{collections::ObservableList, value_at};
///
/// let list = ObservableList::from_vec(vec!["a".to_string()]);
/// let second = value_at(&list, 1).unwrap();
///
/// assert_eq!(second.get(), None);
/// list.push("b".to_string());
/// assert_eq!(second.get().as_deref(), Some("b"));
/// ```
pub fn value_at<T>(list: &ObservableList<T>, index: impl IntoOperand<i32>) -> Result<Binding<Option<T>>>
where
    T: Clone + PartialEq + 'static,
{
    let index = checked_index(index.into_operand())?;
    let deps = dependencies_of([Some(list.as_dependency()), index.dependency()]);
    let list = list.clone();
    Ok(Binding::derive(deps, move || {
        element(&list, index.get()).map(Some)
    }))
}

/// Like [`value_at`], yielding `T::default()` instead of `None`.
pub fn value_at_or_default<T>(list: &ObservableList<T>, index: impl IntoOperand<i32>) -> Result<Binding<T>>
where
    T: Clone + Default + PartialEq + 'static,
{
    let index = checked_index(index.into_operand())?;
    let deps = dependencies_of([Some(list.as_dependency()), index.dependency()]);
    let list = list.clone();
    Ok(Binding::derive(deps, move || element(&list, index.get())))
}

/// The value held at `index` of a list of optional values.
///
/// An absent value is reported at info level and read as `T::default()`.
pub fn present_value_at<T>(
    list: &ObservableList<Option<T>>,
    index: impl IntoOperand<i32>,
) -> Result<Binding<T>>
where
    T: Clone + Default + PartialEq + 'static,
{
    let index = checked_index(index.into_operand())?;
    let deps = dependencies_of([Some(list.as_dependency()), index.dependency()]);
    let list = list.clone();
    Ok(Binding::derive(deps, move || {
        let i = index.get();
        element(&list, i)?.ok_or(ComputeError::NullElement { index: i64::from(i) })
    }))
}

// =============================================================================
// MAP ENTRIES
// =============================================================================

/// The value under `key`, `None` while the key is absent.
///
/// # Example
///
/// ```
/// use spark_bindings::{collections::ObservableMap, value_at_key};
///
/// let prices = ObservableMap::new();
/// let tea = value_at_key(&prices, String::from("tea"));
///
/// assert_eq!(tea.get(), None);
/// prices.insert(String::from("tea"), 3);
/// assert_eq!(tea.get(), Some(3));
/// ```
pub fn value_at_key<K, V>(map: &ObservableMap<K, V>, key: impl IntoOperand<K>) -> Binding<Option<V>>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    let key = key.into_operand();
    let deps = dependencies_of([Some(map.as_dependency()), key.dependency()]);
    let map = map.clone();
    Binding::derive(deps, move || Ok(map.get(&key.get())))
}

/// Like [`value_at_key`], yielding `V::default()` for a missing key and
/// reporting it at info level.
pub fn value_at_key_or_default<K, V>(map: &ObservableMap<K, V>, key: impl IntoOperand<K>) -> Binding<V>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Clone + Default + PartialEq + 'static,
{
    let key = key.into_operand();
    let deps = dependencies_of([Some(map.as_dependency()), key.dependency()]);
    let map = map.clone();
    Binding::derive(deps, move || {
        let key = key.get();
        map.get(&key).ok_or_else(|| ComputeError::MissingKey {
            key: format!("{key:?}"),
        })
    })
}

// =============================================================================
// SET MEMBERSHIP
// =============================================================================

pub fn set_contains<T>(set: &ObservableSet<T>, item: impl IntoOperand<T>) -> Binding<bool>
where
    T: Eq + Hash + Clone + 'static,
{
    let item = item.into_operand();
    let deps = dependencies_of([Some(set.as_dependency()), item.dependency()]);
    let set = set.clone();
    Binding::derive(deps, move || Ok(set.contains(&item.get())))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::set_default_sink;
    use crate::core::diagnostics::{RecordingSink, Severity};
    use crate::primitives::property::property;
    use std::rc::Rc;

    fn recording() -> (RecordingSink, crate::core::context::SinkGuard) {
        let sink = RecordingSink::new();
        let guard = set_default_sink(Rc::new(sink.clone()));
        (sink, guard)
    }

    #[test]
    fn size_follows_mutations() {
        let list = ObservableList::from_vec(vec![1, 2]);
        let n = size(&list);
        let empty = is_empty(&list);
        let not_empty = is_not_empty(&list);

        assert_eq!(n.get(), 2);
        assert!(!empty.get());
        assert!(not_empty.get());

        list.clear();
        assert_eq!(n.get(), 0);
        assert!(empty.get());
        assert!(!not_empty.get());

        let set: ObservableSet<u8> = [1, 2, 3].into_iter().collect();
        let map: ObservableMap<u8, u8> = [(1, 1)].into_iter().collect();
        assert_eq!(size(&set).get(), 3);
        assert_eq!(size(&map).get(), 1);
    }

    #[test]
    fn negative_constant_index_is_rejected() {
        let list = ObservableList::from_vec(vec![1]);
        assert_eq!(
            value_at(&list, -1).err(),
            Some(BindingError::NegativeIndex { index: -1 })
        );
        assert!(value_at_or_default(&list, -5).is_err());
        assert_eq!(list.listener_count(), 0);
    }

    #[test]
    fn out_of_range_reports_warning_then_recovers() {
        let (sink, _guard) = recording();
        let list = ObservableList::from_vec(vec![10, 20]);
        let third = value_at(&list, 2).unwrap();

        assert_eq!(third.get(), None);
        let records = sink.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Warning);
        assert_eq!(
            records[0].error,
            ComputeError::IndexOutOfBounds { index: 2, len: 2 }
        );

        list.push(30);
        assert_eq!(third.get(), Some(30));
        assert!(sink.is_empty());
    }

    #[test]
    fn observable_index() {
        let (sink, _guard) = recording();
        let list = ObservableList::from_vec(vec!['a', 'b', 'c']);
        let i = property(0i32);
        let at = value_at_or_default(&list, &i).unwrap();

        assert_eq!(at.dependencies().len(), 2);
        assert_eq!(at.get(), 'a');
        i.set(2);
        assert_eq!(at.get(), 'c');

        i.set(-1);
        assert_eq!(at.get(), char::default());
        assert_eq!(sink.take()[0].severity, Severity::Warning);
    }

    #[test]
    fn absent_element_is_info() {
        let (sink, _guard) = recording();
        let list = ObservableList::from_vec(vec![Some(5), None]);
        let first = present_value_at(&list, 0).unwrap();
        let second = present_value_at(&list, 1).unwrap();

        assert_eq!(first.get(), 5);
        assert_eq!(second.get(), 0);
        let records = sink.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Info);
        assert_eq!(records[0].error, ComputeError::NullElement { index: 1 });
    }

    #[test]
    fn map_lookups() {
        let (sink, _guard) = recording();
        let map: ObservableMap<String, i32> = ObservableMap::new();
        let key = property(String::from("a"));
        let maybe = value_at_key(&map, &key);
        let or_zero = value_at_key_or_default(&map, &key);

        assert_eq!(maybe.get(), None);
        assert!(sink.is_empty());
        assert_eq!(or_zero.get(), 0);
        let records = sink.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Info);

        map.insert("a".into(), 1);
        map.insert("b".into(), 2);
        assert_eq!(maybe.get(), Some(1));
        key.set("b".into());
        assert_eq!(or_zero.get(), 2);
    }

    #[test]
    fn set_membership() {
        let set = ObservableSet::new();
        let probe = property(3u32);
        let has = set_contains(&set, &probe);

        assert!(!has.get());
        set.insert(3);
        assert!(has.get());
        probe.set(4);
        assert!(!has.get());
    }
}
