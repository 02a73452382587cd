use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use jsondata::{JsonArray, JsonValue};
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        (-1.0e6..1.0e6f64).prop_map(JsonValue::Double),
        (-1000i32..1000).prop_map(JsonValue::from),
        "[a-z0-9 ]{0,8}".prop_map(JsonValue::from),
    ]
}

fn value() -> impl Strategy<Value = JsonValue> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|items| JsonValue::from(JsonArray::from(items)))
    })
}

fn array() -> impl Strategy<Value = JsonArray> {
    prop::collection::vec(value(), 0..8).prop_map(JsonArray::from)
}

/// An array together with an index in `0..=len`.
fn array_and_slot() -> impl Strategy<Value = (JsonArray, usize)> {
    array().prop_flat_map(|a| {
        let len = a.len();
        (Just(a), 0..=len)
    })
}

/// A non-empty array together with an index in `0..len`.
fn array_and_index() -> impl Strategy<Value = (JsonArray, usize)> {
    prop::collection::vec(value(), 1..8).prop_flat_map(|items| {
        let len = items.len();
        (Just(JsonArray::from(items)), 0..len)
    })
}

fn hash_of(a: &JsonArray) -> u64 {
    let mut h = DefaultHasher::new();
    a.hash(&mut h);
    h.finish()
}

proptest! {
    #[test]
    fn equality_is_reflexive_and_symmetric(a in array(), b in array()) {
        prop_assert_eq!(&a, &a);
        prop_assert_eq!(&a, &a.clone());
        prop_assert_eq!(a == b, b == a);
        prop_assert_eq!(a == b, a.to_vec() == b.to_vec());
    }

    #[test]
    fn equality_is_transitive(a in array()) {
        let b = JsonArray::from(a.to_vec());
        let c: JsonArray = a.iter().cloned().collect();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&b, &c);
        prop_assert_eq!(&a, &c);
    }

    #[test]
    fn equal_arrays_hash_equally(a in array()) {
        let rebuilt = JsonArray::from(a.to_vec());
        prop_assert_eq!(hash_of(&a), hash_of(&rebuilt));
        prop_assert_eq!(hash_of(&a), hash_of(&a.clone()));
    }

    #[test]
    fn mutating_a_copy_never_changes_the_original((a, i) in array_and_slot(), v in value(), op in 0u8..5) {
        let snapshot = a.to_vec();
        let mut copy = a.clone();
        match op {
            0 => copy.insert(i, v),
            1 => copy.remove_at(i),
            2 => { copy.take_at(i); }
            3 => if i < copy.len() { copy.replace(i, v) },
            _ => copy.append(v),
        }
        prop_assert_eq!(a.to_vec(), snapshot);
    }

    #[test]
    fn insert_then_at_returns_value((a, i) in array_and_slot(), v in value()) {
        let mut a = a;
        let len = a.len();
        a.insert(i, v.clone());
        prop_assert_eq!(a.len(), len + 1);
        prop_assert_eq!(a.at(i), v);
    }

    #[test]
    fn remove_at_shifts_left((a, i) in array_and_index()) {
        let before = a.to_vec();
        let mut a = a;
        a.remove_at(i);
        let mut expected = before.clone();
        expected.remove(i);
        prop_assert_eq!(a.len(), before.len() - 1);
        prop_assert_eq!(a.to_vec(), expected);
    }

    #[test]
    fn take_at_matches_at_and_remove_at((a, i) in array_and_index()) {
        let expected = a.at(i);
        let mut removed = a.clone();
        removed.remove_at(i);
        let mut taken = a;
        prop_assert_eq!(taken.take_at(i), expected);
        prop_assert_eq!(taken, removed);
    }

    #[test]
    fn out_of_range_reads_are_undefined(a in array(), extra in 0usize..100) {
        let before = a.to_vec();
        prop_assert!(a.at(a.len() + extra).is_undefined());
        prop_assert_eq!(a.to_vec(), before);
    }

    #[test]
    fn variant_list_round_trip(a in array()) {
        let list = a.to_variant_list();
        prop_assert_eq!(list.len(), a.len());
        prop_assert_eq!(JsonArray::from_variant_list(&list), a);
    }
}
