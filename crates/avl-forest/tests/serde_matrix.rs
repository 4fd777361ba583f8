#![cfg(feature = "serde")]

use avl_forest::{AvlMap, AvlSet};

#[test]
fn map_serializes_in_key_order() {
    let map: AvlMap<String, u32> = [("b", 2), ("c", 3), ("a", 1)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":1,"b":2,"c":3}"#);

    let back: AvlMap<String, u32> = serde_json::from_str(&json).unwrap();
    back.assert_valid().unwrap();
    assert_eq!(back, map);
}

#[test]
fn set_serializes_as_sorted_sequence() {
    let set: AvlSet<i32> = [5, -1, 3, 5].into_iter().collect();
    assert_eq!(serde_json::to_string(&set).unwrap(), "[-1,3,5]");

    let back: AvlSet<i32> = serde_json::from_str("[9,1,4,1]").unwrap();
    back.assert_valid().unwrap();
    assert_eq!(back.iter().copied().collect::<Vec<_>>(), vec![1, 4, 9]);
}
