use super::*;
use std::collections::HashMap;

// ============================================================================
// GeometryKey tests
// ============================================================================

#[test]
fn test_lexicographic_ordering() {
    // set id dominates
    assert!(GeometryKey::new(0, 5) < GeometryKey::new(1, 0));
    // ordinal breaks ties
    assert!(GeometryKey::new(1, 2) < GeometryKey::new(1, 3));
    assert_eq!(GeometryKey::new(2, 2), GeometryKey::new(2, 2));
}

#[test]
fn test_key_as_map_key() {
    let mut map = HashMap::new();
    map.insert(GeometryKey::new(1, 2), "a");
    map.insert(GeometryKey::new(1, 3), "b");

    assert_eq!(map.get(&GeometryKey::new(1, 2)), Some(&"a"));
    assert_eq!(map.get(&GeometryKey::new(2, 2)), None);
}

#[test]
fn test_default_key() {
    assert_eq!(GeometryKey::default(), GeometryKey::new(0, 0));
}

// ============================================================================
// SizeClass tests
// ============================================================================

#[test]
fn test_size_class_exact_equality() {
    assert_eq!(SizeClass::new(16, 48), SizeClass::new(16, 48));
    // both lengths participate: a subset match is not a match
    assert_ne!(SizeClass::new(16, 48), SizeClass::new(16, 96));
    assert_ne!(SizeClass::new(16, 48), SizeClass::new(8, 48));
}
