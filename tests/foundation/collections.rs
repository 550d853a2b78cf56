//! Integration tests for persistent collections
//!
//! Tests QVec, QSet, QMap with structural sharing and immutability.

use quarry_foundation::{QMap, QSet, QVec};

// =============================================================================
// QVec
// =============================================================================

#[test]
fn vector_empty() {
    let v: QVec<i64> = QVec::new();
    assert!(v.is_empty());
    assert_eq!(v.len(), 0);
}

#[test]
fn vector_push_back_preserves_order() {
    let v = QVec::new().push_back(1).push_back(2).push_back(3);
    assert_eq!(v.len(), 3);
    assert_eq!(v.first(), Some(&1));
    assert_eq!(v.last(), Some(&3));
    assert_eq!(v.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn vector_immutability() {
    let v1 = QVec::new().push_back("a");
    let v2 = v1.push_back("b");

    // v1 is unchanged
    assert_eq!(v1.len(), 1);
    assert_eq!(v2.len(), 2);
}

#[test]
fn vector_append_keeps_operand_order() {
    let left: QVec<&str> = ["x"].into_iter().collect();
    let right: QVec<&str> = ["y", "z"].into_iter().collect();
    let joined = left.append(&right);
    assert_eq!(joined.iter().copied().collect::<Vec<_>>(), ["x", "y", "z"]);
    // Operands unchanged
    assert_eq!(left.len(), 1);
    assert_eq!(right.len(), 2);
}

// =============================================================================
// QSet
// =============================================================================

#[test]
fn set_deduplicates() {
    let s = QSet::new().insert("a").insert("a").insert("b");
    assert_eq!(s.len(), 2);
    assert!(s.contains(&"a"));
    assert!(s.contains(&"b"));
}

#[test]
fn set_union() {
    let a: QSet<i64> = [1, 2].into_iter().collect();
    let b: QSet<i64> = [2, 3].into_iter().collect();
    let u = a.union(&b);
    assert_eq!(u.len(), 3);
    assert_eq!(a.len(), 2);
}

#[test]
fn set_immutability() {
    let s1: QSet<i64> = QSet::new().insert(1);
    let s2 = s1.insert(2);
    assert_eq!(s1.len(), 1);
    assert_eq!(s2.len(), 2);
}

// =============================================================================
// QMap
// =============================================================================

#[test]
fn map_insert_and_get() {
    let m = QMap::new().insert("k", 1).insert("j", 2);
    assert_eq!(m.get(&"k"), Some(&1));
    assert_eq!(m.get(&"j"), Some(&2));
    assert!(m.contains_key(&"k"));
    assert!(!m.contains_key(&"missing"));
}

#[test]
fn map_insert_overwrites() {
    let m = QMap::new().insert("k", 1);
    let m2 = m.insert("k", 2);
    assert_eq!(m.get(&"k"), Some(&1));
    assert_eq!(m2.get(&"k"), Some(&2));
    assert_eq!(m2.len(), 1);
}

#[test]
fn map_structural_sharing() {
    let mut m = QMap::new();
    for i in 0..1000 {
        m = m.insert(i, i * 2);
    }

    // Clone is O(1); modifying the clone leaves the original intact
    let m2 = m.clone().insert(1000, 2000);
    assert_eq!(m.len(), 1000);
    assert_eq!(m2.len(), 1001);
}

#[test]
fn map_keys_and_values() {
    let m: QMap<&str, i64> = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(m.keys().count(), 2);
    assert_eq!(m.values().copied().sum::<i64>(), 3);
}
