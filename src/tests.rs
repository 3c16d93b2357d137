use std::{collections::BTreeSet, ops::Range};

use proptest::prelude::*;

use crate::model;

use super::*;

fn insert_find_all(keys: &[u32]) {
    let mut tree: AvlTree<u32> = AvlTree::new();

    for &key in keys {
        assert!(tree.insert(key));
        tree.assert_invariants();
    }

    for key in keys {
        assert_eq!(tree.get(key), Some(key), "item not found");
        assert!(tree.contains(key));
    }

    assert_eq!(tree.len(), keys.len());
}

#[test]
fn zero_elems_find() {
    insert_find_all(&[]);
}

#[test]
fn single_elem_find() {
    insert_find_all(&[0]);
}

#[test]
fn two_elems_find() {
    insert_find_all(&[0, 1]);
    insert_find_all(&[1, 0]);
}

#[test]
fn three_elems_find() {
    insert_find_all(&[0, 1, 2]);
    insert_find_all(&[0, 2, 1]);
    insert_find_all(&[1, 0, 2]);
    insert_find_all(&[1, 2, 0]);
    insert_find_all(&[2, 0, 1]);
    insert_find_all(&[2, 1, 0]);
}

fn permutations(n: u32) -> Vec<Vec<u32>> {
    if n == 0 {
        return vec![vec![]];
    }

    let mut out = Vec::new();
    for perm in permutations(n - 1) {
        for i in 0..=perm.len() {
            let mut p = perm.clone();
            p.insert(i, n - 1);
            out.push(p);
        }
    }
    out
}

#[test]
fn five_elems_find() {
    for keys in permutations(5) {
        insert_find_all(&keys);
    }
}

fn insert_remove_all(keys: &[u32]) {
    let mut tree: AvlTree<u32> = AvlTree::new();

    for &key in keys {
        tree.insert(key);
        tree.assert_invariants();
    }

    for key in keys {
        assert!(tree.delete(key), "item not found");
        tree.assert_invariants();
    }
    assert!(tree.is_empty());

    for &key in keys {
        tree.insert(key);
        tree.assert_invariants();
    }

    for key in keys.iter().rev() {
        assert!(tree.delete(key), "item not found");
        assert!(!tree.contains(key));
        tree.assert_invariants();
    }
    assert!(tree.is_empty());
}

#[test]
fn remove_one() {
    insert_remove_all(&[0]);
}

#[test]
fn remove_two() {
    insert_remove_all(&[0, 1]);
    insert_remove_all(&[1, 0]);
}

#[test]
fn remove_three() {
    insert_remove_all(&[0, 1, 2]);
    insert_remove_all(&[0, 2, 1]);
    insert_remove_all(&[1, 0, 2]);
    insert_remove_all(&[1, 2, 0]);
    insert_remove_all(&[2, 0, 1]);
    insert_remove_all(&[2, 1, 0]);
}

#[test]
fn remove_six() {
    for keys in permutations(6) {
        insert_remove_all(&keys);
    }
}

#[test]
fn empty_tree_queries() {
    let mut tree: AvlTree<u32> = AvlTree::new();

    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.min(), Err(Error::EmptyTree));
    assert_eq!(tree.max(), Err(Error::EmptyTree));
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.predecessor(&1), Err(Error::NoSuchPredecessor));
    assert_eq!(tree.successor(&1), Err(Error::NoSuchSuccessor));
    assert!(!tree.has_predecessor(&1));
    assert!(!tree.has_successor(&1));
    assert!(!tree.contains(&1));
    assert!(!tree.delete(&1));
    assert_eq!(tree.pop_first(), None);
    assert_eq!(tree.pop_last(), None);
}

#[test]
fn balanced_scenario() {
    let mut tree: AvlTree<u32> = AvlTree::new();
    for key in [6, 3, 8, 1, 4, 7, 9] {
        assert!(tree.insert(key));
    }
    tree.assert_invariants();

    assert_eq!(tree.height(), 2);
    assert_eq!(tree.min(), Ok(&1));
    assert_eq!(tree.max(), Ok(&9));
    assert_eq!(tree.predecessor(&7), Ok(&6));
    assert_eq!(tree.successor(&7), Ok(&8));
    assert!(!tree.contains(&5));

    // Probes that are not stored still have neighbours.
    assert_eq!(tree.predecessor(&5), Ok(&4));
    assert_eq!(tree.successor(&5), Ok(&6));
    assert_eq!(tree.predecessor(&1), Err(Error::NoSuchPredecessor));
    assert_eq!(tree.successor(&9), Err(Error::NoSuchSuccessor));
    assert!(tree.has_predecessor(&2));
    assert!(!tree.has_predecessor(&1));
    assert!(tree.has_successor(&8));
    assert!(!tree.has_successor(&9));
}

#[test]
fn ascending_inserts_rotate() {
    let tree: AvlTree<u32> = (1..=7).collect();
    tree.assert_invariants();

    assert_eq!(tree.height(), 2);

    let root = tree.root.unwrap();
    assert_eq!(tree.node(root).key, 4);
}

#[test]
fn descending_inserts_rotate() {
    let tree: AvlTree<u32> = (1..=7).rev().collect();
    tree.assert_invariants();

    assert_eq!(tree.height(), 2);
}

#[test]
fn double_rotations() {
    // Right-left case.
    let tree: AvlTree<u32> = [1, 3, 2].into_iter().collect();
    assert_eq!(tree.node(tree.root.unwrap()).key, 2);
    assert_eq!(tree.height(), 1);

    // Left-right case.
    let tree: AvlTree<u32> = [3, 1, 2].into_iter().collect();
    assert_eq!(tree.node(tree.root.unwrap()).key, 2);
    assert_eq!(tree.height(), 1);
}

#[test]
fn delete_root_with_two_children() {
    let mut tree: AvlTree<u32> = [6, 3, 8, 1, 4, 7, 9].into_iter().collect();
    let root = tree.root.unwrap();

    assert!(tree.delete(&6));
    tree.assert_invariants();

    // The root node keeps its place and takes the minimum of its former right subtree.
    assert_eq!(tree.root, Some(root));
    assert_eq!(tree.node(root).key, 7);

    assert_eq!(tree.len(), 6);
    assert!(!tree.contains(&6));
    assert_eq!(tree.predecessor(&7), Ok(&4));
    assert_eq!(tree.successor(&4), Ok(&7));

    let keys: Vec<_> = tree.iter().copied().collect();
    assert_eq!(keys, [1, 3, 4, 7, 8, 9]);
}

#[test]
fn delete_rebalances() {
    //       4
    //     2   6
    //    1 3 5 7
    //           8
    let mut tree: AvlTree<u32> = [4, 2, 6, 1, 3, 5, 7, 8].into_iter().collect();
    assert_eq!(tree.height(), 3);

    // Removing the left subtree forces a rotation at the root.
    assert!(tree.delete(&1));
    assert!(tree.delete(&3));
    assert!(tree.delete(&2));
    tree.assert_invariants();

    assert_eq!(tree.height(), 2);
    assert_eq!(tree.node(tree.root.unwrap()).key, 6);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut tree: AvlTree<u32> = AvlTree::new();

    assert!(tree.insert(3));
    let generation = tree.generation();

    assert!(!tree.insert(3));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.generation(), generation);
}

#[test]
fn generation_tracks_successful_mutations() {
    let mut tree: AvlTree<u32> = AvlTree::new();
    assert_eq!(tree.generation(), 0);

    tree.insert(1);
    tree.insert(2);
    assert_eq!(tree.generation(), 2);

    tree.delete(&5);
    assert_eq!(tree.generation(), 2);

    tree.delete(&1);
    tree.pop_last();
    assert_eq!(tree.generation(), 4);

    tree.clear();
    assert_eq!(tree.generation(), 4);

    tree.insert(1);
    tree.clear();
    assert_eq!(tree.generation(), 6);
}

#[test]
fn pop_extremes() {
    let mut tree: AvlTree<u32> = (0..10).collect();

    assert_eq!(tree.pop_first(), Some(0));
    assert_eq!(tree.pop_last(), Some(9));
    tree.assert_invariants();

    assert_eq!(tree.first(), Some(&1));
    assert_eq!(tree.last(), Some(&8));
    assert_eq!(tree.len(), 8);
}

#[test]
fn slots_are_reused() {
    let mut tree: AvlTree<u32> = (0..100).collect();
    for k in 0..50 {
        tree.delete(&k);
    }
    for k in 100..150 {
        tree.insert(k);
    }
    tree.assert_invariants();

    assert_eq!(tree.len(), 100);
    assert_eq!(tree.min(), Ok(&50));
    assert_eq!(tree.max(), Ok(&149));
}

#[test]
fn clear_then_reuse() {
    let mut tree: AvlTree<u32> = (0..32).collect();
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);

    tree.extend([3, 1, 2]);
    tree.assert_invariants();
    assert_eq!(tree.len(), 3);
}

#[test]
fn borrowed_lookups() {
    let mut tree: AvlTree<String> = AvlTree::new();
    for word in ["pear", "apple", "fig", "kiwi"] {
        tree.insert(word.to_owned());
    }

    assert!(tree.contains("fig"));
    assert_eq!(tree.get("kiwi").map(String::as_str), Some("kiwi"));
    assert_eq!(tree.predecessor("grape").map(String::as_str), Ok("fig"));
    assert_eq!(tree.successor("grape").map(String::as_str), Ok("kiwi"));
    assert!(tree.delete("apple"));
    assert_eq!(tree.min().map(String::as_str), Ok("fig"));
}

#[test]
fn display_one_key_per_line() {
    let tree: AvlTree<u32> = [3, 1, 2].into_iter().collect();
    assert_eq!(tree.to_string(), "1\n2\n3\n");
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");

    let empty: AvlTree<u32> = AvlTree::new();
    assert_eq!(empty.to_string(), "");
}

#[test]
fn op_log_records_each_operation() {
    let log = OpLog::new();
    let mut tree = AvlTree::with_sink(&log);

    tree.insert(5);
    tree.insert(3);
    tree.insert(3);
    tree.contains(&4);
    let _ = tree.min();
    tree.delete(&5);

    assert_eq!(
        log.take(),
        "Operation insert(5) completed using 0 comparisons\n\
         Operation insert(3) completed using 1 comparisons\n\
         Operation insert(3) completed using 2 comparisons\n\
         Operation contains(4) completed using 2 comparisons\n\
         Operation min() completed using 1 comparisons\n\
         Operation delete(5) completed using 1 comparisons\n"
    );

    let _ = tree.iterator();
    let _ = tree.to_string();
    assert_eq!(
        log.take(),
        "Operation iterator() completed using 0 comparisons\n\
         Operation render() completed using 0 comparisons\n"
    );
}

#[test]
fn failed_queries_are_recorded() {
    let log = OpLog::new();
    let tree: AvlTree<u32, _> = AvlTree::with_sink(&log);

    assert_eq!(tree.max(), Err(Error::EmptyTree));
    assert_eq!(tree.successor(&1), Err(Error::NoSuchSuccessor));

    assert_eq!(
        log.take(),
        "Operation max() completed using 0 comparisons\n\
         Operation successor(1) completed using 0 comparisons\n"
    );
}

#[test]
fn log_sink_accepts_records() {
    let mut tree = AvlTree::with_sink(LogSink::new(log::Level::Trace));
    tree.extend(0..16u32);
    assert!(tree.delete(&7));
    tree.assert_invariants();
}

// Worst-case AVL height for `n` keys: 1.4405 * log2(n + 2) - 0.3277.
fn avl_height_bound(n: usize) -> f64 {
    1.4405 * ((n + 2) as f64).log2() - 0.3277
}

#[test]
fn sequential_height_bound() {
    for n in [1, 2, 3, 7, 100, 1000, 4095, 10_000] {
        let tree: AvlTree<u32> = (1..=n as u32).collect();
        tree.assert_invariants();

        assert!(
            tree.height() as f64 <= avl_height_bound(n),
            "height {} exceeds AVL bound for {n} keys",
            tree.height()
        );
    }
}

#[test]
fn iterator_fails_after_outside_insert() {
    let mut tree: AvlTree<u32> = [1, 2, 3].into_iter().collect();
    let mut iter = tree.iterator();

    assert_eq!(iter.next(&tree), Ok(&1));
    assert!(tree.insert(42));
    assert_eq!(iter.next(&tree), Err(Error::ConcurrentModification));
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_btree_equivalence(ops);
    }

    #[test]
    fn snapshot_equivalence(
        values in proptest::collection::vec(0u32..200, 0..100),
        start in proptest::option::of(0u32..200),
        ops in proptest::collection::vec(model::snapshot_op_strategy(), 0..200),
    ) {
        model::run_snapshot_equivalence(values, start, ops);
    }

    #[test]
    fn round_trip(keys in proptest::collection::btree_set(any::<i32>(), 0..300)) {
        let mut shuffled: Vec<_> = keys.iter().copied().collect();
        // Interleave from both ends so insertion order is neither ascending nor descending.
        let mut order = Vec::with_capacity(shuffled.len());
        while !shuffled.is_empty() {
            order.push(shuffled.remove(shuffled.len() / 2));
        }

        let tree: AvlTree<i32> = order.into_iter().collect();
        tree.assert_invariants();

        prop_assert_eq!(tree.len(), keys.len());
        prop_assert!(tree.iter().eq(keys.iter()));
        prop_assert!(tree.height() as f64 <= avl_height_bound(keys.len()));
    }

    #[test]
    fn neighbours_match_brute_force(
        keys in proptest::collection::vec(0u16..500, 0..120),
        probes in proptest::collection::vec(0u16..520, 1..40),
    ) {
        let tree: AvlTree<u16> = keys.iter().copied().collect();
        let stored: BTreeSet<u16> = keys.iter().copied().collect();

        for probe in probes {
            let pred = stored.iter().filter(|&&k| k < probe).max();
            let succ = stored.iter().filter(|&&k| k > probe).min();

            prop_assert_eq!(tree.predecessor(&probe).ok(), pred);
            prop_assert_eq!(tree.successor(&probe).ok(), succ);
            prop_assert_eq!(tree.has_predecessor(&probe), pred.is_some());
            prop_assert_eq!(tree.has_successor(&probe), succ.is_some());
        }
    }

    #[test]
    fn delete_keeps_others(keys in proptest::collection::btree_set(0u32..1000, 1..150), pick in any::<prop::sample::Index>()) {
        let mut tree: AvlTree<u32> = keys.iter().copied().collect();
        let sorted: Vec<u32> = keys.iter().copied().collect();
        let victim = *pick.get(&sorted);

        prop_assert!(tree.delete(&victim));
        tree.assert_invariants();

        prop_assert!(!tree.contains(&victim));
        prop_assert_eq!(tree.len(), keys.len() - 1);

        let rest: Vec<u32> = sorted.into_iter().filter(|&k| k != victim).collect();
        for (i, k) in rest.iter().enumerate() {
            prop_assert!(tree.contains(k));
            let expected_pred = i.checked_sub(1).map(|j| &rest[j]);
            prop_assert_eq!(tree.predecessor(k).ok(), expected_pred);
            prop_assert_eq!(tree.successor(k).ok(), rest.get(i + 1));
        }
    }
}
