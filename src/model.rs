//! Randomized equivalence harness comparing [`AvlTree`] against `std` collections.
//!
//! Used by the crate's property tests and by the fuzz targets.

use std::{collections::BTreeSet, ops::Bound};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{AvlTree, Error};

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Delete(ItemValue),
    Contains(ItemValue),
    Predecessor(ItemValue),
    Successor(ItemValue),
    Min,
    Max,
    PopFirst,
    PopLast,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        // Index values pick an existing key so that hits are as likely as misses.
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Delete(item) => FinalOp::Delete(get_value(sorted, item)),
            Op::Contains(item) => FinalOp::Contains(get_value(sorted, item)),
            Op::Predecessor(item) => FinalOp::Predecessor(get_value(sorted, item)),
            Op::Successor(item) => FinalOp::Successor(get_value(sorted, item)),
            Op::Min => FinalOp::Min,
            Op::Max => FinalOp::Max,
            Op::PopFirst => FinalOp::PopFirst,
            Op::PopLast => FinalOp::PopLast,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Delete(u32),
    Contains(u32),
    Predecessor(u32),
    Successor(u32),
    Min,
    Max,
    PopFirst,
    PopLast,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::Delete),
        value_strategy().prop_map(Op::Contains),
        value_strategy().prop_map(Op::Predecessor),
        value_strategy().prop_map(Op::Successor),
        Just(Op::Min),
        Just(Op::Max),
        Just(Op::PopFirst),
        Just(Op::PopLast),
    ]
}

pub fn run_btree_equivalence(ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut btree = BTreeSet::new();
    let mut avl: AvlTree<u32> = AvlTree::new();

    fn insert_sorted(v: &mut Vec<u32>, value: u32) {
        if let Err(idx) = v.binary_search(&value) {
            v.insert(idx, value);
        }
    }

    fn remove_sorted(v: &mut Vec<u32>, value: u32) {
        if let Ok(idx) = v.binary_search(&value) {
            v.remove(idx);
        }
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                insert_sorted(&mut sorted_values, value);

                let from_btree = btree.insert(value);
                let from_avl = avl.insert(value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Delete(value) => {
                remove_sorted(&mut sorted_values, value);

                let from_btree = btree.remove(&value);
                let from_avl = avl.delete(&value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Contains(value) => {
                let from_btree = btree.contains(&value);
                let from_avl = avl.contains(&value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Predecessor(value) => {
                let from_btree = btree.range(..value).next_back().ok_or(Error::NoSuchPredecessor);
                let from_avl = avl.predecessor(&value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
                assert_eq!(from_btree.is_ok(), avl.has_predecessor(&value));
            }

            FinalOp::Successor(value) => {
                let from_btree = btree
                    .range((Bound::Excluded(value), Bound::Unbounded))
                    .next()
                    .ok_or(Error::NoSuchSuccessor);
                let from_avl = avl.successor(&value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
                assert_eq!(from_btree.is_ok(), avl.has_successor(&value));
            }

            FinalOp::Min => {
                let from_btree = btree.first().ok_or(Error::EmptyTree);
                let from_avl = avl.min();

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Max => {
                let from_btree = btree.last().ok_or(Error::EmptyTree);
                let from_avl = avl.max();

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopFirst => {
                let from_btree = btree.pop_first();
                let from_avl = avl.pop_first();
                if let Some(value) = from_btree {
                    remove_sorted(&mut sorted_values, value);
                }

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopLast => {
                let from_btree = btree.pop_last();
                let from_avl = avl.pop_last();
                if let Some(value) = from_btree {
                    remove_sorted(&mut sorted_values, value);
                }

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }
        }

        avl.assert_invariants();
        assert_eq!(btree.len(), avl.len());
        assert!(btree.iter().eq(avl.iter()));
    }
}

#[derive(Clone, Debug, Arbitrary)]
pub enum SnapshotOp {
    HasNext,
    Next,
    Remove,
}

pub fn snapshot_op_strategy() -> impl Strategy<Value = SnapshotOp> {
    proptest::prop_oneof![
        Just(SnapshotOp::HasNext),
        Just(SnapshotOp::Next),
        Just(SnapshotOp::Remove),
    ]
}

#[derive(Clone, Debug)]
pub struct SnapshotEquivalenceInput {
    pub values: Vec<u32>,
    pub start: Option<u32>,
    pub ops: Vec<SnapshotOp>,
}

impl<'a> arbitrary::Arbitrary<'a> for SnapshotEquivalenceInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        fn value(u: &mut arbitrary::Unstructured<'_>) -> u32 {
            u32::arbitrary(u).unwrap_or(0) % 1000
        }

        fn op(u: &mut arbitrary::Unstructured<'_>) -> SnapshotOp {
            SnapshotOp::arbitrary(u).unwrap_or(SnapshotOp::Next)
        }

        let num_values = u8::arbitrary(u)? % 100;
        let num_ops = u16::arbitrary(u)? % 1000;
        let start = Option::<u32>::arbitrary(u)?.map(|s| s % 1000);

        let values = core::iter::repeat_with(|| value(u))
            .take(num_values.into())
            .collect();

        let ops = core::iter::repeat_with(|| op(u))
            .take(num_ops.into())
            .collect();

        Ok(SnapshotEquivalenceInput { values, start, ops })
    }
}

/// Drives a [`SnapshotIter`](crate::SnapshotIter) and a sorted `Vec` in lockstep.
pub fn run_snapshot_equivalence(mut values: Vec<u32>, start: Option<u32>, ops: Vec<SnapshotOp>) {
    values.sort_unstable();
    values.dedup();

    let mut avl: AvlTree<u32> = values.iter().copied().collect();

    // The model: remaining keys in the tree, the snapshot, a cursor into it, and whether the
    // last-yielded key may be removed.
    let mut remaining = values.clone();
    let snapshot: Vec<u32> = values
        .iter()
        .copied()
        .filter(|&v| start.map_or(true, |s| v >= s))
        .collect();
    let mut pos = 0;
    let mut can_remove = false;

    let mut iter = match start {
        Some(s) => avl.iterator_from(&s),
        None => avl.iterator(),
    };

    for (op_id, op) in ops.into_iter().enumerate() {
        match op {
            SnapshotOp::HasNext => {
                assert_eq!(iter.has_next(&avl), Ok(pos < snapshot.len()), "Op #{op_id}");
            }

            SnapshotOp::Next => {
                let expected = snapshot.get(pos).ok_or(Error::EndOfIteration);
                assert_eq!(iter.next(&avl), expected, "Op #{op_id}");

                if expected.is_ok() {
                    pos += 1;
                    can_remove = true;
                }
            }

            SnapshotOp::Remove => {
                let result = iter.remove(&mut avl);

                if can_remove {
                    assert_eq!(result, Ok(()), "Op #{op_id}");
                    let key = snapshot[pos - 1];
                    let idx = remaining.binary_search(&key).expect("removed key was present");
                    remaining.remove(idx);
                    can_remove = false;
                } else {
                    assert_eq!(result, Err(Error::InvalidIteratorState), "Op #{op_id}");
                }
            }
        }

        avl.assert_invariants();
        assert_eq!(iter.remaining(), snapshot.len() - pos);
        assert!(remaining.iter().eq(avl.iter()));
    }
}
