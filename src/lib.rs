//! An AVL tree: a height-balanced binary search tree over totally ordered keys.
//!
//! Nodes are kept in an arena and addressed by index. Links from a parent to its children are the
//! ownership edges of the tree; the back-link from a child to its parent is a plain index used for
//! retracing and rotation.

// Conventions used in comments:
// - The height of a node `x` is denoted `h(x)`. A missing child has height -1, so a leaf has
//   height 0.
// - The balance factor of `x` is `h(left(x)) - h(right(x))`.
// - A node is left-heavy if its balance factor is positive and right-heavy if it is negative.
//
// The invariants of an AVL tree are:
// 1. Every node's height is one more than the height of its taller child.
// 2. Every balance factor is -1, 0 or 1.
// 3. Every key in a left subtree is less than its ancestor's key, which is less than every key in
//    the ancestor's right subtree.
//
// A single insertion or removal can change the balance factor of a node by at most one, so after
// a mutation every node on the path to the root has a balance factor in -2..=2, and one single or
// double rotation at a node restores (2) for that node's subtree.

use core::{borrow::Borrow, cmp::Ordering, fmt, mem, ops::Not};

mod arena;
mod debug;
mod error;
mod iter;
mod sink;
mod snapshot;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

use arena::{Arena, NodeId};

pub use debug::NodeDump;
pub use error::{Error, Result};
pub use iter::Keys;
pub use sink::{LogSink, Op, OpLog, OpRecord, OpSink};
pub use snapshot::SnapshotIter;

/// An AVL-balanced ordered set.
///
/// Every operation runs in _O(log(n))_ time. Inserting a key that is already present is rejected
/// and leaves the tree untouched.
///
/// The tree reports each public operation to its [`OpSink`]. The default sink, `()`, discards
/// everything.
#[derive(Clone)]
pub struct AvlTree<K, S = ()> {
    nodes: Arena<Node<K>>,
    root: Link,
    generation: u64,
    sink: S,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

type Link = Option<NodeId>;

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    parent: Link,
    children: [Link; 2],
    height: i8,
}

impl<K> Node<K> {
    fn leaf(key: K, parent: Link) -> Self {
        Node {
            key,
            parent,
            children: [None; 2],
            height: 0,
        }
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    #[inline]
    fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    fn child(&self, dir: Dir) -> Link {
        self.children[dir as usize]
    }

    #[inline]
    fn left(&self) -> Link {
        self.child(Dir::Left)
    }

    #[inline]
    fn right(&self) -> Link {
        self.child(Dir::Right)
    }

    #[inline]
    fn set_parent(&mut self, parent: Link) -> Link {
        mem::replace(&mut self.parent, parent)
    }

    #[inline]
    fn set_child(&mut self, dir: Dir, child: Link) -> Link {
        mem::replace(&mut self.children[dir as usize], child)
    }
}

impl<K> AvlTree<K> {
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<K> {
        AvlTree::with_sink(())
    }

    /// Returns a new empty tree with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> AvlTree<K> {
        AvlTree::with_capacity_and_sink(capacity, ())
    }
}

impl<K, S> AvlTree<K, S> {
    /// Returns a new empty tree that reports every operation to `sink`.
    pub const fn with_sink(sink: S) -> AvlTree<K, S> {
        AvlTree {
            nodes: Arena::new(),
            root: None,
            generation: 0,
            sink,
        }
    }

    pub fn with_capacity_and_sink(capacity: usize, sink: S) -> AvlTree<K, S> {
        AvlTree {
            nodes: Arena::with_capacity(capacity),
            root: None,
            generation: 0,
            sink,
        }
    }

    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        let empty = self.len() == 0;
        debug_assert_eq!(empty, self.root.is_none());
        empty
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the height of the tree. Both the empty tree and a tree holding a single key have
    /// height 0.
    pub fn height(&self) -> usize {
        self.root
            .map(|root| self.nodes[root].height as usize)
            .unwrap_or(0)
    }

    /// Returns the sink this tree reports to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Counter bumped by every successful structural mutation.
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id]
    }

    /// Returns the height of the pointed-to node.
    #[inline]
    fn height_of(&self, link: Link) -> i8 {
        link.map(|n| self.node(n).height).unwrap_or(-1)
    }

    #[inline]
    fn balance_factor(&self, node: NodeId) -> i8 {
        let node = self.node(node);
        self.height_of(node.left()) - self.height_of(node.right())
    }

    // Returns the side a node leans towards, if any.
    fn lean(&self, node: NodeId) -> Option<Dir> {
        match self.balance_factor(node).cmp(&0) {
            Ordering::Greater => Some(Dir::Left),
            Ordering::Equal => None,
            Ordering::Less => Some(Dir::Right),
        }
    }

    fn update_height(&mut self, node: NodeId) {
        let n = self.node(node);
        let height = self.height_of(n.left()).max(self.height_of(n.right())) + 1;
        self.node_mut(node).height = height;
    }

    fn which_child(&self, parent: NodeId, child: NodeId) -> Dir {
        if self.node(parent).left() == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    fn maybe_set_parent(&mut self, opt_node: Link, parent: Link) {
        let Some(node) = opt_node else {
            return;
        };

        self.node_mut(node).set_parent(parent);
    }

    #[inline]
    fn replace_child_or_set_root(&mut self, parent: Link, old_child: NodeId, new_child: Link) {
        match parent {
            Some(parent) => self.replace_child(parent, old_child, new_child),
            None => self.root = new_child,
        }
    }

    // Replaces the child link of `parent` pointing at `old_child` with `new_child`.
    //
    // `new_child`'s parent link is not updated.
    fn replace_child(&mut self, parent: NodeId, old_child: NodeId, new_child: Link) {
        let dir = self.which_child(parent, old_child);
        debug_assert_eq!(
            self.node(parent).child(dir),
            Some(old_child),
            "`old_child` must be a child of `parent`"
        );
        debug_assert!(
            new_child.is_none() || self.node(parent).child(!dir) != new_child,
            "`new_child` must not be a child of `parent`"
        );

        self.node_mut(parent).set_child(dir, new_child);
    }

    // Returns the minimum node in the subtree.
    //
    // If the subtree root is not the minimum, also returns the minimum node's parent.
    fn min_in_subtree(&self, root: NodeId) -> (NodeId, Link) {
        let mut parent = None;
        let mut cur = root;

        while let Some(left) = self.node(cur).left() {
            parent = Some(cur);
            cur = left;
        }

        (cur, parent)
    }

    // Descends `dir`-wards from the root, returning the extreme node and the number of steps taken.
    fn extreme(&self, dir: Dir) -> Option<(NodeId, usize)> {
        let mut cur = self.root?;
        let mut steps = 0;

        while let Some(next) = self.node(cur).child(dir) {
            cur = next;
            steps += 1;
        }

        Some((cur, steps))
    }

    /// Returns the minimum key of the tree, or `None` if it is empty.
    pub fn first(&self) -> Option<&K> {
        self.extreme(Dir::Left).map(|(n, _)| &self.node(n).key)
    }

    /// Returns the maximum key of the tree, or `None` if it is empty.
    pub fn last(&self) -> Option<&K> {
        self.extreme(Dir::Right).map(|(n, _)| &self.node(n).key)
    }

    /// Returns an iterator over the keys of the tree in ascending order.
    pub fn iter(&self) -> Keys<'_, K, S> {
        Keys::new(self, self.root.map(|root| self.min_in_subtree(root).0))
    }

    /// Removes every key from the tree.
    pub fn clear(&mut self)
    where
        S: OpSink,
    {
        if !self.is_empty() {
            self.nodes.clear();
            self.root = None;
            self.generation += 1;
        }

        self.record(Op::Clear, None, 0);
    }

    #[inline]
    fn record(&self, op: Op, arg: Option<&dyn fmt::Debug>, comparisons: usize)
    where
        S: OpSink,
    {
        self.sink.record(&OpRecord {
            op,
            arg,
            comparisons,
        });
    }

    // Performs a rotation at `down` in direction `dir`, raising its `!dir` child into its place.
    //
    // Heights of `down` and the raised child are recomputed, child first. Returns the raised node,
    // which is the new root of the subtree.
    fn rotate(&mut self, down: NodeId, dir: Dir) -> NodeId {
        // - `down` becomes the `dir` child of `up`.
        // - `across` goes from the `dir` child of `up` to the `!dir` child of `down`.
        let up = self
            .node(down)
            .child(!dir)
            .expect("rotation requires a child on the rising side");

        let across = self.node(up).child(dir);
        self.node_mut(down).set_child(!dir, across);
        self.maybe_set_parent(across, Some(down));

        let parent = self.node(down).parent();
        self.replace_child_or_set_root(parent, down, Some(up));

        self.node_mut(up).set_child(dir, Some(down));
        self.node_mut(down).set_parent(Some(up));
        self.node_mut(up).set_parent(parent);

        self.update_height(down);
        self.update_height(up);

        up
    }

    // Restores the balance invariant at `node`, whose children are already balanced and whose
    // balance factor is in -2..=2. Returns the root of the resulting subtree.
    fn rebalance(&mut self, node: NodeId) -> NodeId
    where
        K: fmt::Debug,
    {
        let heavy = match self.balance_factor(node) {
            bf if bf > 1 => Dir::Left,
            bf if bf < -1 => Dir::Right,
            _ => return node,
        };

        let child = self
            .node(node)
            .child(heavy)
            .expect("heavy side of an unbalanced node must have a child");

        if self.lean(child) == Some(!heavy) {
            // The heavy child leans inward: straighten it first.
            log::trace!(
                "double rotation at {:?} (heavy side {heavy:?})",
                self.node(node).key
            );
            self.rotate(child, heavy);
        } else {
            log::trace!(
                "single rotation at {:?} (heavy side {heavy:?})",
                self.node(node).key
            );
        }

        self.rotate(node, !heavy)
    }

    // Walks from `start` to the root, fixing heights and rotating wherever a node is unbalanced.
    fn retrace(&mut self, start: Link)
    where
        K: fmt::Debug,
    {
        let mut opt_cur = start;

        while let Some(cur) = opt_cur {
            self.update_height(cur);
            let subtree_root = self.rebalance(cur);
            opt_cur = self.node(subtree_root).parent();
        }
    }

    // Unlinks `node` from the tree and returns the key it held.
    //
    // When `node` has two children, the minimum of its right subtree is unlinked in its place and
    // its key moves into `node`, so `node` keeps its position in the tree.
    fn remove_node(&mut self, node: NodeId) -> K
    where
        K: fmt::Debug,
    {
        let parent = self.node(node).parent();
        let left = self.node(node).left();
        let right = self.node(node).right();

        let (removed, retrace_from) = match (left, right) {
            (Some(_), Some(right)) => {
                let (successor, successor_parent) = self.min_in_subtree(right);
                let successor_parent = successor_parent.unwrap_or(node);

                // The successor has no left child. Elevate its right child to replace it.
                let successor_right = self.node(successor).right();
                self.replace_child(successor_parent, successor, successor_right);
                self.maybe_set_parent(successor_right, Some(successor_parent));

                let successor = self.nodes.remove(successor);
                log::trace!(
                    "removing {:?} via its successor {:?}",
                    self.node(node).key,
                    successor.key
                );

                let key = mem::replace(&mut self.node_mut(node).key, successor.key);
                (key, Some(successor_parent))
            }

            (Some(child), None) | (None, Some(child)) => {
                self.replace_child_or_set_root(parent, node, Some(child));
                self.node_mut(child).set_parent(parent);
                (self.nodes.remove(node).key, parent)
            }

            (None, None) => {
                self.replace_child_or_set_root(parent, node, None);
                (self.nodes.remove(node).key, parent)
            }
        };

        self.retrace(retrace_from);
        self.generation += 1;

        removed
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self)
    where
        K: Ord,
    {
        let Some(root) = self.root else {
            assert_eq!(self.len(), 0);
            return;
        };

        assert_eq!(self.node(root).parent(), None, "root must not have a parent");

        let count = self.assert_invariants_at(root, None, None);
        assert_eq!(count, self.len(), "size counter disagrees with node count");
    }

    // Checks the subtree at `node`, whose keys must lie strictly between `lower` and `upper`.
    // Returns the number of nodes in the subtree.
    fn assert_invariants_at(&self, node: NodeId, lower: Option<&K>, upper: Option<&K>) -> usize
    where
        K: Ord,
    {
        let n = self.node(node);

        if let Some(lower) = lower {
            assert!(*lower < n.key, "key ordering violated");
        }
        if let Some(upper) = upper {
            assert!(n.key < *upper, "key ordering violated");
        }

        let left_height = self.height_of(n.left());
        let right_height = self.height_of(n.right());

        // Ensure the stored height is exact.
        assert_eq!(n.height, left_height.max(right_height) + 1, "stale height");
        if n.is_leaf() {
            assert_eq!(n.height, 0);
        }

        // Ensure the node is balanced.
        assert!((left_height - right_height).abs() <= 1, "balance factor out of range");

        let mut count = 1;

        for dir in [Dir::Left, Dir::Right] {
            if let Some(child) = n.child(dir) {
                // Ensure child's parent link points to this node.
                assert_eq!(self.node(child).parent(), Some(node), "parent link not set");

                let (lo, hi) = match dir {
                    Dir::Left => (lower, Some(&n.key)),
                    Dir::Right => (Some(&n.key), upper),
                };
                count += self.assert_invariants_at(child, lo, hi);
            }
        }

        count
    }
}

impl<K, S> AvlTree<K, S>
where
    K: Ord + fmt::Debug,
    S: OpSink,
{
    // Returns the node holding `key`, counting comparisons into `comparisons`.
    fn find<Q>(&self, key: &Q, comparisons: &mut usize) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;
            *comparisons += 1;

            match key.cmp(self.node(cur).key.borrow()) {
                Ordering::Less => opt_cur = self.node(cur).left(),
                Ordering::Equal => return Some(cur),
                Ordering::Greater => opt_cur = self.node(cur).right(),
            }
        }
    }

    /// Returns `true` if the tree contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let mut comparisons = 0;
        let found = self.find(key, &mut comparisons).is_some();
        self.record(Op::Contains, Some(&key), comparisons);
        found
    }

    /// Returns a reference to the stored key equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let mut comparisons = 0;
        let found = self.find(key, &mut comparisons);
        self.record(Op::Get, Some(&key), comparisons);
        found.map(|n| &self.node(n).key)
    }

    /// Returns the minimum key of the tree.
    pub fn min(&self) -> Result<&K> {
        let found = self.extreme(Dir::Left);
        self.record(Op::Min, None, found.map_or(0, |(_, steps)| steps));
        found
            .map(|(node, _)| &self.node(node).key)
            .ok_or(Error::EmptyTree)
    }

    /// Returns the maximum key of the tree.
    pub fn max(&self) -> Result<&K> {
        let found = self.extreme(Dir::Right);
        self.record(Op::Max, None, found.map_or(0, |(_, steps)| steps));
        found
            .map(|(node, _)| &self.node(node).key)
            .ok_or(Error::EmptyTree)
    }

    /// Returns the greatest key strictly less than `key`.
    pub fn predecessor<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let mut comparisons = 0;
        let mut best = None;
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            comparisons += 1;

            match key.cmp(self.node(cur).key.borrow()) {
                Ordering::Greater => {
                    best = Some(cur);
                    opt_cur = self.node(cur).right();
                }

                // Equality must still route left, or `key` itself would be reported.
                Ordering::Less | Ordering::Equal => opt_cur = self.node(cur).left(),
            }
        }

        self.record(Op::Predecessor, Some(&key), comparisons);

        best.map(|n| &self.node(n).key)
            .ok_or(Error::NoSuchPredecessor)
    }

    /// Returns the least key strictly greater than `key`.
    pub fn successor<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let mut comparisons = 0;
        let mut best = None;
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            comparisons += 1;

            match key.cmp(self.node(cur).key.borrow()) {
                Ordering::Less => {
                    best = Some(cur);
                    opt_cur = self.node(cur).left();
                }
                Ordering::Equal | Ordering::Greater => opt_cur = self.node(cur).right(),
            }
        }

        self.record(Op::Successor, Some(&key), comparisons);

        best.map(|n| &self.node(n).key)
            .ok_or(Error::NoSuchSuccessor)
    }

    /// Returns `true` if some stored key is strictly less than `key`.
    pub fn has_predecessor<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let found = self
            .first()
            .is_some_and(|first| key.cmp(first.borrow()) == Ordering::Greater);
        self.record(Op::HasPredecessor, Some(&key), usize::from(!self.is_empty()));
        found
    }

    /// Returns `true` if some stored key is strictly greater than `key`.
    pub fn has_successor<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let found = self
            .last()
            .is_some_and(|last| key.cmp(last.borrow()) == Ordering::Less);
        self.record(Op::HasSuccessor, Some(&key), usize::from(!self.is_empty()));
        found
    }

    /// Inserts `key` into the tree.
    ///
    /// Returns `false`, leaving the tree unchanged, if an equal key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let mut comparisons = 0;
        let mut slot = None;
        let mut opt_parent = self.root;

        // Descend the tree, looking for a vacant child link.
        while let Some(parent) = opt_parent {
            comparisons += 1;

            let dir = match key.cmp(&self.node(parent).key) {
                Ordering::Less => Dir::Left,
                Ordering::Equal => {
                    self.record(Op::Insert, Some(&key), comparisons);
                    return false;
                }
                Ordering::Greater => Dir::Right,
            };

            slot = Some((parent, dir));
            opt_parent = self.node(parent).child(dir);
        }

        let parent = slot.map(|(parent, _)| parent);
        let node = self.nodes.insert(Node::leaf(key, parent));

        match slot {
            Some((parent, dir)) => {
                self.node_mut(parent).set_child(dir, Some(node));
            }
            None => self.root = Some(node),
        }

        self.retrace(parent);
        self.generation += 1;

        self.record(Op::Insert, Some(&self.node(node).key), comparisons);
        true
    }

    /// Removes `key` from the tree.
    ///
    /// Returns `false` if the key was not present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let mut comparisons = 0;
        let found = self.find(key, &mut comparisons);

        if let Some(node) = found {
            self.remove_node(node);
        }

        self.record(Op::Delete, Some(&key), comparisons);
        found.is_some()
    }

    /// Removes and returns the minimum key of the tree.
    pub fn pop_first(&mut self) -> Option<K> {
        let found = self.extreme(Dir::Left);
        let key = found.map(|(node, _)| self.remove_node(node));
        self.record(Op::PopFirst, None, found.map_or(0, |(_, steps)| steps));
        key
    }

    /// Removes and returns the maximum key of the tree.
    pub fn pop_last(&mut self) -> Option<K> {
        let found = self.extreme(Dir::Right);
        let key = found.map(|(node, _)| self.remove_node(node));
        self.record(Op::PopLast, None, found.map_or(0, |(_, steps)| steps));
        key
    }

    /// Returns an iterator over the keys greater than or equal to `start`, in ascending order.
    pub fn range_from<Q>(&self, start: &Q) -> Keys<'_, K, S>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Keys::new(self, self.lower_bound(start).0)
    }

    // Returns the node with the least key `>= start`, and the number of comparisons spent.
    fn lower_bound<Q>(&self, start: &Q) -> (Link, usize)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut comparisons = 0;
        let mut best = None;
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            comparisons += 1;

            match start.cmp(self.node(cur).key.borrow()) {
                Ordering::Less | Ordering::Equal => {
                    best = Some(cur);
                    opt_cur = self.node(cur).left();
                }
                Ordering::Greater => opt_cur = self.node(cur).right(),
            }
        }

        (best, comparisons)
    }

    /// Returns a fail-fast snapshot iterator over every key, in ascending order.
    pub fn iterator(&self) -> SnapshotIter<K>
    where
        K: Clone,
    {
        let keys = self.iter().cloned().collect();
        self.record(Op::Iterator, None, 0);
        SnapshotIter::new(keys, self.generation)
    }

    /// Returns a fail-fast snapshot iterator over the keys greater than or equal to `start`, in
    /// ascending order.
    pub fn iterator_from<Q>(&self, start: &Q) -> SnapshotIter<K>
    where
        K: Clone + Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let (first, comparisons) = self.lower_bound(start);
        let keys = Keys::new(self, first).cloned().collect();
        self.record(Op::Iterator, Some(&start), comparisons);
        SnapshotIter::new(keys, self.generation)
    }
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<K: Ord + fmt::Debug> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, S> Extend<K> for AvlTree<K, S>
where
    K: Ord + fmt::Debug,
    S: OpSink,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'tree, K, S> IntoIterator for &'tree AvlTree<K, S> {
    type Item = &'tree K;
    type IntoIter = Keys<'tree, K, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, S> fmt::Debug for AvlTree<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders the keys in ascending order, one per line.
impl<K: fmt::Display, S: OpSink> fmt::Display for AvlTree<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in self.iter() {
            writeln!(f, "{key}")?;
        }

        self.record(Op::Render, None, 0);
        Ok(())
    }
}
