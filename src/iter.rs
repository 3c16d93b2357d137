use core::iter::FusedIterator;

use crate::{AvlTree, Dir, Link};

#[derive(Copy, Clone, Debug)]
enum CameFrom {
    LeftChild,
    Here,
    RightChild,
}

/// A borrowing in-order iterator over the keys of an [`AvlTree`].
///
/// Created by [`AvlTree::iter`] and [`AvlTree::range_from`]. The traversal follows child and
/// parent links directly and needs no auxiliary stack.
pub struct Keys<'tree, K, S = ()> {
    tree: &'tree AvlTree<K, S>,

    cur: Link,
    from: CameFrom,
}

impl<'tree, K, S> Keys<'tree, K, S> {
    // Starts the traversal at `first`, which is yielded before anything else.
    pub(crate) fn new(tree: &'tree AvlTree<K, S>, first: Link) -> Self {
        Keys {
            tree,
            cur: first,
            from: CameFrom::LeftChild,
        }
    }
}

impl<'tree, K, S> Iterator for Keys<'tree, K, S> {
    type Item = &'tree K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let mut cur = self.cur?;

        loop {
            match self.from {
                CameFrom::LeftChild => {
                    // The left subtree has been exhausted, so this node is up next. Save off the
                    // iterator state and return it.
                    self.cur = Some(cur);
                    self.from = CameFrom::Here;

                    return Some(&tree.node(cur).key);
                }

                CameFrom::Here => {
                    // The current node was just yielded.
                    if let Some(right) = tree.node(cur).right() {
                        // If the right subtree is not empty, its minimum is next.
                        cur = tree.min_in_subtree(right).0;
                        self.from = CameFrom::LeftChild;
                    } else {
                        self.from = CameFrom::RightChild;
                    }
                }

                CameFrom::RightChild => {
                    // Ascend until we arrive from a left child; that parent is the successor.
                    let mut parent = tree.node(cur).parent();

                    while let Some(p) = parent {
                        match tree.which_child(p, cur) {
                            Dir::Left => break,
                            Dir::Right => {
                                cur = p;
                                parent = tree.node(p).parent();
                            }
                        }
                    }

                    match parent {
                        Some(p) => {
                            cur = p;
                            self.from = CameFrom::LeftChild;
                        }

                        // Climbed out of the root: the traversal is complete.
                        None => {
                            self.cur = None;
                            return None;
                        }
                    }
                }
            }
        }
    }
}

impl<K, S> FusedIterator for Keys<'_, K, S> {}

impl<K, S> Clone for Keys<'_, K, S> {
    fn clone(&self) -> Self {
        Keys {
            tree: self.tree,
            cur: self.cur,
            from: self.from,
        }
    }
}
