use core::fmt;
use std::collections::VecDeque;

use crate::{arena::NodeId, AvlTree, Dir};

/// Diagnostic view of a single node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeDump<'a, K> {
    pub key: &'a K,
    pub height: usize,
    pub balance_factor: i8,
    pub parent: Option<&'a K>,
    pub left: Option<&'a K>,
    pub right: Option<&'a K>,
}

impl<K: fmt::Display> fmt::Display for NodeDump<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Opt<'a, K>(Option<&'a K>);

        impl<K: fmt::Display> fmt::Display for Opt<'_, K> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Some(k) => k.fmt(f),
                    None => f.write_str("-"),
                }
            }
        }

        write!(
            f,
            "key={} height={} balance={} parent={} left={} right={}",
            self.key,
            self.height,
            self.balance_factor,
            Opt(self.parent),
            Opt(self.left),
            Opt(self.right),
        )
    }
}

impl<K, S> AvlTree<K, S> {
    fn dump(&self, id: NodeId) -> NodeDump<'_, K> {
        let node = self.node(id);
        let key_of = |link: Option<NodeId>| link.map(|n| &self.node(n).key);

        NodeDump {
            key: &node.key,
            height: node.height as usize,
            balance_factor: self.balance_factor(id),
            parent: key_of(node.parent()),
            left: key_of(node.left()),
            right: key_of(node.right()),
        }
    }

    /// Returns a dump of every node, in ascending key order.
    pub fn dump_nodes(&self) -> impl Iterator<Item = NodeDump<'_, K>> + '_ {
        let mut stack = Vec::new();
        let mut opt_cur = self.root;

        core::iter::from_fn(move || {
            while let Some(cur) = opt_cur {
                stack.push(cur);
                opt_cur = self.node(cur).left();
            }

            let cur = stack.pop()?;
            opt_cur = self.node(cur).right();
            Some(self.dump(cur))
        })
    }

    /// Writes the tree as a Graphviz digraph, one rank per tree level. Nodes are labeled
    /// `key:height`.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
        K: fmt::Display,
    {
        let root = match self.root {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item {
            Node(NodeId),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut links = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let node = match queue.pop_front() {
                    Some(Item::Node(node)) => node,
                    Some(Item::Missing(id)) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                    None => break,
                };

                let key = &self.node(node).key;
                let height = self.node(node).height;
                write!(w, "\"graph{name}-{key}\" [label=\"{key}:{height}\"]; ")?;

                for dir in [Dir::Left, Dir::Right] {
                    if let Some(child) = self.node(node).child(dir) {
                        let child_key = &self.node(child).key;

                        queue.push_back(Item::Node(child));
                        writeln!(
                            links,
                            "\"graph{name}-{key}\" -> \"graph{name}-{child_key}\";"
                        )?;
                    } else {
                        queue.push_back(Item::Missing(missing));
                        writeln!(
                            links,
                            "\"graph{name}-{key}\" -> \"graph{name}-missing{missing}\";"
                        )?;
                        missing += 1;
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }
}
