//! The four classic walks over a [`Tree`].
//!
//! Each order has a lazy iterator driven by an explicit stack or queue and a
//! recursive version that collects into a `Vec`. The two always agree; the
//! iterators are the ones to use on deep trees. Iterators are `Clone`, so a
//! walk can be restarted from any point without touching the tree.
//!
//! # Examples
//!
//! ```
//! use bintree::{Order, Tree};
//!
//! let tree = Tree::parse("AB$$C$$", '$').unwrap();
//!
//! assert_eq!(tree.preorder().collect::<String>(), "ABC");
//! assert_eq!(tree.inorder().collect::<String>(), "BAC");
//! assert_eq!(tree.postorder().collect::<String>(), "BCA");
//! assert_eq!(tree.level_order().collect::<String>(), "ABC");
//!
//! let mut out = Vec::new();
//! tree.write_traversal(Order::Inorder, &mut out).unwrap();
//! assert_eq!(out, b"B A C\n");
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::str::FromStr;

use crate::tree::{NodeId, Subtree, Tree};

/// Which walk to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, then node, then right subtree.
    Inorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
    /// Breadth-first, one depth at a time.
    LevelOrder,
}

impl Order {
    /// Every order, in the order they're usually listed.
    pub const ALL: [Order; 4] = [
        Order::Preorder,
        Order::Inorder,
        Order::Postorder,
        Order::LevelOrder,
    ];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::Preorder => "preorder",
            Order::Inorder => "inorder",
            Order::Postorder => "postorder",
            Order::LevelOrder => "level-order",
        };
        f.write_str(name)
    }
}

/// Error returned when a string names no known [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown traversal order {0:?}")]
pub struct UnknownOrder(String);

impl FromStr for Order {
    type Err = UnknownOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pre" | "preorder" => Ok(Order::Preorder),
            "in" | "inorder" => Ok(Order::Inorder),
            "post" | "postorder" => Ok(Order::Postorder),
            "level" | "level-order" | "levelorder" => Ok(Order::LevelOrder),
            _ => Err(UnknownOrder(s.to_string())),
        }
    }
}

/// Generates the parts every traversal iterator shares: `Iterator` over the
/// values, a manual `Clone` that doesn't require `T: Clone`, and `ids` for
/// walking the node handles instead.
macro_rules! traversal_iter {
    ($name:ident { $($field:ident),* }) => {
        impl<'a, T> Iterator for $name<'a, T> {
            type Item = &'a T;

            fn next(&mut self) -> Option<Self::Item> {
                let tree = self.tree;
                self.next_id().map(move |id| tree.get(id).value())
            }
        }

        impl<T> Clone for $name<'_, T> {
            fn clone(&self) -> Self {
                Self {
                    tree: self.tree,
                    $($field: self.$field.clone()),*
                }
            }
        }

        impl<'a, T> $name<'a, T> {
            /// Walks the same order but yields node handles.
            pub fn ids(mut self) -> impl Iterator<Item = NodeId> + 'a {
                std::iter::from_fn(move || self.next_id())
            }
        }
    };
}

/// Preorder iterator. See [`Tree::preorder`].
#[derive(Debug)]
pub struct Preorder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Preorder<'a, T> {
    fn new(subtree: Subtree<'a, T>) -> Self {
        Self {
            tree: subtree.tree,
            stack: subtree.root.into_iter().collect(),
        }
    }

    fn next_id(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = self.tree.get(id);
        // Right goes in first so left comes out first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(id)
    }
}

traversal_iter!(Preorder { stack });

/// In-order iterator. See [`Tree::inorder`].
#[derive(Debug)]
pub struct Inorder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl<'a, T> Inorder<'a, T> {
    fn new(subtree: Subtree<'a, T>) -> Self {
        Self {
            tree: subtree.tree,
            stack: Vec::new(),
            current: subtree.root,
        }
    }

    fn next_id(&mut self) -> Option<NodeId> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.tree.get(id).left();
        }
        let id = self.stack.pop()?;
        self.current = self.tree.get(id).right();
        Some(id)
    }
}

traversal_iter!(Inorder { stack, current });

/// Postorder iterator. See [`Tree::postorder`].
#[derive(Debug)]
pub struct Postorder<'a, T> {
    tree: &'a Tree<T>,
    // The flag marks nodes whose children have already been pushed.
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> Postorder<'a, T> {
    fn new(subtree: Subtree<'a, T>) -> Self {
        Self {
            tree: subtree.tree,
            stack: subtree.root.map(|id| (id, false)).into_iter().collect(),
        }
    }

    fn next_id(&mut self) -> Option<NodeId> {
        while let Some((id, expanded)) = self.stack.pop() {
            if expanded {
                return Some(id);
            }
            let node = self.tree.get(id);
            self.stack.push((id, true));
            self.stack.extend(node.right().map(|id| (id, false)));
            self.stack.extend(node.left().map(|id| (id, false)));
        }
        None
    }
}

traversal_iter!(Postorder { stack });

/// Breadth-first iterator. See [`Tree::level_order`].
#[derive(Debug)]
pub struct LevelOrder<'a, T> {
    tree: &'a Tree<T>,
    queue: VecDeque<NodeId>,
}

impl<'a, T> LevelOrder<'a, T> {
    fn new(subtree: Subtree<'a, T>) -> Self {
        Self {
            tree: subtree.tree,
            queue: subtree.root.into_iter().collect(),
        }
    }

    fn next_id(&mut self) -> Option<NodeId> {
        let id = self.queue.pop_front()?;
        let node = self.tree.get(id);
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(id)
    }
}

traversal_iter!(LevelOrder { queue });

/// Any one of the four walks, picked at runtime.
#[derive(Debug)]
pub enum Traversal<'a, T> {
    /// See [`Preorder`].
    Preorder(Preorder<'a, T>),
    /// See [`Inorder`].
    Inorder(Inorder<'a, T>),
    /// See [`Postorder`].
    Postorder(Postorder<'a, T>),
    /// See [`LevelOrder`].
    LevelOrder(LevelOrder<'a, T>),
}

impl<T> Clone for Traversal<'_, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Preorder(it) => Self::Preorder(it.clone()),
            Self::Inorder(it) => Self::Inorder(it.clone()),
            Self::Postorder(it) => Self::Postorder(it.clone()),
            Self::LevelOrder(it) => Self::LevelOrder(it.clone()),
        }
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Preorder(it) => it.next(),
            Self::Inorder(it) => it.next(),
            Self::Postorder(it) => it.next(),
            Self::LevelOrder(it) => it.next(),
        }
    }
}

impl<'a, T> Subtree<'a, T> {
    /// Lazily walks this subtree in preorder.
    pub fn preorder(self) -> Preorder<'a, T> {
        Preorder::new(self)
    }

    /// Lazily walks this subtree in in-order.
    pub fn inorder(self) -> Inorder<'a, T> {
        Inorder::new(self)
    }

    /// Lazily walks this subtree in postorder.
    pub fn postorder(self) -> Postorder<'a, T> {
        Postorder::new(self)
    }

    /// Lazily walks this subtree breadth-first.
    pub fn level_order(self) -> LevelOrder<'a, T> {
        LevelOrder::new(self)
    }

    /// Lazily walks this subtree in the given order.
    pub fn traverse(self, order: Order) -> Traversal<'a, T> {
        match order {
            Order::Preorder => Traversal::Preorder(self.preorder()),
            Order::Inorder => Traversal::Inorder(self.inorder()),
            Order::Postorder => Traversal::Postorder(self.postorder()),
            Order::LevelOrder => Traversal::LevelOrder(self.level_order()),
        }
    }

    /// Preorder, by plain recursion.
    pub fn preorder_recursive(self) -> Vec<&'a T> {
        fn walk<'a, T>(tree: &'a Tree<T>, current: Option<NodeId>, out: &mut Vec<&'a T>) {
            if let Some(id) = current {
                let node = tree.get(id);
                out.push(node.value());
                walk(tree, node.left(), out);
                walk(tree, node.right(), out);
            }
        }

        let mut out = Vec::new();
        walk(self.tree, self.root, &mut out);
        out
    }

    /// In-order, by plain recursion.
    pub fn inorder_recursive(self) -> Vec<&'a T> {
        fn walk<'a, T>(tree: &'a Tree<T>, current: Option<NodeId>, out: &mut Vec<&'a T>) {
            if let Some(id) = current {
                let node = tree.get(id);
                walk(tree, node.left(), out);
                out.push(node.value());
                walk(tree, node.right(), out);
            }
        }

        let mut out = Vec::new();
        walk(self.tree, self.root, &mut out);
        out
    }

    /// Postorder, by plain recursion.
    pub fn postorder_recursive(self) -> Vec<&'a T> {
        fn walk<'a, T>(tree: &'a Tree<T>, current: Option<NodeId>, out: &mut Vec<&'a T>) {
            if let Some(id) = current {
                let node = tree.get(id);
                walk(tree, node.left(), out);
                walk(tree, node.right(), out);
                out.push(node.value());
            }
        }

        let mut out = Vec::new();
        walk(self.tree, self.root, &mut out);
        out
    }

    /// Level order built from one depth-bounded recursive sweep per level,
    /// from the root down to the deepest level.
    pub fn level_order_by_depth(self) -> Vec<&'a T> {
        fn at_depth<'a, T>(
            tree: &'a Tree<T>,
            current: Option<NodeId>,
            depth: usize,
            out: &mut Vec<&'a T>,
        ) {
            let Some(id) = current else {
                return;
            };
            let node = tree.get(id);
            if depth == 0 {
                out.push(node.value());
            } else {
                at_depth(tree, node.left(), depth - 1, out);
                at_depth(tree, node.right(), depth - 1, out);
            }
        }

        let mut out = Vec::new();
        // An empty subtree has height -1, so the range is empty.
        for depth in 0..=self.height_recursive() {
            at_depth(self.tree, self.root, depth as usize, &mut out);
        }
        out
    }
}

impl<T> Tree<T> {
    /// Lazily walks the tree in preorder.
    pub fn preorder(&self) -> Preorder<'_, T> {
        self.as_subtree().preorder()
    }

    /// Lazily walks the tree in in-order.
    pub fn inorder(&self) -> Inorder<'_, T> {
        self.as_subtree().inorder()
    }

    /// Lazily walks the tree in postorder.
    pub fn postorder(&self) -> Postorder<'_, T> {
        self.as_subtree().postorder()
    }

    /// Lazily walks the tree breadth-first with an explicit queue.
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        self.as_subtree().level_order()
    }

    /// Lazily walks the tree in the given order.
    pub fn traverse(&self, order: Order) -> Traversal<'_, T> {
        self.as_subtree().traverse(order)
    }

    /// See [`Subtree::preorder_recursive`].
    pub fn preorder_recursive(&self) -> Vec<&T> {
        self.as_subtree().preorder_recursive()
    }

    /// See [`Subtree::inorder_recursive`].
    pub fn inorder_recursive(&self) -> Vec<&T> {
        self.as_subtree().inorder_recursive()
    }

    /// See [`Subtree::postorder_recursive`].
    pub fn postorder_recursive(&self) -> Vec<&T> {
        self.as_subtree().postorder_recursive()
    }

    /// See [`Subtree::level_order_by_depth`].
    pub fn level_order_by_depth(&self) -> Vec<&T> {
        self.as_subtree().level_order_by_depth()
    }

    /// Writes every value in the given order to `sink`, separated by single
    /// spaces and followed by a newline. An empty tree writes just the newline.
    pub fn write_traversal<W>(&self, order: Order, sink: &mut W) -> io::Result<()>
    where
        T: fmt::Display,
        W: io::Write,
    {
        for (i, value) in self.traverse(order).enumerate() {
            if i > 0 {
                write!(sink, " ")?;
            }
            write!(sink, "{}", value)?;
        }
        writeln!(sink)
    }
}
