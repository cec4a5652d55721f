//! The tree engine. Nodes live in an arena owned by the [`Tree`] and are
//! addressed through [`NodeId`] handles, so two nodes holding equal values are
//! still told apart by identity (deletion depends on this).
//!
//! Insertion fills the first open child slot found breadth-first, so a tree
//! grown only through [`Tree::insert`] is always a complete binary tree: every
//! level is full except possibly the last, which fills left-to-right.
//!
//! # Examples
//!
//! ```
//! use bintree::Tree;
//!
//! let mut tree = Tree::new();
//! assert_eq!(tree.height(), -1);
//!
//! for value in ['A', 'B', 'C', 'D'] {
//!     tree.insert(value);
//! }
//!
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.count_leaves(), 2);
//! assert!(tree.contains(&'D'));
//!
//! // Deleting replaces the value with the deepest one and drops the deepest node.
//! assert_eq!(tree.delete(&'A'), Some('A'));
//! assert_eq!(tree.level_order().collect::<Vec<_>>(), [&'D', &'B', &'C']);
//! ```

use std::collections::VecDeque;

/// A stable handle to a node inside a particular [`Tree`]. Handles are only
/// meaningful for the tree that produced them and stop being valid once the
/// node they name is deleted or the tree is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The arena slot this handle points at.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single tree element: one value and up to two children.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A binary tree owning every node reachable from its root.
///
/// Values need no ordering for most operations; this is not a search tree.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<Option<Node<T>>>,
    // Vacated slots, reused by the next allocation.
    free: Vec<usize>,
    root: Option<NodeId>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// How many nodes the tree currently holds.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Looks up a node by handle. Returns `None` for handles that no longer
    /// name a live node.
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// The value held by the node `id`, if it is live.
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(Node::value)
    }

    /// Inserts `value` at the first open child slot found by a breadth-first
    /// scan from the root and returns the new node's handle. Duplicates are
    /// kept as distinct nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.insert(1);
    /// let left = tree.insert(2);
    /// let right = tree.insert(3);
    ///
    /// let root = tree.node(root).unwrap();
    /// assert_eq!(root.left(), Some(left));
    /// assert_eq!(root.right(), Some(right));
    /// ```
    pub fn insert(&mut self, value: T) -> NodeId {
        let Some(root) = self.root else {
            let id = self.alloc(value);
            self.root = Some(id);
            log::trace!("inserted {:?} as root", id);
            return id;
        };

        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            let (left, right) = {
                let node = self.get(id);
                (node.left, node.right)
            };
            match left {
                Some(left) => queue.push_back(left),
                None => {
                    let new = self.alloc(value);
                    self.get_mut(id).left = Some(new);
                    log::trace!("inserted {:?} left of {:?}", new, id);
                    return new;
                }
            }
            match right {
                Some(right) => queue.push_back(right),
                None => {
                    let new = self.alloc(value);
                    self.get_mut(id).right = Some(new);
                    log::trace!("inserted {:?} right of {:?}", new, id);
                    return new;
                }
            }
        }

        unreachable!("a finite tree always has an open child slot")
    }

    /// Finds the first node, in preorder, whose value equals `key`. Walks an
    /// explicit stack so deep trees can't overflow the call stack.
    pub fn search(&self, key: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        self.preorder().ids().find(|&id| self.get(id).value == *key)
    }

    /// Recursive twin of [`Tree::search`]: checks a node, then its whole left
    /// subtree, then its right subtree.
    pub fn search_recursive(&self, key: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        self.search_from(self.root, key)
    }

    fn search_from(&self, current: Option<NodeId>, key: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        let id = current?;
        let node = self.get(id);
        if node.value == *key {
            return Some(id);
        }
        self.search_from(node.left, key)
            .or_else(|| self.search_from(node.right, key))
    }

    /// Returns `true` if some node holds `key`.
    pub fn contains(&self, key: &T) -> bool
    where
        T: PartialEq,
    {
        self.search(key).is_some()
    }

    /// The last node reached by a breadth-first scan. This is the node the
    /// most recent insertion would have created.
    pub fn deepest(&self) -> Option<NodeId> {
        self.level_order().ids().last()
    }

    /// Removes `key` from the tree and returns the value that was removed.
    ///
    /// The node holding `key` takes the value of the deepest node, and the
    /// deepest node is then detached, so the tree keeps its level-filling
    /// shape. Deleting a missing key does nothing and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// let mut tree: Tree<i32> = (1..=5).collect();
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.preorder().collect::<Vec<_>>(), [&1, &5, &4, &3]);
    ///
    /// assert_eq!(tree.delete(&42), None);
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn delete(&mut self, key: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let target = self.search(key)?;
        let deepest = self
            .deepest()
            .expect("A tree holding the key has a deepest node");

        if self.root == Some(deepest) {
            // The deepest node is the root only when it is the sole node.
            let removed = self.release(deepest);
            self.clear();
            log::debug!("deleted the only node, tree is now empty");
            return Some(removed.value);
        }

        self.detach(deepest);
        let last = self.release(deepest).value;
        log::debug!("deleted {:?}, deepest node was {:?}", target, deepest);

        if target == deepest {
            Some(last)
        } else {
            Some(std::mem::replace(&mut self.get_mut(target).value, last))
        }
    }

    /// Clears the link from `target`'s parent, found breadth-first.
    fn detach(&mut self, target: NodeId) {
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let node = self.get_mut(id);
            if node.left == Some(target) {
                node.left = None;
                return;
            }
            if node.right == Some(target) {
                node.right = None;
                return;
            }
            queue.extend(node.left);
            queue.extend(node.right);
        }
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// The number of edges on the longest root-to-leaf path: `-1` when empty,
    /// `0` for a lone root. Computed level by level.
    pub fn height(&self) -> isize {
        self.as_subtree().height()
    }

    /// Recursive twin of [`Tree::height`]: `1 + max(left, right)` bottom-up.
    pub fn height_recursive(&self) -> isize {
        self.as_subtree().height_recursive()
    }

    /// Counts the nodes without children.
    pub fn count_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// The values of the childless nodes, in in-order.
    pub fn leaves(&self) -> impl Iterator<Item = &T> + '_ {
        self.inorder()
            .ids()
            .map(|id| self.get(id))
            .filter(|node| node.is_leaf())
            .map(Node::value)
    }

    /// Counts the nodes by walking the whole tree. Always equal to
    /// [`Tree::len`].
    pub fn count_nodes(&self) -> usize {
        self.preorder().count()
    }

    /// The largest value under `T`'s natural ordering, or `None` when the tree
    /// is empty. Ties resolve to the last one met in-order.
    pub fn max_value(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.inorder().max()
    }

    /// A view of the whole tree.
    pub fn as_subtree(&self) -> Subtree<'_, T> {
        Subtree {
            tree: self,
            root: self.root,
        }
    }

    /// A view of the subtree rooted at `id`, or `None` if `id` isn't live.
    pub fn subtree(&self, id: NodeId) -> Option<Subtree<'_, T>> {
        self.node(id).map(|_| Subtree {
            tree: self,
            root: Some(id),
        })
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<T> {
        self.nodes[id.0]
            .as_ref()
            .expect("NodeId points at a live node")
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes[id.0]
            .as_mut()
            .expect("NodeId points at a live node")
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    /// Stores a detached node and returns its handle.
    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(Node::new(value));
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(Node::new(value)));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Removes a node from the arena. The caller must already have unlinked it.
    fn release(&mut self, id: NodeId) -> Node<T> {
        let node = self.nodes[id.0]
            .take()
            .expect("Released node must be live");
        self.free.push(id.0);
        self.len -= 1;
        node
    }
}

impl<T> FromIterator<T> for Tree<T> {
    /// Builds a complete tree by inserting every value in turn.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// A borrowed view of the part of a [`Tree`] hanging below one node. Whole-tree
/// operations are expressed on this view so they work from any starting node.
#[derive(Debug)]
pub struct Subtree<'a, T> {
    pub(crate) tree: &'a Tree<T>,
    pub(crate) root: Option<NodeId>,
}

/// Manual implementations of `Clone` and `Copy` so the view is copyable even
/// when `T` isn't.
impl<T> Clone for Subtree<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Subtree<'_, T> {}

impl<'a, T> Subtree<'a, T> {
    /// The tree this view borrows from.
    pub fn tree(&self) -> &'a Tree<T> {
        self.tree
    }

    /// The node this view starts at.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns `true` if the view has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of this subtree, counted level by level with an explicit queue.
    pub fn height(&self) -> isize {
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        let mut height = -1;
        while !queue.is_empty() {
            height += 1;
            for _ in 0..queue.len() {
                let node = self.tree.get(queue.pop_front().expect("level is non-empty"));
                queue.extend(node.left);
                queue.extend(node.right);
            }
        }
        height
    }

    /// Height of this subtree, computed recursively.
    pub fn height_recursive(&self) -> isize {
        fn height_of<T>(tree: &Tree<T>, current: Option<NodeId>) -> isize {
            match current {
                None => -1,
                Some(id) => {
                    let node = tree.get(id);
                    1 + height_of(tree, node.left).max(height_of(tree, node.right))
                }
            }
        }

        height_of(self.tree, self.root)
    }

    /// Deep-copies this subtree into a new, independently owned tree with the
    /// same shape.
    pub fn to_tree(&self) -> Tree<T>
    where
        T: Clone,
    {
        let mut copy = Tree::new();
        let Some(root) = self.root else {
            return copy;
        };

        let new_root = copy.alloc(self.tree.get(root).value.clone());
        copy.set_root(Some(new_root));

        let mut pending = vec![(root, new_root)];
        while let Some((from, to)) = pending.pop() {
            let node = self.tree.get(from);
            if let Some(left) = node.left {
                let id = copy.alloc(self.tree.get(left).value.clone());
                copy.get_mut(to).left = Some(id);
                pending.push((left, id));
            }
            if let Some(right) = node.right {
                let id = copy.alloc(self.tree.get(right).value.clone());
                copy.get_mut(to).right = Some(id);
                pending.push((right, id));
            }
        }

        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assert the values found along the left and right child links of a node.
    macro_rules! assert_children {
        ($tree:ident, $id:expr, $left:expr, $right:expr) => {{
            let node = $tree.node($id).unwrap();
            assert_eq!(node.left().and_then(|id| $tree.value(id)), $left);
            assert_eq!(node.right().and_then(|id| $tree.value(id)), $right);
        }};
    }

    /// Checks every node is reachable exactly once from the root.
    fn assert_valid_tree<T>(tree: &Tree<T>) {
        let mut seen = std::collections::HashSet::new();
        for id in tree.preorder().ids() {
            assert!(seen.insert(id), "{:?} reachable twice", id);
        }
        assert_eq!(seen.len(), tree.len());
    }

    #[test]
    fn insert_fills_levels_left_to_right() {
        let mut tree = Tree::new();
        let a = tree.insert('A');
        let b = tree.insert('B');
        let c = tree.insert('C');
        tree.insert('D');
        tree.insert('E');
        tree.insert('F');

        assert_children!(tree, a, Some(&'B'), Some(&'C'));
        assert_children!(tree, b, Some(&'D'), Some(&'E'));
        assert_children!(tree, c, Some(&'F'), None);
        assert_eq!(tree.len(), 6);
        assert_valid_tree(&tree);
    }

    #[test]
    fn insert_keeps_duplicates() {
        let tree: Tree<i32> = [7, 7, 7].into_iter().collect();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.count_nodes(), 3);
    }

    #[test]
    fn search_prefers_preorder() {
        let mut tree = Tree::new();
        tree.insert(1);
        let left = tree.insert(2);
        tree.insert(2);

        assert_eq!(tree.search(&2), Some(left));
        assert_eq!(tree.search_recursive(&2), Some(left));
        assert_eq!(tree.search(&3), None);
        assert_eq!(tree.search_recursive(&3), None);
    }

    #[test]
    fn search_on_empty_tree() {
        let tree: Tree<i32> = Tree::new();

        assert_eq!(tree.search(&1), None);
        assert!(!tree.contains(&1));
    }

    #[test]
    fn deepest_is_last_inserted() {
        let mut tree = Tree::new();
        assert_eq!(tree.deepest(), None);

        for x in 0..10 {
            let id = tree.insert(x);
            assert_eq!(tree.deepest(), Some(id));
        }
    }

    #[test]
    fn delete_on_empty_tree() {
        let mut tree: Tree<char> = Tree::new();

        assert_eq!(tree.delete(&'A'), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn delete_missing_key() {
        let mut tree: Tree<i32> = (0..4).collect();

        assert_eq!(tree.delete(&9), None);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn delete_only_node() {
        let mut tree = Tree::new();
        tree.insert('A');

        assert_eq!(tree.delete(&'A'), Some('A'));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn delete_root_takes_deepest_value() {
        let mut tree: Tree<char> = "ABCDE".chars().collect();
        let root = tree.root().unwrap();

        assert_eq!(tree.delete(&'A'), Some('A'));
        assert_eq!(tree.value(root), Some(&'E'));
        assert_eq!(tree.len(), 4);
        assert!(!tree.contains(&'A'));
        assert_valid_tree(&tree);
    }

    #[test]
    fn delete_deepest_node_itself() {
        let mut tree: Tree<char> = "ABC".chars().collect();
        let root = tree.root().unwrap();

        assert_eq!(tree.delete(&'C'), Some('C'));
        assert_children!(tree, root, Some(&'B'), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn delete_uses_identity_with_duplicates() {
        // The deepest node holds the same value as the root; only one of the
        // two may go.
        let mut tree: Tree<i32> = [5, 1, 5].into_iter().collect();

        assert_eq!(tree.delete(&5), Some(5));
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&5));
        assert_eq!(tree.preorder().collect::<Vec<_>>(), [&5, &1]);
    }

    #[test]
    fn insert_after_delete_reuses_slot() {
        let mut tree: Tree<i32> = (0..5).collect();
        tree.delete(&0);
        let id = tree.insert(9);

        assert!(id.index() < 5);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.deepest(), Some(id));
        assert_valid_tree(&tree);
    }

    #[test]
    fn test_height() {
        let mut tree = Tree::new();
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.height_recursive(), -1);

        tree.insert(0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.height_recursive(), 0);

        for (x, expected) in [(1, 1), (2, 1), (3, 2), (6, 2), (7, 3)] {
            while tree.len() <= x {
                tree.insert(tree.len());
            }
            assert_eq!(tree.height(), expected);
            assert_eq!(tree.height_recursive(), expected);
        }
    }

    #[test]
    fn leaves_and_nodes() {
        let tree: Tree<i32> = (1..=6).collect();

        assert_eq!(tree.count_leaves(), 3);
        assert_eq!(tree.leaves().collect::<Vec<_>>(), [&4, &5, &6]);
        assert_eq!(tree.count_nodes(), 6);
    }

    #[test]
    fn max_value() {
        let mut tree = Tree::new();
        assert_eq!(tree.max_value(), None);

        tree.insert('M');
        assert_eq!(tree.max_value(), Some(&'M'));

        tree.extend(['Z', 'A', 'Q']);
        assert_eq!(tree.max_value(), Some(&'Z'));
    }

    #[test]
    fn clear_drops_everything() {
        let mut tree: Tree<i32> = (0..8).collect();
        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.count_nodes(), 0);
    }

    #[test]
    fn subtree_views() {
        let tree: Tree<i32> = (1..=7).collect();
        let root = tree.root().unwrap();
        let left = tree.node(root).unwrap().left().unwrap();
        let view = tree.subtree(left).unwrap();

        assert_eq!(view.height(), 1);
        assert_eq!(view.height_recursive(), 1);

        let copy = view.to_tree();
        assert_eq!(copy.len(), 3);
        assert_eq!(copy.preorder().collect::<Vec<_>>(), [&2, &4, &5]);
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut tree: Tree<i32> = (0..3).collect();
        let deepest = tree.deepest().unwrap();
        tree.delete(&2);

        assert!(tree.node(deepest).is_none());
        assert!(tree.subtree(deepest).is_none());
    }
}
