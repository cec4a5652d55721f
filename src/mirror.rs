//! Mirror images and the loose equality used to recognise them.
//!
//! Mirroring comes in two flavours. [`Tree::mirror`] and
//! [`Tree::mirror_in_place`] swap child links in the tree's own nodes.
//! [`Tree::mirrored`] and [`Subtree::mirrored`] leave their input alone and
//! return a swapped copy. [`is_mirror_of`] only ever uses the copying flavour.
//!
//! # Examples
//!
//! ```
//! use bintree::Tree;
//!
//! let tree = Tree::parse("AB$D$$C$$", '$').unwrap();
//! let image = tree.mirrored();
//!
//! assert_eq!(image.encode('$'), "AC$$BD$$$");
//! assert!(tree.is_mirror_of(&image));
//!
//! // The copy left the original untouched; mirroring it for real matches the copy.
//! let tree = tree.mirror();
//! assert_eq!(tree, image);
//! ```

use crate::tree::{NodeId, Subtree, Tree};

impl<T> Tree<T> {
    /// Mirrors the tree and hands it back. The nodes are reused, not copied.
    pub fn mirror(mut self) -> Self {
        self.mirror_in_place();
        self
    }

    /// Mirrors the whole tree by swapping child links in place.
    pub fn mirror_in_place(&mut self) {
        if let Some(root) = self.root() {
            self.mirror_subtree(root);
        }
    }

    /// Mirrors the subtree under `id` in place. Children are mirrored before
    /// their parent swaps them.
    pub fn mirror_subtree(&mut self, id: NodeId) {
        let Some(subtree) = self.subtree(id) else {
            return;
        };
        let order: Vec<NodeId> = subtree.postorder().ids().collect();
        for id in order {
            let node = self.get_mut(id);
            std::mem::swap(&mut node.left, &mut node.right);
        }
        log::debug!("mirrored subtree under {:?}", id);
    }

    /// Returns a mirrored copy, leaving `self` as it was.
    pub fn mirrored(&self) -> Self
    where
        T: Clone,
    {
        self.as_subtree().mirrored()
    }

    /// Whether `other` holds the mirror image of this tree, compared with
    /// [`structurally_equal`]. Neither tree is modified.
    pub fn is_mirror_of(&self, other: &Self) -> bool
    where
        T: Clone + PartialEq,
    {
        is_mirror_of(self.as_subtree(), other.as_subtree())
    }
}

impl<T> Subtree<'_, T> {
    /// Returns a new tree holding a mirrored copy of this subtree.
    pub fn mirrored(&self) -> Tree<T>
    where
        T: Clone,
    {
        let mut copy = self.to_tree();
        copy.mirror_in_place();
        copy
    }
}

/// Compares the postorder value sequences of two subtrees, popping from the
/// back of both.
///
/// This only looks at values in postorder, so differently shaped subtrees whose
/// postorder values happen to line up are reported equal. `==` on [`Tree`]
/// checks shape as well.
///
/// # Examples
///
/// ```
/// use bintree::{structurally_equal, Tree};
///
/// let a = Tree::parse("CBA$$$$", '$').unwrap();
/// let b = Tree::parse("C$B$A$$", '$').unwrap();
///
/// assert!(structurally_equal(a.as_subtree(), b.as_subtree()));
/// assert_ne!(a, b);
/// ```
pub fn structurally_equal<T: PartialEq>(a: Subtree<'_, T>, b: Subtree<'_, T>) -> bool {
    let mut left: Vec<&T> = a.postorder().collect();
    let mut right: Vec<&T> = b.postorder().collect();
    if left.len() != right.len() {
        return false;
    }

    while let (Some(x), Some(y)) = (left.pop(), right.pop()) {
        if x != y {
            return false;
        }
    }
    true
}

/// Mirrors a copy of `a` and checks it against `b` with [`structurally_equal`].
pub fn is_mirror_of<T>(a: Subtree<'_, T>, b: Subtree<'_, T>) -> bool
where
    T: Clone + PartialEq,
{
    let image = a.mirrored();
    structurally_equal(image.as_subtree(), b)
}
