//! This crate exposes a plain binary tree mostly for educational purposes.
//!
//! ## Binary Tree
//!
//! A Binary Tree is a data structure made of `Node`s. A `Node` stores some
//! value and has up to two child `Node`s, a left one and a right one. Unlike a
//! Binary Search Tree there is no ordering between a `Node` and its children, so
//! finding a value may mean looking at every `Node`.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The [`Tree`] here grows by filling the first free child slot, level by
//! level, which keeps it a complete binary tree: every level is full except
//! possibly the last, and the last fills from the left. Deleting a value moves
//! the value of the deepest `Node` into its place and then drops that deepest
//! `Node`, so deletion keeps the shape complete as well.
//!
//! Trees can also be read from a preorder stream where a sentinel marks each
//! missing child (see [`stream`]), walked in pre-, in-, post- and level order
//! (see [`traversal`]), and mirrored (see [`mirror`]).
//!
//! # Examples
//!
//! ```
//! use bintree::Tree;
//!
//! let mut tree = Tree::parse("AB$$C$$", '$').unwrap();
//!
//! assert_eq!(tree.inorder().collect::<String>(), "BAC");
//! assert_eq!(tree.height(), 1);
//! assert_eq!(tree.max_value(), Some(&'C'));
//!
//! tree.insert('D');
//! assert_eq!(tree.encode('$'), "ABD$$$C$$");
//!
//! assert!(tree.is_mirror_of(&tree.mirrored()));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod mirror;
pub mod stream;
pub mod traversal;
pub mod tree;


pub use error::BuildError;
pub use mirror::{is_mirror_of, structurally_equal};
pub use traversal::{Inorder, LevelOrder, Order, Postorder, Preorder, Traversal, UnknownOrder};
pub use tree::{Node, NodeId, Subtree, Tree};
