//! Building trees from a preorder-with-sentinel token stream and writing them
//! back out the same way.
//!
//! In the encoding every node is written as its value followed by its left and
//! right subtrees, and every missing child is written as a sentinel. `AB$$C$$`
//! is a root `A` with leaf children `B` and `C`.
//!
//! Streams that stop before every branch is closed are rejected with
//! [`BuildError::UnexpectedEnd`] rather than padded with implicit sentinels,
//! and streams that keep going after the tree is complete are rejected with
//! [`BuildError::TrailingTokens`].
//!
//! # Examples
//!
//! ```
//! use bintree::{BuildError, Tree};
//!
//! let tree = Tree::parse("AB$$C$$", '$').unwrap();
//! assert_eq!(tree.encode('$'), "AB$$C$$");
//!
//! assert!(matches!(
//!     Tree::parse("AB$$C", '$'),
//!     Err(BuildError::UnexpectedEnd { consumed: 5 })
//! ));
//! ```

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::BuildError;
use crate::tree::{NodeId, Subtree, Tree};

/// Where the next token read from the stream gets attached.
enum Slot {
    Root,
    Left(NodeId),
    Right(NodeId),
}

impl<T> Tree<T> {
    /// Builds a tree from preorder tokens where `None` is the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// let tree = Tree::from_tokens([Some(1), None, Some(2), None, None]).unwrap();
    ///
    /// assert_eq!(tree.preorder().collect::<Vec<_>>(), [&1, &2]);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn from_tokens<I>(tokens: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = Option<T>>,
        T: fmt::Debug,
    {
        let mut tokens = tokens.into_iter();
        let (tree, consumed) = Self::build(&mut tokens)?;
        match tokens.next() {
            None => Ok(tree),
            Some(extra) => Err(BuildError::TrailingTokens {
                position: consumed,
                token: match extra {
                    Some(value) => format!("{:?}", value),
                    None => "sentinel".to_string(),
                },
            }),
        }
    }

    /// Consumes exactly one complete tree from `tokens` and reports how many
    /// tokens that took. Uses an explicit stack of pending child slots so the
    /// stream's depth never touches the call stack.
    fn build<I>(tokens: &mut I) -> Result<(Self, usize), BuildError>
    where
        I: Iterator<Item = Option<T>>,
    {
        let mut tree = Self::new();
        let mut consumed = 0;
        let mut pending = vec![Slot::Root];

        while let Some(slot) = pending.pop() {
            let token = tokens
                .next()
                .ok_or(BuildError::UnexpectedEnd { consumed })?;
            consumed += 1;

            let Some(value) = token else {
                continue;
            };
            let id = tree.alloc(value);
            match slot {
                Slot::Root => tree.set_root(Some(id)),
                Slot::Left(parent) => tree.get_mut(parent).left = Some(id),
                Slot::Right(parent) => tree.get_mut(parent).right = Some(id),
            }
            // Left is read first, so it goes on top.
            pending.push(Slot::Right(id));
            pending.push(Slot::Left(id));
        }

        log::debug!("built tree of {} nodes from {} tokens", tree.len(), consumed);
        Ok((tree, consumed))
    }

    /// The preorder-with-sentinel encoding of this tree, `None` standing for
    /// the sentinel. Feeding it back to [`Tree::from_tokens`] gives an equal
    /// tree.
    pub fn to_tokens(&self) -> Vec<Option<&T>> {
        self.as_subtree().to_tokens()
    }
}

impl<'a, T> Subtree<'a, T> {
    /// The preorder-with-sentinel encoding of this subtree.
    pub fn to_tokens(&self) -> Vec<Option<&'a T>> {
        let mut tokens = Vec::new();
        let mut pending = vec![self.root];
        while let Some(current) = pending.pop() {
            match current {
                None => tokens.push(None),
                Some(id) => {
                    let node = self.tree.get(id);
                    tokens.push(Some(node.value()));
                    pending.push(node.right());
                    pending.push(node.left());
                }
            }
        }
        tokens
    }
}

impl Tree<char> {
    /// Builds a character tree from `input`, one character per token.
    /// Whitespace is skipped, so a trailing newline in a file is harmless.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// let tree = Tree::parse("AB$$C$$\n", '$').unwrap();
    /// assert_eq!(tree.inorder().collect::<String>(), "BAC");
    ///
    /// // An empty tree is a lone sentinel.
    /// assert!(Tree::parse("$", '$').unwrap().is_empty());
    /// ```
    pub fn parse(input: &str, sentinel: char) -> Result<Self, BuildError> {
        let mut chars = input.chars().filter(|c| !c.is_whitespace());
        let (tree, consumed) = {
            let mut tokens = chars.by_ref().map(|c| (c != sentinel).then_some(c));
            Self::build(&mut tokens)?
        };

        match chars.next() {
            None => Ok(tree),
            Some(extra) => Err(BuildError::TrailingTokens {
                position: consumed,
                token: extra.to_string(),
            }),
        }
    }

    /// Reads everything from `reader` and parses it with [`Tree::parse`].
    pub fn from_reader<R: Read>(mut reader: R, sentinel: char) -> Result<Self, BuildError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input, sentinel)
    }

    /// Opens the file at `path` and parses it with [`Tree::parse`]. A file
    /// that can't be opened or read gives [`BuildError::SourceUnavailable`].
    pub fn from_path<P: AsRef<Path>>(path: P, sentinel: char) -> Result<Self, BuildError> {
        let path = path.as_ref();
        log::debug!("reading tree from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file, sentinel)
    }

    /// Writes the tree back out as a preorder-with-sentinel string.
    pub fn encode(&self, sentinel: char) -> String {
        self.to_tokens()
            .into_iter()
            .map(|token| token.copied().unwrap_or(sentinel))
            .collect()
    }
}

/// Trees are equal when they have the same shape and the same value at every
/// position. Compare with [`structurally_equal`][crate::structurally_equal] for
/// the weaker check on flattened postorder values.
impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_tokens() == other.to_tokens()
    }
}

impl<T: Eq> Eq for Tree<T> {}
