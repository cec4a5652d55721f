//! Errors raised while building a [`Tree`][crate::Tree] from a token stream.
//!
//! Everything else the tree does is total: a missing key is a `None`/`false`
//! and an empty tree has a height of `-1`, so those never show up here.

use std::io;

use thiserror::Error;

/// Errors that can occur while reading a preorder-with-sentinel stream.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The input could not be opened or read.
    #[error("tree source unavailable: {0}")]
    SourceUnavailable(#[from] io::Error),

    /// The stream ran dry before every branch was closed by a sentinel.
    #[error("token stream ended after {consumed} tokens with open branches")]
    UnexpectedEnd {
        /// Tokens consumed before the stream ran out.
        consumed: usize,
    },

    /// The tree was complete but the stream kept going.
    #[error("unexpected trailing token {token:?} at position {position}")]
    TrailingTokens {
        /// Zero-based index of the first extra token.
        position: usize,
        /// The extra token, rendered for display.
        token: String,
    },
}
