//! Error types

use thiserror::Error;
use tuiwin::MenuError;

use crate::node::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable failures. Broken tree invariants panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The scope backing the tree cannot satisfy an allocation.
    #[error("allocation of {requested} bytes failed ({remaining} bytes left in scope)")]
    Exhausted { requested: usize, remaining: usize },

    /// The system allocator refused an allocation the scope had allowed.
    #[error("out of memory allocating {0} bytes")]
    OutOfMemory(usize),

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error(transparent)]
    Menu(#[from] MenuError),
}
