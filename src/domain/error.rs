//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Structural or grammatical violation found while building a tree.
///
/// Every variant aborts the whole build; line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid format in line {line_no}: {line}")]
    MalformedLine { line_no: usize, line: String },

    #[error("node {id} was already defined, line {line_no}: {line}")]
    DuplicateId {
        id: NodeId,
        line_no: usize,
        line: String,
    },

    #[error("root was already defined, line {line_no}: {line}")]
    DuplicateRoot { line_no: usize, line: String },

    #[error("node {id} is its own parent, line {line_no}: {line}")]
    SelfParentCycle {
        id: NodeId,
        line_no: usize,
        line: String,
    },

    #[error("no root element specified")]
    MissingRoot,

    #[error("node {0} is referenced as parent but never defined")]
    UnresolvedParent(NodeId),

    #[error("node {0} is not reachable from the root, parent references form a cycle")]
    CycleDetected(NodeId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, ParseError>;
