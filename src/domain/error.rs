//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Stored tree data that cannot be turned back into a tree.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unexpected end of data after line {line}")]
    UnexpectedEof { line: usize },

    #[error("line {line}: question has only one branch")]
    UnbalancedNode { line: usize },

    #[error("line {line}: tree nested deeper than {limit} levels")]
    TooDeep { line: usize, limit: usize },

    #[error("line {line}: unexpected record after end of tree")]
    TrailingRecords { line: usize },

    #[error("read failed at line {line}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Domain errors represent violations of the tree's rules.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed tree data: {0}")]
    Parse(#[from] ParseError),

    #[error("cannot learn at a question node: {text}")]
    NotALeaf { text: String },
}
