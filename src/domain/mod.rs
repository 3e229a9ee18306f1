//! Domain layer: the decision tree and its rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod answer;
pub mod codec;
pub mod error;
pub mod node;

pub use answer::Answer;
pub use error::{DomainError, ParseError};
pub use node::{Node, PreOrder, DEFAULT_ANIMAL, GUESS_PREFIX, GUESS_SUFFIX};
