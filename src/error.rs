//! Error types for fewviz.

use thiserror::Error;

/// Result type for fewviz operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for fewviz operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parallel structures disagree on shape.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// An operation that needs at least one element received none.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A similarity range collapsed to a single value, so min-max
    /// normalization has nothing to spread.
    #[error("Degenerate similarity range: min == max == {0}")]
    DegenerateRange(f64),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Error::ShapeMismatch(msg.into())
    }

    /// Create an empty input error.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Error::EmptyInput(msg.into())
    }
}
