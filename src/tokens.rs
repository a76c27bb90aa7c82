//! Token batch shapes and sequence utilities.
//!
//! The visualization front-end hands over either a single tokenized
//! sentence or a ragged batch of them. [`TokenInput`] makes that choice
//! explicit instead of sniffing the first element's type at runtime, so
//! a mixed structure is unrepresentable.
//!
//! # Example
//!
//! ```rust
//! use fewviz::TokenInput;
//!
//! let batch = TokenInput::Nested(vec![
//!     vec!["Paris".into(), "is".into(), "nice".into()],
//!     vec!["Hello".into()],
//! ]);
//! assert_eq!(batch.lengths(), vec![3, 1]);
//!
//! let padded = batch.pad().unwrap();
//! assert_eq!(padded.lengths(), vec![3, 3]);
//! ```

use crate::{Error, Result};

/// A batch of tokenized text, either one sequence or many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenInput {
    /// A single token sequence.
    Flat(Vec<String>),
    /// A batch of token sequences, possibly ragged.
    Nested(Vec<Vec<String>>),
}

impl TokenInput {
    /// Per-sequence token counts.
    ///
    /// A flat input counts as a one-sequence batch, so the result always
    /// has one entry per sequence.
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        match self {
            TokenInput::Flat(seq) => vec![seq.len()],
            TokenInput::Nested(seqs) => seqs.iter().map(Vec::len).collect(),
        }
    }

    /// Right-pad every sequence with empty strings to the batch maximum.
    ///
    /// A flat input has nothing to align against and is returned
    /// unchanged. The input itself is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when there are no sequences (or no
    /// tokens, in the flat case) to pad.
    pub fn pad(&self) -> Result<TokenInput> {
        match self {
            TokenInput::Flat(seq) => {
                if seq.is_empty() {
                    return Err(Error::empty_input("cannot pad an empty token sequence"));
                }
                Ok(TokenInput::Flat(seq.clone()))
            }
            TokenInput::Nested(seqs) => {
                if seqs.is_empty() {
                    return Err(Error::empty_input("cannot pad an empty token batch"));
                }
                let max_len = seqs.iter().map(Vec::len).max().unwrap_or(0);
                let padded = seqs
                    .iter()
                    .map(|seq| {
                        let mut seq = seq.clone();
                        seq.resize(max_len, String::new());
                        seq
                    })
                    .collect();
                Ok(TokenInput::Nested(padded))
            }
        }
    }

    /// Total number of tokens across all sequences.
    #[must_use]
    pub fn token_count(&self) -> usize {
        match self {
            TokenInput::Flat(seq) => seq.len(),
            TokenInput::Nested(seqs) => token_count(seqs),
        }
    }
}

/// Lower-case every token in a batch, producing a new structure.
#[must_use]
pub fn to_lower_case(tokens: &[Vec<String>]) -> Vec<Vec<String>> {
    tokens
        .iter()
        .map(|seq| seq.iter().map(|token| token.to_lowercase()).collect())
        .collect()
}

/// Concatenate a batch of sequences into one flat sequence, in order.
#[must_use]
pub fn flatten<T: Clone>(nested: &[Vec<T>]) -> Vec<T> {
    nested.iter().flat_map(|seq| seq.iter().cloned()).collect()
}

/// Total number of elements across all sequences of a batch.
#[must_use]
pub fn token_count<S>(seqs: &[Vec<S>]) -> usize {
    seqs.iter().map(Vec::len).sum()
}
