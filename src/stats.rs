//! Descriptive statistics over labeled token/tag datasets.
//!
//! The visualization shows a one-line profile of the loaded dataset
//! (sentence, token, and entity counts plus the entity-type mix) next to
//! the prediction view. Tags follow the BIO `<prefix><type>` convention
//! with `"O"` for outside.
//!
//! # Example
//!
//! ```rust
//! use fewviz::dataset_props;
//!
//! let tokens = vec![vec!["John".to_string(), "slept".to_string()]];
//! let tags = vec![vec!["B-PER".to_string(), "O".to_string()]];
//!
//! let props = dataset_props(&tokens, &tags).unwrap();
//! assert_eq!(props.ne_count, 1);
//! assert_eq!(props.ne_types["PER"], 1.0);
//! println!("{props}");
//! ```

use crate::infer::tag_main_part;
use crate::tokens::token_count;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Descriptive statistics for a labeled NER dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProps {
    /// Entity type name → its share of all entity tags. Shares sum to
    /// 1.0 whenever the dataset has at least one entity.
    pub ne_types: HashMap<String, f64>,
    /// Number of sentences.
    pub sent_count: usize,
    /// Total number of tokens.
    pub tokens_count: usize,
    /// Number of entity (non-`O`) tags.
    pub ne_count: usize,
    /// `ne_count / tokens_count`.
    pub ne_ratio: f64,
}

impl fmt::Display for DatasetProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#sentences = {}, #tokens = {}, #ne = {}, #ne / #tokens = {:.3}",
            self.sent_count, self.tokens_count, self.ne_count, self.ne_ratio
        )
    }
}

/// Split a dataset of `(tokens, tags)` pairs into two parallel batches.
#[must_use]
pub fn split_tokens_tags(
    dataset: Vec<(Vec<String>, Vec<String>)>,
) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    dataset.into_iter().unzip()
}

/// Compute dataset statistics from parallel token and BIO tag batches.
///
/// Entity types are the `<prefix><type>` remainder of each non-`O` tag;
/// per-type counts are normalized by the total entity count.
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] when the token and tag structures disagree
///   on batch size or any per-sequence length.
/// - [`Error::EmptyInput`] when the dataset holds no tokens, since the
///   entity ratio is undefined.
pub fn dataset_props(tokens: &[Vec<String>], tags: &[Vec<String>]) -> Result<DatasetProps> {
    if tokens.len() != tags.len() {
        return Err(Error::shape_mismatch(format!(
            "{} token sequences but {} tag sequences",
            tokens.len(),
            tags.len()
        )));
    }
    for (i, (token_seq, tag_seq)) in tokens.iter().zip(tags).enumerate() {
        if token_seq.len() != tag_seq.len() {
            return Err(Error::shape_mismatch(format!(
                "sequence {i} has {} tokens but {} tags",
                token_seq.len(),
                tag_seq.len()
            )));
        }
    }

    let tokens_count = token_count(tokens);
    if tokens_count == 0 {
        return Err(Error::empty_input("dataset has no tokens"));
    }

    let mut type_counts: HashMap<String, usize> = HashMap::new();
    let mut ne_count = 0usize;
    for tag in tags.iter().flatten() {
        if tag != "O" {
            ne_count += 1;
            *type_counts.entry(tag_main_part(tag).to_string()).or_insert(0) += 1;
        }
    }

    let ne_types = type_counts
        .into_iter()
        .map(|(name, count)| (name, count as f64 / ne_count as f64))
        .collect();

    Ok(DatasetProps {
        ne_types,
        sent_count: tokens.len(),
        tokens_count,
        ne_count,
        ne_ratio: ne_count as f64 / tokens_count as f64,
    })
}

/// Exponential-normalize an array so its entries sum to 1.0.
///
/// With `rescale`, values are first min-max scaled to [0, 1]; the
/// prescale is skipped when the spread is below `1e-10` to avoid a
/// degenerate divide. There is no overflow guard for large magnitudes:
/// this weights display elements, it does not calibrate probabilities.
/// An empty input yields an empty output.
#[must_use]
pub fn softmax(values: &[f64], rescale: bool) -> Vec<f64> {
    const EPS: f64 = 1e-10;

    if values.is_empty() {
        return Vec::new();
    }

    let mut scaled = values.to_vec();
    if rescale {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if (max - min).abs() > EPS {
            for value in &mut scaled {
                *value = (*value - min) / (max - min);
            }
        }
    }

    let exps: Vec<f64> = scaled.iter().map(|value| value.exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
